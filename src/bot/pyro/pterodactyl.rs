//! `/pterodactyl` - the wider panel command tree (servers, account, files, databases).

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            pyro::{PyroData, connect, embeds},
            reply,
        },
        core::{servers, setup::require_key_id},
        errors::{Error, Result, Surface},
    };
    use poise::CreateReply;
    use tracing::{debug, info};

    type Context<'a> = poise::Context<'a, PyroData, Error>;

    /// Default description for keys created from Discord.
    const DEFAULT_KEY_DESCRIPTION: &str = "Created via Discord Bot";

    /// What `/pterodactyl account api-key` should do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
    pub enum ApiKeyAction {
        #[name = "List Keys"]
        List,
        #[name = "Create Key"]
        Create,
        #[name = "Delete Key"]
        Delete,
    }

    /// Advanced Pterodactyl API commands
    #[poise::command(
        slash_command,
        subcommands("ptero_server", "account", "file", "database"),
        subcommand_required
    )]
    pub async fn pterodactyl(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Server management commands
    #[poise::command(
        slash_command,
        rename = "server",
        subcommands("server_list", "server_details", "server_resources", "server_command"),
        subcommand_required
    )]
    pub async fn ptero_server(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// List all your servers
    #[poise::command(slash_command, rename = "list")]
    pub async fn server_list(ctx: Context<'_>) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = server_list_reply(ctx).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// Get detailed server information
    #[poise::command(slash_command, rename = "details")]
    pub async fn server_details(
        ctx: Context<'_>,
        #[description = "The server identifier"] server_id: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = details_reply(ctx, &server_id).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// Get server resource usage
    #[poise::command(slash_command, rename = "resources")]
    pub async fn server_resources(
        ctx: Context<'_>,
        #[description = "The server identifier"] server_id: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = resources_reply(ctx, &server_id).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// Send a command to the server
    #[poise::command(slash_command, rename = "command")]
    pub async fn server_command(
        ctx: Context<'_>,
        #[description = "The server identifier"] server_id: String,
        #[description = "The command to send"] command: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = command_reply(ctx, &server_id, &command).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// Account management commands
    #[poise::command(
        slash_command,
        subcommands("account_info", "account_api_key"),
        subcommand_required
    )]
    pub async fn account(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Get your account information
    #[poise::command(slash_command, rename = "info")]
    pub async fn account_info(ctx: Context<'_>) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = account_reply(ctx).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// Manage your API keys
    #[poise::command(slash_command, rename = "api-key")]
    pub async fn account_api_key(
        ctx: Context<'_>,
        #[description = "Action to perform"] action: ApiKeyAction,
        #[description = "Description for the new API key (for create action)"]
        description: Option<String>,
        #[description = "API key identifier to delete (for delete action)"] key_id: Option<String>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = api_key_reply(ctx, action, description, key_id).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// File management commands
    #[poise::command(slash_command, subcommands("file_list"), subcommand_required)]
    pub async fn file(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// List files in a directory
    #[poise::command(slash_command, rename = "list")]
    pub async fn file_list(
        ctx: Context<'_>,
        #[description = "The server identifier"] server_id: String,
        #[description = "Directory path (default: /)"] path: Option<String>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let path = path.unwrap_or_else(|| "/".to_string());
        let outcome = files_reply(ctx, &server_id, &path).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// Database management commands
    #[poise::command(slash_command, subcommands("database_list"), subcommand_required)]
    pub async fn database(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// List all databases for a server
    #[poise::command(slash_command, rename = "list")]
    pub async fn database_list(
        ctx: Context<'_>,
        #[description = "The server identifier"] server_id: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = databases_reply(ctx, &server_id).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    /// Lists the user's servers and records them for later lookups.
    async fn server_list_reply(ctx: Context<'_>) -> Result<CreateReply> {
        let panel = connect(ctx).await?;
        let listed = panel.list_servers().await?;

        let user_id = ctx.author().id.to_string();
        for server in &listed {
            servers::save_server(
                &ctx.data().database,
                &user_id,
                &server.identifier,
                Some(server.name.as_str()),
            )
            .await?;
        }
        debug!("Recorded {} servers for user {}", listed.len(), user_id);

        Ok(embeds::server_list(&listed))
    }

    async fn details_reply(ctx: Context<'_>, server_id: &str) -> Result<CreateReply> {
        let details = connect(ctx).await?.server_details(server_id).await?;
        Ok(CreateReply::default().embed(embeds::server_details(&details)))
    }

    async fn resources_reply(ctx: Context<'_>, server_id: &str) -> Result<CreateReply> {
        let usage = connect(ctx).await?.server_resources(server_id).await?;
        Ok(CreateReply::default().embed(embeds::server_resources(&usage)))
    }

    async fn command_reply(ctx: Context<'_>, server_id: &str, command: &str) -> Result<CreateReply> {
        connect(ctx).await?.send_command(server_id, command).await?;
        info!(
            "User {} sent console command to server {}",
            ctx.author().id,
            server_id
        );
        Ok(CreateReply::default().embed(embeds::command_sent(server_id, command)))
    }

    async fn account_reply(ctx: Context<'_>) -> Result<CreateReply> {
        let account = connect(ctx).await?.account_details().await?;
        Ok(CreateReply::default().embed(embeds::account_info(&account)))
    }

    async fn api_key_reply(
        ctx: Context<'_>,
        action: ApiKeyAction,
        description: Option<String>,
        key_id: Option<String>,
    ) -> Result<CreateReply> {
        match action {
            ApiKeyAction::List => {
                let keys = connect(ctx).await?.list_api_keys().await?;
                Ok(embeds::api_key_list(&keys))
            }
            ApiKeyAction::Create => {
                let description =
                    description.unwrap_or_else(|| DEFAULT_KEY_DESCRIPTION.to_string());
                let created = connect(ctx).await?.create_api_key(&description).await?;
                info!(
                    "User {} created API key {}",
                    ctx.author().id,
                    created.attributes.identifier
                );
                Ok(CreateReply::default().embed(embeds::api_key_created(&description, &created)))
            }
            ApiKeyAction::Delete => {
                let key_id = require_key_id(key_id)?;
                connect(ctx).await?.delete_api_key(&key_id).await?;
                info!("User {} deleted API key {}", ctx.author().id, key_id);
                Ok(CreateReply::default().embed(embeds::api_key_deleted(&key_id)))
            }
        }
    }

    async fn files_reply(ctx: Context<'_>, server_id: &str, path: &str) -> Result<CreateReply> {
        let files = connect(ctx).await?.list_files(server_id, path).await?;
        Ok(embeds::file_list(path, &files))
    }

    async fn databases_reply(ctx: Context<'_>, server_id: &str) -> Result<CreateReply> {
        let databases = connect(ctx).await?.list_databases(server_id).await?;
        Ok(embeds::database_list(&databases))
    }
}

// Re-export all commands
pub use inner::*;
