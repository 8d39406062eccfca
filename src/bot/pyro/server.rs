//! `/server` - power actions and a status overview for one server.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            pyro::{PyroData, connect, embeds},
            reply,
        },
        core::panel::PowerSignal,
        errors::{Error, Result, Surface},
    };
    use poise::CreateReply;
    use tracing::info;

    type Context<'a> = poise::Context<'a, PyroData, Error>;

    /// Manage your Pterodactyl servers
    #[poise::command(
        slash_command,
        subcommands("server_start", "server_stop", "server_restart", "server_status"),
        subcommand_required
    )]
    pub async fn server(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Start a server
    #[poise::command(slash_command, rename = "start")]
    pub async fn server_start(
        ctx: Context<'_>,
        #[description = "Server identifier"] server_id: String,
    ) -> Result<()> {
        power(ctx, &server_id, PowerSignal::Start).await
    }

    /// Stop a server
    #[poise::command(slash_command, rename = "stop")]
    pub async fn server_stop(
        ctx: Context<'_>,
        #[description = "Server identifier"] server_id: String,
    ) -> Result<()> {
        power(ctx, &server_id, PowerSignal::Stop).await
    }

    /// Restart a server
    #[poise::command(slash_command, rename = "restart")]
    pub async fn server_restart(
        ctx: Context<'_>,
        #[description = "Server identifier"] server_id: String,
    ) -> Result<()> {
        power(ctx, &server_id, PowerSignal::Restart).await
    }

    /// Show a server's state and resource usage
    #[poise::command(slash_command, rename = "status")]
    pub async fn server_status(
        ctx: Context<'_>,
        #[description = "Server identifier"] server_id: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = status_reply(ctx, &server_id).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    async fn power(ctx: Context<'_>, server_id: &str, signal: PowerSignal) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let outcome = power_reply(ctx, server_id, signal).await;
        reply::respond(ctx, outcome, Surface::Command).await
    }

    async fn power_reply(ctx: Context<'_>, server_id: &str, signal: PowerSignal) -> Result<CreateReply> {
        let panel = connect(ctx).await?;
        panel.send_power_signal(server_id, signal).await?;
        info!(
            "User {} sent {:?} to server {}",
            ctx.author().id,
            signal,
            server_id
        );
        Ok(CreateReply::default().embed(embeds::power_action(server_id, signal)))
    }

    async fn status_reply(ctx: Context<'_>, server_id: &str) -> Result<CreateReply> {
        let panel = connect(ctx).await?;
        let details = panel.server_details(server_id).await?;
        let usage = panel.server_resources(server_id).await?;
        Ok(CreateReply::default().embed(embeds::server_status(server_id, &details, &usage)))
    }
}

// Re-export all commands
pub use inner::*;
