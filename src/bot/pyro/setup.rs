//! `/pyrobot` - link a Pterodactyl panel account to the invoking Discord user.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            pyro::{PyroData, embeds},
            reply,
        },
        core::setup::configure_credentials,
        errors::{Error, Result, Surface},
    };
    use poise::CreateReply;

    /// Set up your Pterodactyl API credentials
    #[poise::command(slash_command)]
    pub async fn pyrobot(
        ctx: poise::Context<'_, PyroData, Error>,
        #[description = "Your Pterodactyl client API key"] api_key: String,
        #[description = "Your panel URL (e.g., https://panel.example.com)"] panel_url: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;

        let data = ctx.data();
        let outcome = configure_credentials(
            &data.database,
            &data.http,
            &ctx.author().id.to_string(),
            &api_key,
            &panel_url,
        )
        .await
        .map(|saved| CreateReply::default().embed(embeds::credentials_saved(&saved, &api_key)));

        reply::respond(ctx, outcome, Surface::CredentialSetup).await
    }
}

// Re-export all commands
pub use inner::*;
