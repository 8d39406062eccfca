//! PaggerBot commands - manage and trigger the configured webhook.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{pagger::PaggerData, reply},
        core::webhook as hook,
        errors::{Error, Result, Surface},
    };
    use tracing::error;

    /// Manage and trigger webhooks
    #[poise::command(
        slash_command,
        subcommands("trigger", "set_hostname", "set_path", "show"),
        subcommand_required
    )]
    pub async fn webhook(_ctx: poise::Context<'_, PaggerData, Error>) -> Result<()> {
        Ok(())
    }

    /// Send a GET request to the configured webhook
    #[poise::command(slash_command)]
    pub async fn trigger(ctx: poise::Context<'_, PaggerData, Error>) -> Result<()> {
        ctx.defer().await?;

        let data = ctx.data();
        let url = data.webhook.get_config().await?.url();
        let message = match hook::trigger(&data.http, &url).await {
            Ok(response) => hook::format_trigger_success(&url, &response),
            Err(e) => {
                error!("Webhook error: {}", e);
                hook::format_trigger_failure(&url, &e)
            }
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Set the webhook hostname
    #[poise::command(slash_command, rename = "set-hostname")]
    pub async fn set_hostname(
        ctx: poise::Context<'_, PaggerData, Error>,
        #[description = "The hostname (e.g., example.com or api.example.com)"] hostname: String,
    ) -> Result<()> {
        let clean_hostname = hook::strip_scheme(hostname.trim());

        match ctx.data().webhook.set_hostname(clean_hostname).await {
            Ok(config) => {
                reply::ephemeral(
                    ctx,
                    format!(
                        "✅ Hostname set to: `{}`\nFull URL: `{}`",
                        config.hostname,
                        config.url()
                    ),
                )
                .await
            }
            Err(e) => reply::failure(ctx, e, Surface::Command).await,
        }
    }

    /// Set the webhook path
    #[poise::command(slash_command, rename = "set-path")]
    pub async fn set_path(
        ctx: poise::Context<'_, PaggerData, Error>,
        #[description = "The path (e.g., /webhook or /api/v1/hook)"] path: String,
    ) -> Result<()> {
        let config = ctx.data().webhook.set_path(path.trim()).await?;
        reply::ephemeral(
            ctx,
            format!(
                "✅ Path set to: `{}`\nFull URL: `{}`",
                config.path,
                config.url()
            ),
        )
        .await
    }

    /// Show the current webhook configuration
    #[poise::command(slash_command)]
    pub async fn show(ctx: poise::Context<'_, PaggerData, Error>) -> Result<()> {
        let config = ctx.data().webhook.get_config().await?;
        reply::ephemeral(ctx, hook::format_show(&config)).await
    }

    /// Check that the bot is responsive
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, PaggerData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
