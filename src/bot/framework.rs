//! Plumbing shared by both bots: the top-level error guard, command registration
//! and the gateway client lifecycle.

use crate::errors::{Error, GENERIC_FAILURE_MESSAGE, Result};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Last-resort guard. Whatever a handler did not classify is logged with full detail
/// and answered with one generic ephemeral reply.
pub async fn on_error<U>(error: poise::FrameworkError<'_, U, Error>)
where
    U: Send + Sync + 'static,
{
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            #[allow(clippy::panic)] // no shared data means no command can ever run
            {
                panic!("Failed to start bot: {error:?}");
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Error in command `{}`: {:?}",
                ctx.command().qualified_name,
                error
            );
            let reply = poise::CreateReply::default()
                .content(GENERIC_FAILURE_MESSAGE)
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Registers `commands` in the development guild when one is configured, globally
/// otherwise. Global registration can take up to an hour to show up in clients.
pub async fn register_commands<U>(
    ctx: &serenity::Context,
    commands: &[poise::Command<U, Error>],
    dev_guild_id: Option<u64>,
) -> Result<()> {
    if let Some(guild_id) = dev_guild_id {
        info!("Registering {} commands in guild {}", commands.len(), guild_id);
        poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(guild_id))
            .await?;
    } else {
        info!("Registering {} commands globally...", commands.len());
        poise::builtins::register_globally(ctx, commands).await?;
    }
    Ok(())
}

/// Connects to the gateway and runs until a termination signal arrives.
///
/// Returns once every shard has been shut down, so the caller can release its own
/// resources (the database) before the process exits.
pub async fn run_client<U>(token: &str, framework: poise::Framework<U, Error>) -> Result<()>
where
    U: Send + Sync + 'static,
{
    let intents = serenity::GatewayIntents::GUILDS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
