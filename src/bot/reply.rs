//! Reply helpers that enforce one reply per invocation.
//!
//! Handlers build their reply as a `Result<CreateReply>` and hand it to [`respond`].
//! Classified failures become that single reply; anything else is returned to the
//! framework so the top-level guard answers instead.

use crate::errors::{Error, Result, Surface};
use tracing::warn;

/// Sends an ephemeral plain-text reply.
pub async fn ephemeral<U>(ctx: poise::Context<'_, U, Error>, content: impl Into<String>) -> Result<()>
where
    U: Send + Sync + 'static,
{
    ctx.send(poise::CreateReply::default().content(content).ephemeral(true))
        .await?;
    Ok(())
}

/// Answers a classified failure with its user-facing message.
///
/// Internal errors are handed back untouched for the top-level guard.
pub async fn failure<U>(ctx: poise::Context<'_, U, Error>, error: Error, surface: Surface) -> Result<()>
where
    U: Send + Sync + 'static,
{
    if !error.is_user_facing() {
        return Err(error);
    }
    warn!(
        "Command `{}` failed for user {}: {}",
        ctx.command().qualified_name,
        ctx.author().id,
        error
    );
    ephemeral(ctx, error.user_message(surface)).await
}

/// Sends `outcome` as the one ephemeral reply of this invocation.
pub async fn respond<U>(
    ctx: poise::Context<'_, U, Error>,
    outcome: Result<poise::CreateReply>,
    surface: Surface,
) -> Result<()>
where
    U: Send + Sync + 'static,
{
    match outcome {
        Ok(reply) => {
            ctx.send(reply.ephemeral(true)).await?;
            Ok(())
        }
        Err(error) => failure(ctx, error, surface).await,
    }
}
