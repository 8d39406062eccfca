//! PaggerBot - triggers one bot-wide webhook and lets anyone change its target.

/// `/webhook` and `/ping`
pub mod commands;

use crate::{
    bot::framework::{on_error, register_commands},
    core::webhook::WebhookStore,
    errors::Error,
};
use tracing::info;

/// Shared data available to all PaggerBot commands.
pub struct PaggerData {
    /// The persisted webhook target
    pub webhook: WebhookStore,
    /// HTTP pool used for webhook triggers
    pub http: reqwest::Client,
}

impl PaggerData {
    /// Creates a new `PaggerData` from an opened store and an HTTP client.
    #[must_use]
    pub const fn new(webhook: WebhookStore, http: reqwest::Client) -> Self {
        Self { webhook, http }
    }
}

/// Builds the poise framework for PaggerBot. `data` is handed to the commands once
/// the gateway reports ready and registration succeeded.
#[must_use]
pub fn framework(data: PaggerData, dev_guild_id: Option<u64>) -> poise::Framework<PaggerData, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::webhook(), commands::ping()],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("📡 Bot is ready and listening for commands!");
                register_commands(ctx, &framework.options().commands, dev_guild_id).await?;
                Ok(data)
            })
        })
        .build()
}
