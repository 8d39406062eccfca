//! PyroBot - per-user Pterodactyl panel access from Discord.
//!
//! Every user links their own panel with `/pyrobot`; all other commands act with
//! those stored credentials.

/// Embed builders for panel replies
pub mod embeds;
/// `/ping`
pub mod general;
/// `/pterodactyl` command tree
pub mod pterodactyl;
/// `/server` power and status commands
pub mod server;
/// `/pyrobot` credential setup
pub mod setup;

use crate::{
    bot::framework::{on_error, register_commands},
    core::{panel::PanelClient, setup as credential_setup},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::info;

/// Shared data available to all PyroBot commands.
pub struct PyroData {
    /// Database connection for credential and server storage
    pub database: DatabaseConnection,
    /// HTTP pool shared by every panel client
    pub http: reqwest::Client,
}

impl PyroData {
    /// Creates a new `PyroData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, http: reqwest::Client) -> Self {
        Self { database, http }
    }
}

/// Credential gate: a panel client for the invoking user, or
/// [`Error::NotConfigured`].
pub(crate) async fn connect(ctx: poise::Context<'_, PyroData, Error>) -> Result<PanelClient> {
    let data = ctx.data();
    credential_setup::panel_for_user(&data.database, &data.http, &ctx.author().id.to_string())
        .await
}

/// Builds the poise framework for PyroBot.
#[must_use]
pub fn framework(data: PyroData, dev_guild_id: Option<u64>) -> poise::Framework<PyroData, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                setup::pyrobot(),
                server::server(),
                pterodactyl::pterodactyl(),
                general::ping(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Bot is ready and serving {} guilds", ready.guilds.len());
                register_commands(ctx, &framework.options().commands, dev_guild_id).await?;
                Ok(data)
            })
        })
        .build()
}
