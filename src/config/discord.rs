//! Discord connection settings loaded from environment variables.
//!
//! The bot token is read right before connecting and never stored in shared state.

use crate::errors::{Error, Result};
use tracing::warn;

/// Reads `DISCORD_BOT_TOKEN` from the environment.
pub fn get_bot_token() -> Result<String> {
    let token = std::env::var("DISCORD_BOT_TOKEN")?;
    if token.trim().is_empty() {
        return Err(Error::Config {
            message: "DISCORD_BOT_TOKEN is set but empty".to_string(),
        });
    }
    Ok(token)
}

/// Reads the optional `DEV_GUILD_ID`.
///
/// When set, commands are registered in that guild only, which Discord applies
/// instantly instead of the up-to-an-hour delay of global registration.
#[must_use]
pub fn get_dev_guild_id() -> Option<u64> {
    parse_guild_id(std::env::var("DEV_GUILD_ID").ok().as_deref())
}

fn parse_guild_id(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u64>() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("Ignoring DEV_GUILD_ID '{}': {}", raw, e);
            None
        }
    }
}
