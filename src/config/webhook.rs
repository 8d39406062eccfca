//! Location of PaggerBot's persisted webhook record.

use std::path::PathBuf;

const DEFAULT_WEBHOOK_CONFIG_PATH: &str = "data/webhook.toml";

/// Gets the webhook record path from `WEBHOOK_CONFIG_PATH`, falling back to
/// `data/webhook.toml`.
#[must_use]
pub fn get_webhook_config_path() -> PathBuf {
    std::env::var("WEBHOOK_CONFIG_PATH")
        .map_or_else(|_| PathBuf::from(DEFAULT_WEBHOOK_CONFIG_PATH), PathBuf::from)
}
