//! Credential setup and the credential gate in front of every panel command.
//!
//! Setup validates the panel URL, verifies the key against the live panel and only
//! then persists it. The gate turns a missing credential row into
//! [`Error::NotConfigured`] before any network call is made.

use crate::{
    core::{credentials, panel::PanelClient},
    errors::{Error, Result},
};
use reqwest::Client;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};
use url::Url;

/// Credentials that passed verification and were saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCredentials {
    /// Normalized panel URL as stored
    pub panel_url: String,
    /// Panel username the key belongs to
    pub username: String,
}

/// Strips one trailing `/` and checks that the rest is an absolute http(s) URL.
pub fn normalize_panel_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let panel_url = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let invalid =
        || Error::validation("Invalid panel URL. Please provide a valid URL (e.g., https://panel.example.com)");
    let parsed = Url::parse(panel_url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }

    Ok(panel_url.to_string())
}

/// The key to delete, or a validation error when none (or only whitespace) was given.
///
/// Checked before the credential gate, so a bad delete request never reaches the panel.
pub fn require_key_id(key_id: Option<String>) -> Result<String> {
    match key_id {
        Some(key_id) if !key_id.trim().is_empty() => Ok(key_id.trim().to_string()),
        _ => Err(Error::validation(
            "Please provide a key_id to delete. Use `/pterodactyl account api-key list` to see your keys.",
        )),
    }
}

/// Validates, verifies and saves a user's panel credentials.
///
/// Nothing is written unless the panel's account endpoint accepted the key; a failed
/// verification leaves any previously saved credentials untouched.
#[instrument(skip(db, http, api_key))]
pub async fn configure_credentials(
    db: &DatabaseConnection,
    http: &Client,
    user_id: &str,
    api_key: &str,
    raw_panel_url: &str,
) -> Result<SavedCredentials> {
    let panel_url = normalize_panel_url(raw_panel_url)?;
    if api_key.trim().is_empty() {
        return Err(Error::validation("API key cannot be empty."));
    }

    let panel = PanelClient::new(http.clone(), &panel_url, api_key);
    let account = panel.account_details().await.inspect_err(|e| {
        warn!("Credential verification for user {} failed: {}", user_id, e);
    })?;

    credentials::save_user(db, user_id, api_key, &panel_url).await?;
    info!(
        "User {} linked panel account '{}' at {}",
        user_id, account.username, panel_url
    );

    Ok(SavedCredentials {
        panel_url,
        username: account.username,
    })
}

/// Builds a panel client from the invoking user's stored credentials.
///
/// Returns [`Error::NotConfigured`] when the user has none.
pub async fn panel_for_user(
    db: &DatabaseConnection,
    http: &Client,
    user_id: &str,
) -> Result<PanelClient> {
    let credential = credentials::get_user(db, user_id)
        .await?
        .ok_or(Error::NotConfigured)?;
    Ok(PanelClient::new(
        http.clone(),
        &credential.panel_url,
        &credential.api_key,
    ))
}
