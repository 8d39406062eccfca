//! Webhook target for PaggerBot - one bot-wide hostname and path.
//!
//! The target is a single record stored as a TOML file. It is created with defaults
//! on first start and only ever modified in place. Every read goes back to the file.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info, instrument};

/// Hostname used until someone runs `/webhook set-hostname`.
pub const DEFAULT_HOSTNAME: &str = "example.com";
/// Path used until someone runs `/webhook set-path`.
pub const DEFAULT_PATH: &str = "/webhook";
/// Client-side timeout for a webhook trigger.
pub const TRIGGER_TIMEOUT: Duration = Duration::from_secs(5);

/// The persisted webhook target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Host without scheme, e.g. `api.example.com`
    pub hostname: String,
    /// Path that always starts with `/`
    pub path: String,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            path: DEFAULT_PATH.to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl WebhookConfig {
    /// Full URL a trigger is sent to. Always HTTPS.
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://{}{}", self.hostname, self.path)
    }
}

/// Removes a leading `http://` or `https://` from a user-supplied hostname.
#[must_use]
pub fn strip_scheme(hostname: &str) -> &str {
    hostname
        .strip_prefix("https://")
        .or_else(|| hostname.strip_prefix("http://"))
        .unwrap_or(hostname)
}

/// Returns `path` unchanged if it starts with `/`, otherwise with `/` prepended.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// File-backed store for the [`WebhookConfig`] record.
///
/// Read-modify-write cycles are serialized in-process so concurrent `set-hostname`
/// and `set-path` calls never drop each other's field. Two writes to the same field
/// are still last-writer-wins.
#[derive(Debug)]
pub struct WebhookStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WebhookStore {
    /// Opens the record at `path`, creating it (and its directory) with the defaults
    /// if it does not exist yet.
    #[instrument]
    pub async fn open(path: &Path) -> Result<Self> {
        let store = Self {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        };

        if fs::try_exists(path).await? {
            // Fail at startup rather than on the first command if the file is unreadable
            store.get_config().await?;
            debug!("Using existing webhook record at {:?}", path);
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            store.write(&WebhookConfig::default()).await?;
            info!("Created webhook record with defaults at {:?}", path);
        }

        Ok(store)
    }

    /// Reads the current record from disk.
    pub async fn get_config(&self) -> Result<WebhookConfig> {
        let contents = fs::read_to_string(&self.path).await.map_err(|e| Error::Config {
            message: format!("Failed to read webhook record {:?}: {e}", self.path),
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Overwrites the hostname. The caller strips any scheme; empty values are rejected.
    #[instrument(skip(self))]
    pub async fn set_hostname(&self, hostname: &str) -> Result<WebhookConfig> {
        if hostname.trim().is_empty() {
            return Err(Error::validation("Hostname cannot be empty."));
        }
        self.update(|config| config.hostname = hostname.to_string())
            .await
    }

    /// Overwrites the path, adding a leading `/` when it is missing.
    #[instrument(skip(self))]
    pub async fn set_path(&self, path: &str) -> Result<WebhookConfig> {
        let path = normalize_path(path);
        self.update(|config| config.path = path).await
    }

    async fn update(&self, apply: impl FnOnce(&mut WebhookConfig)) -> Result<WebhookConfig> {
        let _guard = self.write_lock.lock().await;
        let mut config = self.get_config().await?;
        apply(&mut config);
        config.updated_at = Utc::now();
        self.write(&config).await?;
        Ok(config)
    }

    /// Writes through a temporary sibling file and renames it into place, so a crash
    /// mid-write never leaves a truncated record behind.
    async fn write(&self, config: &WebhookConfig) -> Result<()> {
        let serialized = toml::to_string_pretty(config)?;
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, serialized).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

/// What the webhook target answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerResponse {
    /// Numeric HTTP status
    pub status: u16,
    /// Standard reason phrase for the status code. The phrase the target sent on the
    /// wire is not exposed by the HTTP client and is not reported.
    pub status_text: String,
}

/// Sends a bare GET to `url`, once, with [`TRIGGER_TIMEOUT`].
///
/// A non-2xx answer is returned as an error, classified like any other HTTP failure.
#[instrument(skip(client))]
pub async fn trigger(client: &Client, url: &str) -> Result<TriggerResponse> {
    let response = client.get(url).timeout(TRIGGER_TIMEOUT).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::from_status(status));
    }
    Ok(TriggerResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    })
}

/// Reply for a successful trigger.
#[must_use]
pub fn format_trigger_success(url: &str, response: &TriggerResponse) -> String {
    format!(
        "✅ Webhook triggered successfully!\n```URL: {url}\nStatus: {}\nStatus Text: {}```",
        response.status, response.status_text
    )
}

/// Reply for a failed trigger. Uses the bare error description, not the panel wording.
#[must_use]
pub fn format_trigger_failure(url: &str, error: &Error) -> String {
    let reason = match error {
        Error::AuthFailure { status } => format!("Request failed with status code {status}"),
        Error::NotFound => "Request failed with status code 404".to_string(),
        Error::Upstream {
            status: Some(code),
            ..
        } => format!("Request failed with status code {code}"),
        other => other.to_string(),
    };
    format!("❌ Failed to trigger webhook: {reason}\nURL: {url}")
}

/// Reply for `/webhook show`.
#[must_use]
pub fn format_show(config: &WebhookConfig) -> String {
    format!(
        "📋 Current webhook configuration:\n```Hostname: {}\nPath: {}\nFull URL: {}```",
        config.hostname,
        config.path,
        config.url()
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use crate::test_utils::spawn_panel;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn open_temp_store() -> (TempDir, WebhookStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = WebhookStore::open(&dir.path().join("data").join("webhook.toml"))
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_fresh_store_has_defaults() {
        let (_dir, store) = open_temp_store().await;
        let config = store.get_config().await.unwrap();
        assert_eq!(config.hostname, "example.com");
        assert_eq!(config.path, "/webhook");
    }

    #[tokio::test]
    async fn test_reopen_keeps_existing_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webhook.toml");
        WebhookStore::open(&path)
            .await
            .unwrap()
            .set_hostname("hooks.example.org")
            .await
            .unwrap();

        let reopened = WebhookStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_config().await.unwrap().hostname,
            "hooks.example.org"
        );
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webhook.toml");
        std::fs::write(&path, "hostname = ").unwrap();
        assert!(WebhookStore::open(&path).await.is_err());
    }

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("https://api.example.com"), "api.example.com");
        assert_eq!(strip_scheme("http://api.example.com"), "api.example.com");
        assert_eq!(strip_scheme("api.example.com"), "api.example.com");
        // Only one leading scheme is removed
        assert_eq!(strip_scheme("https://http://x"), "http://x");
        assert_eq!(strip_scheme("ftp://x"), "ftp://x");
    }

    #[tokio::test]
    async fn test_set_hostname_stores_scheme_free_value() {
        let (_dir, store) = open_temp_store().await;
        for raw in ["https://api.example.com", "http://api.example.com", "api.example.com"] {
            store.set_hostname(strip_scheme(raw)).await.unwrap();
            assert_eq!(store.get_config().await.unwrap().hostname, "api.example.com");
        }
    }

    #[tokio::test]
    async fn test_set_hostname_rejects_empty() {
        let (_dir, store) = open_temp_store().await;
        let err = store.set_hostname(strip_scheme("https://")).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(store.get_config().await.unwrap().hostname, "example.com");
    }

    #[tokio::test]
    async fn test_set_path_normalizes_leading_slash() {
        let (_dir, store) = open_temp_store().await;

        store.set_path("/api/v1/hook").await.unwrap();
        assert_eq!(store.get_config().await.unwrap().path, "/api/v1/hook");

        store.set_path("api/v1/hook").await.unwrap();
        assert_eq!(store.get_config().await.unwrap().path, "/api/v1/hook");

        store.set_path("").await.unwrap();
        assert_eq!(store.get_config().await.unwrap().path, "/");
    }

    #[tokio::test]
    async fn test_setters_touch_only_their_field() {
        let (_dir, store) = open_temp_store().await;
        let before = store.get_config().await.unwrap();

        store.set_hostname("api.example.com").await.unwrap();
        store.set_path("hook").await.unwrap();

        let after = store.get_config().await.unwrap();
        assert_eq!(after.url(), "https://api.example.com/hook");
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_setters_keep_both_fields() {
        let (_dir, store) = open_temp_store().await;
        let store = Arc::new(store);

        for round in 0..50 {
            let hostname = format!("h{round}.example.com");
            let path = format!("p{round}");

            let hostname_store = Arc::clone(&store);
            let hostname_task = {
                let hostname = hostname.clone();
                tokio::spawn(async move { hostname_store.set_hostname(&hostname).await })
            };
            let path_store = Arc::clone(&store);
            let path_task = tokio::spawn(async move { path_store.set_path(&path).await });

            hostname_task.await.unwrap().unwrap();
            path_task.await.unwrap().unwrap();

            let config = store.get_config().await.unwrap();
            assert_eq!(config.hostname, hostname);
            assert_eq!(config.path, format!("/p{round}"));
        }
    }

    #[test]
    fn test_url_and_show_format() {
        let config = WebhookConfig {
            hostname: "api.example.com".to_string(),
            path: "/hook".to_string(),
            updated_at: Utc::now(),
        };
        assert_eq!(config.url(), "https://api.example.com/hook");
        assert!(format_show(&config).contains("Full URL: https://api.example.com/hook"));
    }

    async fn spawn_target(status: StatusCode) -> String {
        let app = Router::new().route("/hook", get(move || async move { status }));
        format!("{}/hook", spawn_panel(app).await)
    }

    #[tokio::test]
    async fn test_trigger_surfaces_status_verbatim() {
        let url = spawn_target(StatusCode::ACCEPTED).await;
        let response = trigger(&Client::new(), &url).await.unwrap();
        assert_eq!(response.status, 202);
        assert_eq!(response.status_text, "Accepted");

        let reply = format_trigger_success(&url, &response);
        assert!(reply.contains(&format!("URL: {url}")));
        assert!(reply.contains("Status: 202"));
        assert!(reply.contains("Status Text: Accepted"));
    }

    #[tokio::test]
    async fn test_trigger_non_success_is_failure() {
        let url = spawn_target(StatusCode::INTERNAL_SERVER_ERROR).await;
        let err = trigger(&Client::new(), &url).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream {
                status: Some(500),
                ..
            }
        ));
        assert_eq!(
            format_trigger_failure(&url, &err),
            format!("❌ Failed to trigger webhook: Request failed with status code 500\nURL: {url}")
        );
    }

    #[tokio::test]
    async fn test_trigger_unreachable_host() {
        // Bind and immediately drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = trigger(&Client::new(), &format!("http://{addr}/hook"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream {
                status: None,
                unreachable: true,
                ..
            }
        ));
    }
}
