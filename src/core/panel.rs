//! Pterodactyl client API - the calls PyroBot makes on a user's behalf.
//!
//! Requests go straight to `{panel_url}/api/client/...` with the user's API key as a
//! bearer token. Each call is attempted exactly once. Non-2xx answers are classified
//! by [`Error::from_status`] before they reach a handler.

use crate::errors::{Error, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

/// Upper bound for a single panel request, connect to last byte.
pub const PANEL_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP pool for panel calls. Every request through it gives up after `timeout`, so a
/// stalled panel still yields an [`Error::Upstream`] instead of a missing reply.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// A JSON:API style `{ "attributes": ... }` wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Item<T> {
    /// The resource payload
    pub attributes: T,
}

/// A JSON:API style `{ "data": [...] }` list.
#[derive(Debug, Clone, Deserialize)]
pub struct List<T> {
    /// The resources in the list
    #[serde(default = "Vec::new")]
    pub data: Vec<Item<T>>,
}

/// `GET /api/client/account`
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Panel username
    pub username: String,
    /// Account email
    pub email: String,
    /// Whether the account is a panel administrator
    #[serde(default)]
    pub admin: bool,
    /// Preferred interface language
    #[serde(default)]
    pub language: Option<String>,
    /// Whether two-factor authentication is enabled
    #[serde(default, rename = "2fa", alias = "2fa_enabled")]
    pub two_factor: bool,
}

/// SFTP connection details of a server
#[derive(Debug, Clone, Deserialize)]
pub struct SftpDetails {
    /// SFTP host
    pub ip: String,
    /// SFTP port
    pub port: u16,
}

/// Configured resource limits of a server
#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    /// Memory limit in MB
    pub memory: i64,
    /// Disk limit in MB
    pub disk: i64,
    /// CPU limit in percent
    pub cpu: i64,
}

/// `GET /api/client/servers/{id}` and the entries of `GET /api/client`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDetails {
    /// Short identifier used in every server URL
    pub identifier: String,
    /// Full server UUID
    #[serde(default)]
    pub uuid: String,
    /// Display name
    pub name: String,
    /// Node the server runs on
    #[serde(default)]
    pub node: Option<String>,
    /// SFTP endpoint, when the panel exposes it
    #[serde(default)]
    pub sftp_details: Option<SftpDetails>,
    /// Configured limits, when the panel exposes them
    #[serde(default)]
    pub limits: Option<Limits>,
}

/// Live resource counters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceUsage {
    /// Resident memory in bytes
    #[serde(default)]
    pub memory_bytes: u64,
    /// CPU usage in percent of one core
    #[serde(default)]
    pub cpu_absolute: f64,
    /// Disk usage in bytes
    #[serde(default)]
    pub disk_bytes: u64,
    /// Bytes received since start
    #[serde(default)]
    pub network_rx_bytes: u64,
    /// Bytes sent since start
    #[serde(default)]
    pub network_tx_bytes: u64,
}

/// `GET /api/client/servers/{id}/resources`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerResources {
    /// `running`, `starting`, `stopping` or `offline`
    #[serde(default)]
    pub current_state: Option<String>,
    /// Live counters; absent while the server is offline
    #[serde(default)]
    pub resources: Option<ResourceUsage>,
}

impl ServerResources {
    /// The reported state, `unknown` when the panel left it out.
    #[must_use]
    pub fn state(&self) -> &str {
        self.current_state.as_deref().unwrap_or("unknown")
    }
}

/// An entry of `GET /api/client/account/api-keys`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    /// Key identifier, used for deletion
    pub identifier: String,
    /// Free-form label given at creation
    #[serde(default)]
    pub description: String,
    /// Last time the key authenticated a request
    #[serde(default)]
    pub last_used_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Response of `POST /api/client/account/api-keys`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedApiKey {
    /// The stored key
    pub attributes: ApiKey,
    /// Carries the secret; missing on some panel versions
    #[serde(default)]
    pub meta: Option<CreatedApiKeyMeta>,
}

/// The one-time secret returned on key creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedApiKeyMeta {
    /// Full secret token; the panel never shows it again
    pub secret_token: String,
}

/// An entry of `GET /api/client/servers/{id}/files/list`
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    /// File or directory name
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// `false` for directories
    #[serde(default)]
    pub is_file: bool,
}

/// Host of a server database
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseHost {
    /// Hostname or IP
    pub address: String,
    /// TCP port
    pub port: u16,
}

/// An entry of `GET /api/client/servers/{id}/databases`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDatabase {
    /// Database name
    pub name: String,
    /// Login user
    pub username: String,
    /// Where the database is served
    pub host: DatabaseHost,
}

/// Power actions accepted by `POST /api/client/servers/{id}/power`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSignal {
    /// Boot the server
    Start,
    /// Graceful shutdown
    Stop,
    /// Stop then start
    Restart,
}

#[derive(Serialize)]
struct PowerRequest {
    signal: PowerSignal,
}

#[derive(Serialize)]
struct CommandRequest<'a> {
    command: &'a str,
}

#[derive(Serialize)]
struct CreateApiKeyRequest<'a> {
    description: &'a str,
    allowed_ips: Vec<String>,
}

/// Client for one user's panel, holding their base URL and API key.
#[derive(Clone)]
pub struct PanelClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for PanelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PanelClient {
    /// Creates a client for `base_url` (no trailing slash) sharing the given HTTP pool.
    #[must_use]
    pub fn new(http: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// The panel base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/api/client{endpoint}", self.base_url);
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::from_status(status))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = Self::send(self.request(Method::GET, endpoint)).await?;
        Ok(response.json().await?)
    }

    /// Account details; also the endpoint used to verify new credentials.
    #[instrument]
    pub async fn account_details(&self) -> Result<Account> {
        let item: Item<Account> = self.get_json("/account").await?;
        Ok(item.attributes)
    }

    /// Every server the account can access.
    #[instrument]
    pub async fn list_servers(&self) -> Result<Vec<ServerDetails>> {
        let list: List<ServerDetails> = self.get_json("").await?;
        Ok(list.data.into_iter().map(|item| item.attributes).collect())
    }

    /// One server by identifier.
    #[instrument]
    pub async fn server_details(&self, server_id: &str) -> Result<ServerDetails> {
        let item: Item<ServerDetails> = self.get_json(&format!("/servers/{server_id}")).await?;
        Ok(item.attributes)
    }

    /// Current state and live counters of one server.
    #[instrument]
    pub async fn server_resources(&self, server_id: &str) -> Result<ServerResources> {
        let item: Item<ServerResources> = self
            .get_json(&format!("/servers/{server_id}/resources"))
            .await?;
        Ok(item.attributes)
    }

    /// Sends a power signal. The panel answers 204 with no body.
    #[instrument]
    pub async fn send_power_signal(&self, server_id: &str, signal: PowerSignal) -> Result<()> {
        let request = self
            .request(Method::POST, &format!("/servers/{server_id}/power"))
            .json(&PowerRequest { signal });
        Self::send(request).await?;
        Ok(())
    }

    /// Writes one line to the server console.
    #[instrument]
    pub async fn send_command(&self, server_id: &str, command: &str) -> Result<()> {
        let request = self
            .request(Method::POST, &format!("/servers/{server_id}/command"))
            .json(&CommandRequest { command });
        Self::send(request).await?;
        Ok(())
    }

    /// Every API key on the account.
    #[instrument]
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>> {
        let list: List<ApiKey> = self.get_json("/account/api-keys").await?;
        Ok(list.data.into_iter().map(|item| item.attributes).collect())
    }

    /// Creates a key with no IP restriction. The secret is only in this response.
    #[instrument]
    pub async fn create_api_key(&self, description: &str) -> Result<CreatedApiKey> {
        let request = self
            .request(Method::POST, "/account/api-keys")
            .json(&CreateApiKeyRequest {
                description,
                allowed_ips: Vec::new(),
            });
        let response = Self::send(request).await?;
        Ok(response.json().await?)
    }

    /// Revokes one key by identifier.
    #[instrument]
    pub async fn delete_api_key(&self, identifier: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, &format!("/account/api-keys/{identifier}")))
            .await?;
        Ok(())
    }

    /// Entries of one directory on the server.
    #[instrument]
    pub async fn list_files(&self, server_id: &str, directory: &str) -> Result<Vec<FileEntry>> {
        let request = self
            .request(Method::GET, &format!("/servers/{server_id}/files/list"))
            .query(&[("directory", directory)]);
        let list: List<FileEntry> = Self::send(request).await?.json().await?;
        Ok(list.data.into_iter().map(|item| item.attributes).collect())
    }

    /// Databases attached to the server.
    #[instrument]
    pub async fn list_databases(&self, server_id: &str) -> Result<Vec<ServerDatabase>> {
        let list: List<ServerDatabase> = self
            .get_json(&format!("/servers/{server_id}/databases"))
            .await?;
        Ok(list.data.into_iter().map(|item| item.attributes).collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::spawn_panel;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
    };
    use serde_json::{Value, json};

    fn account_route() -> Router {
        Router::new().route(
            "/api/client/account",
            get(|headers: HeaderMap| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer good_key");
                if authorized {
                    Ok(Json(json!({
                        "object": "user",
                        "attributes": {
                            "username": "steve",
                            "email": "steve@example.com",
                            "admin": false,
                            "language": "en"
                        }
                    })))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_account_details_sends_bearer_token() {
        let base = spawn_panel(account_route()).await;

        let account = PanelClient::new(Client::new(), &base, "good_key")
            .account_details()
            .await
            .unwrap();
        assert_eq!(account.username, "steve");
        assert!(!account.two_factor);

        let err = PanelClient::new(Client::new(), &base, "bad_key")
            .account_details()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AuthFailure { status: 401 }));
    }

    #[tokio::test]
    async fn test_missing_server_is_not_found() {
        let base = spawn_panel(Router::new()).await;
        let err = PanelClient::new(Client::new(), &base, "key")
            .server_details("nope")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn test_power_signal_body() {
        let app = Router::new().route(
            "/api/client/servers/abc123/power",
            post(|Json(body): Json<Value>| async move {
                if body == json!({ "signal": "restart" }) {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            }),
        );
        let base = spawn_panel(app).await;

        PanelClient::new(Client::new(), &base, "key")
            .send_power_signal("abc123", PowerSignal::Restart)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_servers_and_resources() {
        let app = Router::new()
            .route(
                "/api/client",
                get(|| async {
                    Json(json!({
                        "object": "list",
                        "data": [
                            { "object": "server", "attributes": { "identifier": "abc123", "name": "Survival", "uuid": "abc123-uuid" } },
                            { "object": "server", "attributes": { "identifier": "def456", "name": "Creative" } }
                        ]
                    }))
                }),
            )
            .route(
                "/api/client/servers/abc123/resources",
                get(|| async {
                    Json(json!({
                        "object": "stats",
                        "attributes": {
                            "current_state": "running",
                            "resources": { "memory_bytes": 1_048_576, "cpu_absolute": 12.5, "disk_bytes": 0 }
                        }
                    }))
                }),
            );
        let base = spawn_panel(app).await;
        let panel = PanelClient::new(Client::new(), &base, "key");

        let servers = panel.list_servers().await.unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[1].identifier, "def456");
        assert!(servers[1].limits.is_none());

        let usage = panel.server_resources("abc123").await.unwrap();
        assert_eq!(usage.state(), "running");
        assert_eq!(usage.resources.unwrap().memory_bytes, 1_048_576);
    }

    #[tokio::test]
    async fn test_stalled_panel_times_out() {
        let app = Router::new().route(
            "/api/client/account",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                StatusCode::OK
            }),
        );
        let base = spawn_panel(app).await;
        let http = http_client(Duration::from_millis(200)).unwrap();

        let err = PanelClient::new(http, &base, "key")
            .account_details()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream {
                status: None,
                unreachable: false,
                ..
            }
        ));
        assert_eq!(
            err.user_message(crate::errors::Surface::Command),
            "❌ Error: Request timed out"
        );
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_ignored() {
        let base = spawn_panel(account_route()).await;
        let panel = PanelClient::new(Client::new(), &format!("{base}/"), "good_key");
        assert_eq!(panel.base_url(), base);
        panel.account_details().await.unwrap();
    }
}
