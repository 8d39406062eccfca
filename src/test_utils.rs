//! Shared test utilities.
//!
//! Provides an in-memory database with the schema applied and a throwaway local
//! HTTP server that stands in for a panel or webhook target.

use crate::errors::Result;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Serves `app` on an ephemeral localhost port and returns its base URL
/// (`http://127.0.0.1:PORT`, no trailing slash).
///
/// # Panics
/// Panics if no local port can be bound.
#[allow(clippy::unwrap_used)]
pub async fn spawn_panel(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
