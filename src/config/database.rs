//! Database configuration module for PyroBot.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.
//! Creation is idempotent and runs on every start.

use crate::entities::{Server, User, server};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/pyrobot.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Opens the database at `database_url` and makes sure every table exists.
///
/// For file-backed `SQLite` URLs the parent directory is created first, so a fresh
/// checkout can start without any manual setup.
#[instrument]
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_parent_dir(database_url) {
        debug!("Ensuring database directory {:?} exists", parent);
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::connect(database_url).await?;
    create_tables(&db).await?;
    info!("Database ready at {}", database_url);
    Ok(db)
}

/// Creates the `users` and `servers` tables plus the unique `(user_id, server_id)`
/// index, skipping anything that already exists.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut users_table = schema.create_table_from_entity(User);
    let mut servers_table = schema.create_table_from_entity(Server);
    users_table.if_not_exists();
    servers_table.if_not_exists();

    let servers_unique = Index::create()
        .name("idx_servers_user_server")
        .table(Server)
        .col(server::Column::UserId)
        .col(server::Column::ServerId)
        .unique()
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&users_table)).await?;
    db.execute(builder.build(&servers_table)).await?;
    db.execute(builder.build(&servers_unique)).await?;

    Ok(())
}

/// Directory part of a `sqlite://path/to/file?opts` URL, if it has one.
fn sqlite_parent_dir(database_url: &str) -> Option<&std::path::Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    std::path::Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ServerModel, UserModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<ServerModel> = Server::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/pyrobot.sqlite?mode=rwc"),
            Some(std::path::Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite://pyrobot.sqlite"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
    }
}
