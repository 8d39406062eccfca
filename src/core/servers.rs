//! Saved server storage - per-user bookmarks of panel servers.
//!
//! Rows are keyed by `(user_id, server_id)`. Saving an existing pair only renames it.
//! A user must have saved credentials before servers can be saved for them.

use crate::{
    entities::{Server, server},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, instrument};

/// Saves a server bookmark for a user, updating the name if the pair already exists.
#[instrument(skip(db))]
pub async fn save_server(
    db: &DatabaseConnection,
    user_id: &str,
    server_id: &str,
    server_name: Option<&str>,
) -> Result<()> {
    let bookmark = server::ActiveModel {
        user_id: Set(user_id.to_string()),
        server_id: Set(server_id.to_string()),
        server_name: Set(server_name.map(str::to_string)),
        ..Default::default()
    };

    Server::insert(bookmark)
        .on_conflict(
            OnConflict::columns([server::Column::UserId, server::Column::ServerId])
                .update_column(server::Column::ServerName)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    debug!("Saved server {} for user {}", server_id, user_id);
    Ok(())
}

/// Lists every saved server for a user, oldest bookmark first.
pub async fn get_user_servers(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<server::Model>> {
    Server::find()
        .filter(server::Column::UserId.eq(user_id))
        .order_by_asc(server::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes one saved server. Missing pairs are ignored.
#[instrument(skip(db))]
pub async fn delete_server(db: &DatabaseConnection, user_id: &str, server_id: &str) -> Result<()> {
    let result = Server::delete_many()
        .filter(server::Column::UserId.eq(user_id))
        .filter(server::Column::ServerId.eq(server_id))
        .exec(db)
        .await?;
    debug!(
        "Deleted {} saved server row(s) for user {}",
        result.rows_affected, user_id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credentials::{delete_user, save_user};
    use crate::test_utils::setup_test_db;

    async fn setup_with_user(user_id: &str) -> Result<DatabaseConnection> {
        let db = setup_test_db().await?;
        save_user(&db, user_id, "key", "https://panel.example.com").await?;
        Ok(db)
    }

    #[tokio::test]
    async fn test_save_and_list_servers() -> Result<()> {
        let db = setup_with_user("123").await?;
        save_server(&db, "123", "a1b2c3d4", Some("Survival")).await?;
        save_server(&db, "123", "e5f6a7b8", None).await?;

        let servers = get_user_servers(&db, "123").await?;
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].server_id, "a1b2c3d4");
        assert_eq!(servers[0].server_name.as_deref(), Some("Survival"));
        assert_eq!(servers[1].server_name, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_server_twice_updates_name() -> Result<()> {
        let db = setup_with_user("123").await?;
        save_server(&db, "123", "a1b2c3d4", Some("Old Name")).await?;
        save_server(&db, "123", "a1b2c3d4", Some("New Name")).await?;

        let servers = get_user_servers(&db, "123").await?;
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].server_name.as_deref(), Some("New Name"));
        Ok(())
    }

    #[tokio::test]
    async fn test_same_server_id_for_different_users() -> Result<()> {
        let db = setup_with_user("alice").await?;
        save_user(&db, "bob", "key", "https://panel.example.com").await?;
        save_server(&db, "alice", "shared01", Some("Alice's")).await?;
        save_server(&db, "bob", "shared01", Some("Bob's")).await?;

        assert_eq!(get_user_servers(&db, "alice").await?.len(), 1);
        assert_eq!(
            get_user_servers(&db, "bob").await?[0].server_name.as_deref(),
            Some("Bob's")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_server() -> Result<()> {
        let db = setup_with_user("123").await?;
        save_server(&db, "123", "a1b2c3d4", None).await?;
        save_server(&db, "123", "e5f6a7b8", None).await?;

        delete_server(&db, "123", "a1b2c3d4").await?;
        delete_server(&db, "123", "never-saved").await?;

        let servers = get_user_servers(&db, "123").await?;
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].server_id, "e5f6a7b8");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_removes_saved_servers() -> Result<()> {
        let db = setup_with_user("123").await?;
        save_server(&db, "123", "a1b2c3d4", None).await?;

        delete_user(&db, "123").await?;

        assert!(get_user_servers(&db, "123").await?.is_empty());
        Ok(())
    }
}
