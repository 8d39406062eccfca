//! Panel credential storage - one API key and panel URL per Discord user.
//!
//! Every read goes straight to the database; nothing is cached. Writes are single
//! upsert statements, so two saves for the same user can never produce two rows.

use crate::{
    entities::{User, user},
    errors::Result,
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, info, instrument};

/// Saves a user's panel credentials, overwriting any existing row for `user_id`.
///
/// Runs as one `INSERT ... ON CONFLICT(user_id) DO UPDATE` statement. On conflict the
/// API key, panel URL and `updated_at` are replaced and `created_at` is kept.
#[instrument(skip(db, api_key))]
pub async fn save_user(
    db: &DatabaseConnection,
    user_id: &str,
    api_key: &str,
    panel_url: &str,
) -> Result<()> {
    let now = chrono::Utc::now();
    let credential = user::ActiveModel {
        user_id: Set(user_id.to_string()),
        api_key: Set(api_key.to_string()),
        panel_url: Set(panel_url.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    User::insert(credential)
        .on_conflict(
            OnConflict::column(user::Column::UserId)
                .update_columns([
                    user::Column::ApiKey,
                    user::Column::PanelUrl,
                    user::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    info!("Saved panel credentials for user {}", user_id);
    Ok(())
}

/// Looks up a user's panel credentials.
///
/// `Ok(None)` means the user has not run the setup command yet, which callers must
/// treat as its own state rather than an error.
pub async fn get_user(db: &DatabaseConnection, user_id: &str) -> Result<Option<user::Model>> {
    User::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes a user's credentials (and, through the cascade, their saved servers).
/// Deleting a user that was never saved is a no-op.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, user_id: &str) -> Result<()> {
    let result = User::delete_by_id(user_id.to_string()).exec(db).await?;
    debug!(
        "Deleted {} credential row(s) for user {}",
        result.rows_affected, user_id
    );
    Ok(())
}
