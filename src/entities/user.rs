//! User credential entity - Stores one panel API key and panel URL per Discord user.
//!
//! The Discord user id is the primary key, so a user can only ever have a single
//! credential row. Saving again overwrites the row instead of appending.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User credential database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Discord user id, assigned by Discord and treated as an opaque key
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Panel client API key (bearer token)
    pub api_key: String,
    /// Panel base URL without a trailing slash
    pub panel_url: String,
    /// When the credentials were first saved
    pub created_at: DateTimeUtc,
    /// When the credentials were last overwritten
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between users and their saved servers
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many saved servers
    #[sea_orm(has_many = "super::server::Entity")]
    Servers,
}

impl Related<super::server::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Servers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
