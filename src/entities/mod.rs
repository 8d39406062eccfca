//! Entity module - Contains the SeaORM entity definitions for PyroBot's database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod server;
pub mod user;

// Re-export specific types to avoid conflicts
pub use server::{Column as ServerColumn, Entity as Server, Model as ServerModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
