/// Database configuration and connection management
pub mod database;

/// Discord connection settings from environment variables
pub mod discord;

/// Location of PaggerBot's persisted webhook record
pub mod webhook;
