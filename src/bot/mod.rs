//! Bot layer - Discord-specific wiring shared by both bots, plus each bot's commands.

/// Error guard, command registration and gateway lifecycle
pub mod framework;
/// PaggerBot: webhook trigger commands
pub mod pagger;
/// PyroBot: per-user Pterodactyl panel commands
pub mod pyro;
/// Single-reply helpers
pub mod reply;
