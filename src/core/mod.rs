//! Core logic - framework-agnostic storage, panel access and reply formatting.
//!
//! Nothing in here knows about Discord. The `bot` layer calls into these modules and
//! only turns their results into replies.

/// Per-user panel credentials (`users` table)
pub mod credentials;
/// Reply formatting helpers
pub mod format;
/// Pterodactyl client API calls
pub mod panel;
/// Per-user saved servers (`servers` table)
pub mod servers;
/// Credential setup and the credential gate
pub mod setup;
/// PaggerBot's webhook target
pub mod webhook;
