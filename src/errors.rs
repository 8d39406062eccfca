//! Unified error type for both bots.
//!
//! The first group of variants is the user-facing taxonomy every command handler
//! classifies into. The remaining variants are infrastructure failures that only
//! ever reach the framework's top-level guard.

use reqwest::StatusCode;
use thiserror::Error;

/// Where a classified failure is being reported. Credential setup words the same
/// categories differently from the regular panel commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// `/pyrobot` credential verification
    CredentialSetup,
    /// Every other command
    Command,
}

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed user input, rejected before any side effect
    #[error("Invalid input: {message}")]
    Validation {
        /// Human-readable explanation shown to the user
        message: String,
    },

    /// The invoking user has no stored panel credentials
    #[error("No panel credentials configured for this user")]
    NotConfigured,

    /// Downstream answered 401 or 403
    #[error("Authentication failed (HTTP {status})")]
    AuthFailure {
        /// The status code returned by the downstream API
        status: u16,
    },

    /// Downstream answered 404
    #[error("Resource not found")]
    NotFound,

    /// Any other non-2xx response or a transport failure
    #[error("{message}")]
    Upstream {
        /// HTTP status when the server answered at all
        status: Option<u16>,
        /// Status text or transport error description
        message: String,
        /// Set when the host could not be reached (DNS failure, refused connection)
        unreachable: bool,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Failed to read stored settings: {0}")]
    SettingsDecode(#[from] toml::de::Error),

    #[error("Failed to write stored settings: {0}")]
    SettingsEncode(#[from] toml::ser::Error),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if let Some(status) = value.status() {
            return Self::from_status(status);
        }
        let message = if value.is_timeout() {
            "Request timed out".to_string()
        } else if value.is_connect() {
            "Could not connect to host".to_string()
        } else {
            value.to_string()
        };
        Self::Upstream {
            status: None,
            message,
            unreachable: value.is_connect(),
        }
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classifies a non-success HTTP status into the user-facing taxonomy.
    ///
    /// 401 and 403 are authentication failures, 404 is not-found, and everything
    /// else keeps its numeric status and canonical reason phrase.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            code @ (401 | 403) => Self::AuthFailure { status: code },
            404 => Self::NotFound,
            code => Self::Upstream {
                status: Some(code),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
                unreachable: false,
            },
        }
    }

    /// Whether this error belongs to the classified, user-facing taxonomy.
    ///
    /// Anything else is an internal error: it is logged and answered generically
    /// by the top-level guard.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotConfigured
                | Self::AuthFailure { .. }
                | Self::NotFound
                | Self::Upstream { .. }
        )
    }

    /// The single reply text shown to the invoking user for a classified failure.
    #[must_use]
    pub fn user_message(&self, surface: Surface) -> String {
        match (self, surface) {
            (Self::Validation { message }, _) => format!("❌ {message}"),
            (Self::NotConfigured, _) => NOT_CONFIGURED_MESSAGE.to_string(),
            (Self::AuthFailure { .. }, Surface::CredentialSetup) => {
                "❌ Invalid API key. Please check your credentials and try again.".to_string()
            }
            (Self::AuthFailure { .. }, Surface::Command) => {
                "❌ Authentication failed. Please check your API key using `/pyrobot`."
                    .to_string()
            }
            (Self::NotFound, Surface::CredentialSetup) => {
                "❌ Invalid panel URL. Please verify the URL is correct.".to_string()
            }
            (Self::NotFound, Surface::Command) => {
                "❌ Resource not found. Please check your input.".to_string()
            }
            (
                Self::Upstream {
                    unreachable: true, ..
                },
                Surface::CredentialSetup,
            ) => "❌ Could not connect to the panel. Please verify the URL is correct and accessible."
                .to_string(),
            (
                Self::Upstream {
                    status: Some(code),
                    message,
                    ..
                },
                _,
            ) => format!("❌ API Error ({code}): {message}"),
            (Self::Upstream { message, .. }, _) => format!("❌ Error: {message}"),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Reply for panel commands invoked before `/pyrobot` was run.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "❌ You need to set up your API key first! Use `/pyrobot <api_key> <panel_url>` to configure.";

/// Reply sent by the top-level guard for internal errors.
pub const GENERIC_FAILURE_MESSAGE: &str = "There was an error while executing this command!";

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_and_forbidden_are_auth_failures() {
        assert!(matches!(
            Error::from_status(StatusCode::UNAUTHORIZED),
            Error::AuthFailure { status: 401 }
        ));
        assert!(matches!(
            Error::from_status(StatusCode::FORBIDDEN),
            Error::AuthFailure { status: 403 }
        ));
    }

    #[test]
    fn test_not_found_classification() {
        let err = Error::from_status(StatusCode::NOT_FOUND);
        assert!(matches!(err, Error::NotFound));
        assert_eq!(
            err.user_message(Surface::Command),
            "❌ Resource not found. Please check your input."
        );
        assert_eq!(
            err.user_message(Surface::CredentialSetup),
            "❌ Invalid panel URL. Please verify the URL is correct."
        );
    }

    #[test]
    fn test_other_statuses_keep_code_and_reason() {
        let err = Error::from_status(StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.user_message(Surface::Command),
            "❌ API Error (502): Bad Gateway"
        );
    }

    #[test]
    fn test_transport_failure_messages() {
        let unreachable = Error::Upstream {
            status: None,
            message: "Could not connect to host".to_string(),
            unreachable: true,
        };
        assert_eq!(
            unreachable.user_message(Surface::Command),
            "❌ Error: Could not connect to host"
        );
        assert!(
            unreachable
                .user_message(Surface::CredentialSetup)
                .starts_with("❌ Could not connect to the panel.")
        );
    }

    #[test]
    fn test_internal_errors_are_not_user_facing() {
        let err = Error::Config {
            message: "missing".to_string(),
        };
        assert!(!err.is_user_facing());
        assert_eq!(
            err.user_message(Surface::Command),
            GENERIC_FAILURE_MESSAGE
        );
        assert!(Error::NotConfigured.is_user_facing());
        assert!(Error::validation("bad").is_user_facing());
    }
}
