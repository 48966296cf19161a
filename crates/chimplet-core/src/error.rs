// ── Core error types ──
//
// Errors surfaced by the facade. These are NOT vendor-specific --
// consumers never see HTTP status codes or envelope parse failures directly.
// The `From<chimplet_api::Error>` impl translates transport-layer errors
// into facade-level variants.

use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Broad classification used for logging and caller-side branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    /// The facade is not ready (no connection, no current list).
    Precondition,
    NotFound,
    InvalidOption,
    /// A domain rule rejected the request (empty segment, unknown name, ...).
    Validation,
    Service,
    /// A caller asked for something that cannot exist.
    Programmer,
    Config,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Preconditions ────────────────────────────────────────────────
    #[error("API client not initialized -- call initialize() with an API key first")]
    NotInitialized,

    #[error("No current list selected")]
    NoCurrentList,

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String, code: Option<i64> },

    #[error("Invalid option: {message}")]
    InvalidOption { message: String, code: Option<i64> },

    #[error("{entity} not found by name: {name}")]
    UnresolvedName { entity: &'static str, name: String },

    // ── Domain validation ────────────────────────────────────────────
    #[error("The segment is empty (0 recipients)")]
    EmptySegment,

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Service errors (wrapped, not exposed raw) ────────────────────
    #[error("Service error {name}: {message}")]
    Service {
        name: String,
        message: String,
        code: Option<i64>,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot reach service: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Programmer errors ────────────────────────────────────────────
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn service(message: impl Into<String>) -> Self {
        Self::Service {
            name: "Facade_Error".into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized | Self::NoCurrentList => ErrorKind::Precondition,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidOption { .. } => ErrorKind::InvalidOption,
            Self::UnresolvedName { .. } | Self::EmptySegment | Self::ValidationFailed { .. } => {
                ErrorKind::Validation
            }
            Self::Service { .. }
            | Self::AuthenticationFailed { .. }
            | Self::ConnectionFailed { .. }
            | Self::Timeout
            | Self::Internal(_) => ErrorKind::Service,
            Self::UnsupportedOperation(_) => ErrorKind::Programmer,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Service-assigned error code, when the failure came from the service.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::NotFound { code, .. }
            | Self::InvalidOption { code, .. }
            | Self::Service { code, .. } => *code,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::UnresolvedName { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<chimplet_api::Error> for CoreError {
    fn from(err: chimplet_api::Error) -> Self {
        if err.is_not_found() {
            return CoreError::NotFound {
                code: err.api_error_code(),
                message: err.to_string(),
            };
        }
        if err.is_invalid_option() {
            return CoreError::InvalidOption {
                code: err.api_error_code(),
                message: err.to_string(),
            };
        }
        if err.is_invalid_api_key() {
            return CoreError::AuthenticationFailed {
                message: err.to_string(),
            };
        }

        match err {
            chimplet_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Service {
                        name: "Transport".into(),
                        message: e.to_string(),
                        code: e.status().map(|s| i64::from(s.as_u16())),
                    }
                }
            }
            chimplet_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            chimplet_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            chimplet_api::Error::Api {
                name,
                message,
                code,
            } => CoreError::Service {
                name,
                message,
                code: Some(code),
            },
            chimplet_api::Error::InvalidRequest { endpoint, reason } => {
                CoreError::Internal(format!("Invalid request for {endpoint}: {reason}"))
            }
            chimplet_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            chimplet_api::Error::InvalidApiKey { message } => {
                CoreError::AuthenticationFailed { message }
            }
        }
    }
}
