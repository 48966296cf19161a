use thiserror::Error;

/// Error `name` the service uses when a list id is unknown.
pub const LIST_DOES_NOT_EXIST: &str = "List_DoesNotExist";

/// Error `name` for rejected list options (e.g. no interest groupings).
pub const LIST_INVALID_OPTION: &str = "List_InvalidOption";

/// Error `name` for a rejected or malformed API key.
pub const INVALID_API_KEY: &str = "Invalid_ApiKey";

/// Top-level error type for the `chimplet-api` crate.
///
/// Covers transport failures, the structured `{status, code, name, error}`
/// envelope the service returns on failure, and payloads that could not be
/// decoded. `chimplet-core` maps these into facade-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the service (HTTP 401 or `Invalid_ApiKey`).
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Structured error from the service envelope.
    #[error("API error {name} ({code}): {message}")]
    Api {
        name: String,
        message: String,
        code: i64,
    },

    /// The request could not be built from the given parameters.
    #[error("Invalid request for {endpoint}: {reason}")]
    InvalidRequest { endpoint: String, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the service reported a missing resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { name, .. } => {
                name.ends_with("_DoesNotExist") || name.ends_with("_NotFound")
            }
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` for `List_InvalidOption` errors.
    pub fn is_invalid_option(&self) -> bool {
        matches!(self, Self::Api { name, .. } if name == LIST_INVALID_OPTION)
    }

    /// Returns `true` if the API key was rejected.
    pub fn is_invalid_api_key(&self) -> bool {
        match self {
            Self::InvalidApiKey { .. } => true,
            Self::Api { name, .. } => name == INVALID_API_KEY,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Extract the numeric service error code, if available.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Extract the service error name (e.g. `List_DoesNotExist`).
    pub fn api_error_name(&self) -> Option<&str> {
        match self {
            Self::Api { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(name: &str, code: i64) -> Error {
        Error::Api {
            name: name.into(),
            message: "boom".into(),
            code,
        }
    }

    #[test]
    fn classifies_service_errors_by_name() {
        assert!(api(LIST_DOES_NOT_EXIST, 200).is_not_found());
        assert!(api("Campaign_DoesNotExist", 300).is_not_found());
        assert!(!api(LIST_INVALID_OPTION, 211).is_not_found());

        assert!(api(LIST_INVALID_OPTION, 211).is_invalid_option());
        assert!(api(INVALID_API_KEY, 104).is_invalid_api_key());
        assert!(
            Error::InvalidApiKey {
                message: "nope".into()
            }
            .is_invalid_api_key()
        );
    }

    #[test]
    fn exposes_code_and_name() {
        let err = api(LIST_INVALID_OPTION, 211);
        assert_eq!(err.api_error_code(), Some(211));
        assert_eq!(err.api_error_name(), Some(LIST_INVALID_OPTION));
        assert_eq!(err.to_string(), "API error List_InvalidOption (211): boom");

        let other = Error::Tls("bad".into());
        assert_eq!(other.api_error_code(), None);
        assert!(!other.is_transient());
    }
}
