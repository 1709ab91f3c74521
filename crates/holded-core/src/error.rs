//! Error types for Holded API operations.
//!
//! All remote failures are classified in exactly one place, the transport.
//! Resource clients and the duplication engine propagate these errors
//! unchanged, so a failure always carries the original status code and raw
//! response body for diagnostics.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Main error type for Holded gateway operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid or missing configuration; raised before any network attempt
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid or expired API key (HTTP 401)
    #[error("Authentication failed: {message}")]
    Auth {
        /// Human-readable message
        message: String,
        /// Raw response body, if any
        body: Option<Value>,
    },

    /// Addressed resource does not exist (HTTP 404)
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable message
        message: String,
        /// Raw response body, if any
        body: Option<Value>,
    },

    /// Rate limit still exceeded after all retries (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Human-readable message
        message: String,
        /// Last-seen `Retry-After` hint in whole seconds, if the server sent one
        retry_after_secs: Option<u64>,
        /// Raw response body, if any
        body: Option<Value>,
    },

    /// Any other non-success status
    #[error("Holded API error: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Raw response body, if any
        body: Option<Value>,
    },

    /// Locally detected misuse (e.g. an unknown document type); always
    /// synchronous and side-effect free
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Response body could not be decoded into the expected type
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Specialized result type for Holded gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// JSON error envelope emitted by the CLI on standard error.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// HTTP status code, when the failure came from the remote API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Raw remote response body, preserved verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl Error {
    /// Returns the error code for this error kind.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Auth { .. } => "AUTH_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::RateLimit { .. } => "RATE_LIMIT",
            Self::Api { .. } => "API_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Http(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Parse(_) => "PARSE_ERROR",
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw remote response body, if this error carries one.
    #[must_use]
    pub const fn response_body(&self) -> Option<&Value> {
        match self {
            Self::Auth { body, .. }
            | Self::NotFound { body, .. }
            | Self::RateLimit { body, .. }
            | Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns the `Retry-After` hint carried by a rate-limit error.
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimit {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }

    /// Converts the error into the CLI error envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.error_code().to_string(),
            message: self.to_string(),
            status_code: self.status_code(),
            response: self.response_body().cloned(),
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid URL: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Config("x".into()).error_code(), "CONFIG_ERROR");
        assert_eq!(
            Error::Auth {
                message: "x".into(),
                body: None
            }
            .error_code(),
            "AUTH_ERROR"
        );
        assert_eq!(
            Error::NotFound {
                message: "x".into(),
                body: None
            }
            .error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            Error::RateLimit {
                message: "x".into(),
                retry_after_secs: None,
                body: None
            }
            .error_code(),
            "RATE_LIMIT"
        );
        assert_eq!(
            Error::Api {
                status: 500,
                message: "x".into(),
                body: None
            }
            .error_code(),
            "API_ERROR"
        );
        assert_eq!(Error::InvalidInput("x".into()).error_code(), "INVALID_INPUT");
        assert_eq!(Error::Http("x".into()).error_code(), "HTTP_ERROR");
        assert_eq!(Error::Timeout("x".into()).error_code(), "TIMEOUT");
        assert_eq!(Error::Parse("x".into()).error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::Auth {
                message: "x".into(),
                body: None
            }
            .status_code(),
            Some(401)
        );
        assert_eq!(
            Error::NotFound {
                message: "x".into(),
                body: None
            }
            .status_code(),
            Some(404)
        );
        assert_eq!(
            Error::RateLimit {
                message: "x".into(),
                retry_after_secs: Some(3),
                body: None
            }
            .status_code(),
            Some(429)
        );
        assert_eq!(
            Error::Api {
                status: 503,
                message: "x".into(),
                body: None
            }
            .status_code(),
            Some(503)
        );
        assert_eq!(Error::Config("x".into()).status_code(), None);
        assert_eq!(Error::InvalidInput("x".into()).status_code(), None);
    }

    #[test]
    fn test_response_body_preserved() {
        let body = json!({"info": "upstream detail"});
        let err = Error::Api {
            status: 422,
            message: "422 Unprocessable Entity".into(),
            body: Some(body.clone()),
        };
        assert_eq!(err.response_body(), Some(&body));
    }

    #[test]
    fn test_retry_after_hint() {
        let err = Error::RateLimit {
            message: "Rate limit exceeded".into(),
            retry_after_secs: Some(7),
            body: None,
        };
        assert_eq!(err.retry_after_secs(), Some(7));
        assert_eq!(Error::Config("x".into()).retry_after_secs(), None);
    }

    #[test]
    fn test_envelope_serialization() {
        let err = Error::Api {
            status: 500,
            message: "500 Internal Server Error".into(),
            body: Some(json!({"err": "boom"})),
        };
        let json = serde_json::to_value(err.to_envelope()).unwrap();
        assert_eq!(json["error"], "API_ERROR");
        assert_eq!(json["statusCode"], 500);
        assert_eq!(json["response"]["err"], "boom");
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let err = Error::Config("no API key".into());
        let json = serde_json::to_string(&err.to_envelope()).unwrap();
        assert!(!json.contains("statusCode"));
        assert!(!json.contains("response"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<Value>("{oops").unwrap_err();
        let mapped: Error = err.into();
        assert!(matches!(mapped, Error::Parse(_)));
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let mapped: Error = err.into();
        assert!(matches!(mapped, Error::Config(_)));
    }
}
