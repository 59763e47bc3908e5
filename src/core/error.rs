//! Typed error handling for the proxy
//!
//! Every failure a request can end in is a [`ProxyError`]. Each variant maps
//! to one HTTP status and one stable error code, and renders as the failure
//! envelope:
//!
//! ```json
//! {"success": false, "error": {"code": "NOT_FOUND", "message": "Item not found", "details": {}}}
//! ```
//!
//! # Error Categories
//!
//! - `METHOD_NOT_ALLOWED`: the inbound verb is not GET
//! - `INVALID_PARAMS`: bad `resource`, `limit` or query string (see [`ParamError`])
//! - `NOT_FOUND`: the upstream answered 404 on the primary fetch
//! - `UPSTREAM_ERROR`: any other upstream status >= 400, or an unreadable body
//! - `UPSTREAM_UNAVAILABLE`: the upstream could not be reached at all

use crate::core::response::json_body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for request handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// The inbound request used a verb other than GET
    MethodNotAllowed { method: String },

    /// Query parameters failed validation
    InvalidParams(ParamError),

    /// The upstream reported the requested item does not exist
    NotFound,

    /// The upstream answered with a non-404 error status
    UpstreamError { status: u16 },

    /// Transport-level failure (timeout, connection refused, DNS)
    UpstreamUnavailable { reason: String },

    /// The upstream answered 2xx with a body that is not JSON
    InvalidUpstreamBody { reason: String },
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::MethodNotAllowed { .. } => write!(f, "Only GET allowed"),
            ProxyError::InvalidParams(e) => write!(f, "{}", e),
            ProxyError::NotFound => write!(f, "Item not found"),
            ProxyError::UpstreamError { status } => write!(f, "SWAPI error {}", status),
            ProxyError::UpstreamUnavailable { .. } => write!(f, "SWAPI unavailable"),
            ProxyError::InvalidUpstreamBody { .. } => {
                write!(f, "SWAPI returned an invalid response body")
            }
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::InvalidParams(e) => Some(e),
            _ => None,
        }
    }
}

/// Error payload nested under `error` in the failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details; always an object
    pub details: serde_json::Value,
}

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorResponse,
}

impl ProxyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::InvalidParams(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::InvalidUpstreamBody { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ProxyError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            ProxyError::InvalidParams(_) => "INVALID_PARAMS",
            ProxyError::NotFound => "NOT_FOUND",
            ProxyError::UpstreamError { .. } => "UPSTREAM_ERROR",
            ProxyError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            ProxyError::InvalidUpstreamBody { .. } => "UPSTREAM_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: serde_json::json!({}),
        }
    }

    /// Wrap into the failure envelope
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            success: false,
            error: self.to_response(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        json_body(self.status_code(), &self.to_envelope())
    }
}

impl From<ParamError> for ProxyError {
    fn from(err: ParamError) -> Self {
        ProxyError::InvalidParams(err)
    }
}

// =============================================================================
// Parameter Errors
// =============================================================================

/// Reasons a query parameter was rejected
///
/// All of these surface as `INVALID_PARAMS`; only the message differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// `resource` missing or not in the allowed set
    InvalidResource { allowed: String },

    /// `limit` is not an integer
    LimitNotANumber,

    /// `limit` is an integer outside the accepted range
    LimitOutOfRange { min: usize, max: usize },

    /// The query string itself could not be decoded
    MalformedQuery { reason: String },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::InvalidResource { allowed } => {
                write!(f, "Invalid resource. Use: {}", allowed)
            }
            ParamError::LimitNotANumber => write!(f, "limit must be a number"),
            ParamError::LimitOutOfRange { min, max } => {
                write!(f, "limit must be between {} and {}", min, max)
            }
            ParamError::MalformedQuery { reason } => {
                write!(f, "Malformed query string: {}", reason)
            }
        }
    }
}

impl std::error::Error for ParamError {}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for request handling
pub type ProxyResult<T> = Result<T, ProxyError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ProxyError::MethodNotAllowed {
                method: "POST".to_string()
            }
            .status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ProxyError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ProxyError::UpstreamError { status: 500 }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::UpstreamUnavailable {
                reason: "timed out".to_string()
            }
            .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_upstream_error_message_embeds_status() {
        let err = ProxyError::UpstreamError { status: 429 };
        assert_eq!(err.to_string(), "SWAPI error 429");
        assert_eq!(err.error_code(), "UPSTREAM_ERROR");
    }

    #[test]
    fn test_param_errors_share_code() {
        let errors = [
            ParamError::InvalidResource {
                allowed: "people".to_string(),
            },
            ParamError::LimitNotANumber,
            ParamError::LimitOutOfRange { min: 1, max: 50 },
        ];
        for e in errors {
            let err: ProxyError = e.into();
            assert_eq!(err.error_code(), "INVALID_PARAMS");
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_limit_messages_differ() {
        assert_eq!(ParamError::LimitNotANumber.to_string(), "limit must be a number");
        assert_eq!(
            ParamError::LimitOutOfRange { min: 1, max: 50 }.to_string(),
            "limit must be between 1 and 50"
        );
    }

    #[test]
    fn test_invalid_body_reported_as_upstream_error() {
        let err = ProxyError::InvalidUpstreamBody {
            reason: "expected value".to_string(),
        };
        assert_eq!(err.error_code(), "UPSTREAM_ERROR");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = ProxyError::NotFound.to_envelope();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": {"code": "NOT_FOUND", "message": "Item not found", "details": {}}
            })
        );
    }
}
