//! Error types for the Paddle client.
//!
//! There are two channels:
//!
//! - [`ConfigError`] and [`PathError`] are caller mistakes detected before any
//!   request is sent.
//! - [`ApiError`] is the classified outcome of a request that reached the
//!   network: HTTP failures, API error payloads, timeouts and connection errors.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Errors raised while resolving or validating a [`Configuration`](crate::Configuration).
///
/// None of the messages contain the API key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No API key was configured.
    #[error("missing API key: set PADDLE_API_KEY or pass a key explicitly")]
    MissingApiKey,

    /// The API key does not have a recognized shape.
    #[error("invalid API key: {reason}")]
    InvalidApiKey {
        /// Why the key was rejected.
        reason: &'static str,
    },

    /// The environment is not one of `sandbox` or `live`.
    #[error("invalid environment {0:?}: expected \"sandbox\" or \"live\"")]
    InvalidEnvironment(String),

    /// The base URL is malformed or unsafe.
    #[error("invalid base URL: {reason}")]
    InvalidBaseUrl {
        /// Why the URL was rejected.
        reason: String,
    },

    /// The timeout is zero.
    #[error("invalid timeout: must be a positive number of milliseconds")]
    InvalidTimeout,

    /// A setting could not be parsed.
    #[error("invalid value for {key}: {reason}")]
    InvalidSetting {
        /// Setting name.
        key: String,
        /// Parse failure description.
        reason: String,
    },
}

/// A request path that would escape the API root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A `..` segment, separated by `/` or `\`.
    #[error("path traversal detected in {0:?}")]
    Traversal(String),

    /// A percent-encoded traversal sequence.
    #[error("encoded path traversal detected in {0:?}")]
    EncodedTraversal(String),
}

/// Classification tag attached to every [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or invalid credentials (401).
    AuthenticationError,
    /// Valid credentials without permission (403).
    AuthorizationError,
    /// The requested entity does not exist.
    NotFoundError,
    /// The request failed field validation.
    ValidationError,
    /// Too many requests (429).
    RateLimitError,
    /// Generic client error or structured API error.
    ApiError,
    /// 5xx response.
    ServerError,
    /// Connection-level failure.
    NetworkError,
    /// The request deadline passed.
    TimeoutError,
    /// Anything unrecognized.
    UnknownError,
}

impl ErrorKind {
    /// Wire name of the kind, e.g. `"rate_limit_error"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationError => "authentication_error",
            Self::AuthorizationError => "authorization_error",
            Self::NotFoundError => "not_found_error",
            Self::ValidationError => "validation_error",
            Self::RateLimitError => "rate_limit_error",
            Self::ApiError => "api_error",
            Self::ServerError => "server_error",
            Self::NetworkError => "network_error",
            Self::TimeoutError => "timeout_error",
            Self::UnknownError => "unknown_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified API failure.
///
/// Built by the classifier in [`crate::classify`] or by the transport for
/// connection failures. Constructing one never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    /// Classification tag.
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    /// Machine-readable code, e.g. `entity_not_found`.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: Option<String>,
    /// Raw payload backing the error (validation list, status/body pair, ...).
    pub details: Option<Value>,
    /// Additional fields from the API error object.
    pub meta: Map<String, Value>,
}

impl ApiError {
    /// Create an error with the given kind and no other fields.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            code: None,
            message: None,
            details: None,
            meta: Map::new(),
        }
    }

    /// Set the code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// A connection-level failure (refused, DNS, reset).
    #[must_use]
    pub fn network_error(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(ErrorKind::NetworkError)
            .with_code("network_error")
            .with_message(format!("Network error: {reason}"))
            .with_details(json!({ "reason": reason }))
    }

    /// The request did not complete within `timeout_ms`.
    #[must_use]
    pub fn timeout_error(timeout_ms: u64) -> Self {
        Self::new(ErrorKind::TimeoutError)
            .with_code("timeout")
            .with_message(format!("Request timed out after {timeout_ms}ms"))
            .with_details(json!({ "timeout": timeout_ms }))
    }

    /// Whether a later attempt could succeed (rate limits, 5xx, network, timeouts).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::RateLimitError
                | ErrorKind::ServerError
                | ErrorKind::NetworkError
                | ErrorKind::TimeoutError
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.kind)?;
        if let Some(code) = &self.code {
            write!(f, " ({code})")?;
        }
        write!(f, "] {}", self.message.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_code() {
        let err = ApiError::new(ErrorKind::NotFoundError)
            .with_code("entity_not_found")
            .with_message("Product not found");
        assert_eq!(
            err.to_string(),
            "[not_found_error (entity_not_found)] Product not found"
        );
    }

    #[test]
    fn display_without_code_or_message() {
        let err = ApiError::new(ErrorKind::UnknownError);
        assert_eq!(err.to_string(), "[unknown_error] ");
    }

    #[test]
    fn network_error_fields() {
        let err = ApiError::network_error("connection refused");
        assert_eq!(err.kind, ErrorKind::NetworkError);
        assert_eq!(err.code.as_deref(), Some("network_error"));
        assert_eq!(err.message.as_deref(), Some("Network error: connection refused"));
        assert_eq!(err.details, Some(json!({ "reason": "connection refused" })));
        assert!(err.meta.is_empty());
    }

    #[test]
    fn timeout_error_fields() {
        let err = ApiError::timeout_error(5000);
        assert_eq!(err.kind, ErrorKind::TimeoutError);
        assert_eq!(err.code.as_deref(), Some("timeout"));
        assert_eq!(err.message.as_deref(), Some("Request timed out after 5000ms"));
        assert_eq!(err.details, Some(json!({ "timeout": 5000 })));
    }

    #[test]
    fn kind_serializes_as_wire_name() {
        let err = ApiError::new(ErrorKind::RateLimitError);
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "rate_limit_error");
    }

    #[test]
    fn transient_kinds() {
        assert!(ApiError::timeout_error(1).is_transient());
        assert!(ApiError::network_error("x").is_transient());
        assert!(!ApiError::new(ErrorKind::ValidationError).is_transient());
        assert!(!ApiError::new(ErrorKind::AuthenticationError).is_transient());
    }

    #[test]
    fn config_error_messages_are_descriptive() {
        let err = ConfigError::InvalidEnvironment("LIVE".into());
        assert!(err.to_string().contains("\"LIVE\""));
        assert!(ConfigError::InvalidTimeout.to_string().contains("positive"));
    }
}
