//! Client error types.

use paddle_core::{ApiError, ConfigError, ErrorKind, PathError};

/// Errors returned by [`PaddleClient`](crate::PaddleClient).
///
/// `Configuration` and `UnsafePath` are caller mistakes caught before any
/// request is sent. `Api` covers everything that happened on the wire.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configuration failed validation.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The request path would escape the API root.
    #[error("unsafe request path: {0}")]
    UnsafePath(#[from] PathError),

    /// The request failed at the HTTP or API level.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// The classified API error, if this is one.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Kind of the classified API error, if this is one.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        self.api_error().map(|err| err.kind)
    }
}
