//! Core building blocks for the Paddle Billing client.
//!
//! This crate holds everything in the request/response pipeline that does not
//! perform I/O:
//!
//! - **Configuration**: `Configuration`, `Environment`, `ApiKey`, settings providers
//! - **Requests**: path validation, query normalization, header assembly
//! - **Responses**: gzip handling, JSON sniffing, `data` envelope unwrapping
//! - **Errors**: the `ApiError` taxonomy and the classifier that builds it
//!
//! The HTTP transport lives in `paddle-client`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod config;
pub mod decode;
pub mod error;
pub mod headers;
pub mod params;
pub mod path;
pub mod settings;

pub use config::{
    ApiKey, Configuration, Environment, DEFAULT_TIMEOUT_MS, LIVE_BASE_URL, SANDBOX_BASE_URL,
};
pub use error::{ApiError, ConfigError, ErrorKind, PathError};
pub use headers::build_headers;
pub use params::{ParamValue, QueryParams};
pub use path::assert_safe_path;
pub use settings::{EnvSettings, JsonFileSettings, LayeredSettings, MapSettings, SettingsProvider};
