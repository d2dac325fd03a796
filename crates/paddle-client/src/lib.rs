//! Paddle Billing client SDK.
//!
//! A thin, async client for the Paddle Billing REST API. Every call is one
//! HTTP attempt; failures come back as a classified [`ApiError`] inside
//! [`ClientError::Api`].
//!
//! # Example
//!
//! ```no_run
//! use paddle_client::{Configuration, PaddleClient, QueryParams};
//!
//! # async fn example() -> Result<(), paddle_client::ClientError> {
//! let client = PaddleClient::new(Configuration::new(
//!     "pdl_sdbx_apikey_01gtgztp8f4kek3yd4g1wrksa3",
//! ))?;
//!
//! let params = QueryParams::new()
//!     .insert("status", vec!["active", "archived"])
//!     .insert("per_page", 50);
//! for product in client.products().list(&params).await? {
//!     println!("{:?}", product.name);
//! }
//!
//! // Raw access for endpoints without a typed wrapper
//! let discounts = client
//!     .get("/discounts", &QueryParams::new(), &Default::default())
//!     .await?;
//! println!("{discounts}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
pub mod resources;

pub use client::{Method, PaddleClient, RequestOptions};
pub use error::ClientError;
pub use paddle_core::{
    ApiError, ApiKey, ConfigError, Configuration, EnvSettings, Environment, ErrorKind,
    JsonFileSettings, LayeredSettings, MapSettings, ParamValue, PathError, QueryParams,
    SettingsProvider,
};
pub use resources::{from_api, from_api_list};
