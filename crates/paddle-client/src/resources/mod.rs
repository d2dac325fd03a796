//! Resource endpoints.
//!
//! Each resource module pairs a record type (a 1:1 projection of the API
//! object, missing keys default to `None`) with a handle exposing the
//! endpoints for that resource. Handles borrow the client and carry the
//! [`RequestOptions`] applied to every call made through them.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use paddle_core::{ApiError, ErrorKind, QueryParams};

use crate::client::{PaddleClient, RequestOptions};
use crate::error::ClientError;

/// Defines a resource handle borrowing the client.
macro_rules! resource_handle {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone)]
        pub struct $name<'a> {
            endpoint: $crate::resources::Endpoint<'a>,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a $crate::PaddleClient) -> Self {
                Self {
                    endpoint: $crate::resources::Endpoint::new(client),
                }
            }

            /// Apply `options` to every request made through this handle.
            #[must_use]
            pub fn with_options(mut self, options: $crate::RequestOptions) -> Self {
                self.endpoint.options = options;
                self
            }
        }
    };
}

pub mod addresses;
pub mod businesses;
pub mod customers;
pub mod events;
pub mod ip_addresses;
pub mod notifications;
pub mod prices;
pub mod pricing_preview;
pub mod products;
pub mod simulations;
pub mod subscriptions;
pub mod transactions;

pub use addresses::{Address, Addresses};
pub use businesses::{Business, Businesses};
pub use customers::{CreditBalance, Customer, Customers};
pub use events::{Event, EventType, Events};
pub use ip_addresses::{IpAddresses, IpAddressesApi};
pub use notifications::{Notification, Notifications};
pub use prices::{Price, Prices};
pub use pricing_preview::{PricingPreview, PricingPreviews};
pub use products::{Product, Products};
pub use simulations::{Simulation, Simulations};
pub use subscriptions::{Subscription, Subscriptions};
pub use transactions::{Transaction, Transactions};

/// Project a decoded response into a record.
///
/// # Errors
///
/// Returns an [`ErrorKind::UnknownError`] carrying the original value when
/// the shape does not match.
pub fn from_api<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        ApiError::new(ErrorKind::UnknownError)
            .with_code("invalid_response")
            .with_message(format!("Unexpected response shape: {e}"))
            .with_details(value)
    })
}

/// Project a decoded list response. `null` is an empty list.
///
/// # Errors
///
/// See [`from_api`].
pub fn from_api_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(from_api).collect(),
        other => from_api(other),
    }
}

/// Percent-encode a caller-supplied id for use as a single path segment.
///
/// `/`, `?` and `#` inside an id cannot change the endpoint or add a query.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Shared request plumbing for resource handles.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint<'a> {
    client: &'a PaddleClient,
    pub(crate) options: RequestOptions,
}

impl<'a> Endpoint<'a> {
    pub(crate) fn new(client: &'a PaddleClient) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Vec<T>, ClientError> {
        let value = self.client.get(path, params, &self.options).await?;
        Ok(from_api_list(value)?)
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, ClientError> {
        let value = self.client.get(path, params, &self.options).await?;
        Ok(from_api(value)?)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let value = self.client.post(path, body, &self.options).await?;
        Ok(from_api(value)?)
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let value = self.client.patch(path, body, &self.options).await?;
        Ok(from_api(value)?)
    }
}
