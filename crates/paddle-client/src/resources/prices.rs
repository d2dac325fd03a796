//! Prices.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A price attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    /// Price ID (`pri_...`).
    pub id: Option<String>,
    /// Owning product ID.
    pub product_id: Option<String>,
    /// Internal description.
    pub description: Option<String>,
    /// `standard` or `custom`.
    #[serde(rename = "type")]
    pub price_type: Option<String>,
    /// Name shown at checkout.
    pub name: Option<String>,
    /// `{ interval, frequency }`, absent for one-time prices.
    pub billing_cycle: Option<Value>,
    /// `{ interval, frequency }` trial length.
    pub trial_period: Option<Value>,
    /// `account_setting`, `external` or `internal`.
    pub tax_mode: Option<String>,
    /// `{ amount, currency_code }`. Amounts are strings in the lowest denomination.
    pub unit_price: Option<Value>,
    /// Per-country price overrides.
    pub unit_price_overrides: Option<Vec<Value>>,
    /// `{ minimum, maximum }` purchasable quantity.
    pub quantity: Option<Value>,
    /// `active` or `archived`.
    pub status: Option<String>,
    /// Free-form data attached by the seller.
    pub custom_data: Option<Value>,
    /// Import metadata.
    pub import_meta: Option<Value>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
}

resource_handle!(Prices, "Endpoints under `/prices`.");

impl Prices<'_> {
    /// `GET /prices`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Price>, ClientError> {
        self.endpoint.list("/prices", params).await
    }

    /// `GET /prices/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, id: &str) -> Result<Price, ClientError> {
        self.endpoint
            .fetch(&format!("/prices/{}", segment(id)), &QueryParams::new())
            .await
    }

    /// `POST /prices`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn create(&self, body: &Value) -> Result<Price, ClientError> {
        self.endpoint.post("/prices", body).await
    }

    /// `PATCH /prices/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(&self, id: &str, body: &Value) -> Result<Price, ClientError> {
        self.endpoint.patch(&format!("/prices/{}", segment(id)), body).await
    }
}
