//! Localized pricing previews.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Prices calculated for a location, without creating a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPreview {
    /// Customer ID, if one was supplied.
    pub customer_id: Option<String>,
    /// Address ID, if one was supplied.
    pub address_id: Option<String>,
    /// Business ID, if one was supplied.
    pub business_id: Option<String>,
    /// ISO 4217 currency code.
    pub currency_code: Option<String>,
    /// Discount ID.
    pub discount_id: Option<String>,
    /// Address used for tax calculation.
    pub address: Option<Value>,
    /// IP address used to infer the location.
    pub customer_ip_address: Option<String>,
    /// `{ line_items }` with per-item totals.
    pub details: Option<Value>,
    /// Payment methods available for this location.
    pub available_payment_methods: Option<Vec<String>>,
}

resource_handle!(PricingPreviews, "The `/pricing-preview` endpoint.");

impl PricingPreviews<'_> {
    /// `POST /pricing-preview`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn preview(&self, body: &Value) -> Result<PricingPreview, ClientError> {
        self.endpoint.post("/pricing-preview", body).await
    }
}
