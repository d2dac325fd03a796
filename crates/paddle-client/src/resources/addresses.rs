//! Addresses saved against a customer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Address ID (`add_...`).
    pub id: Option<String>,
    /// Owning customer ID.
    pub customer_id: Option<String>,
    /// Memorable label.
    pub description: Option<String>,
    /// First line.
    pub first_line: Option<String>,
    /// Second line.
    pub second_line: Option<String>,
    /// City.
    pub city: Option<String>,
    /// ZIP or postal code.
    pub postal_code: Option<String>,
    /// State, county or region.
    pub region: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// Free-form data attached by the seller.
    pub custom_data: Option<Value>,
    /// `active` or `archived`.
    pub status: Option<String>,
    /// Import metadata.
    pub import_meta: Option<Value>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
}

resource_handle!(Addresses, "Endpoints under `/customers/{customer_id}/addresses`.");

impl Addresses<'_> {
    /// `GET /customers/{customer_id}/addresses`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(
        &self,
        customer_id: &str,
        params: &QueryParams,
    ) -> Result<Vec<Address>, ClientError> {
        self.endpoint
            .list(&format!("/customers/{}/addresses", segment(customer_id)), params)
            .await
    }

    /// `GET /customers/{customer_id}/addresses/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, customer_id: &str, id: &str) -> Result<Address, ClientError> {
        self.endpoint
            .fetch(
                &format!("/customers/{}/addresses/{}", segment(customer_id), segment(id)),
                &QueryParams::new(),
            )
            .await
    }

    /// `POST /customers/{customer_id}/addresses`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn create(&self, customer_id: &str, body: &Value) -> Result<Address, ClientError> {
        self.endpoint
            .post(&format!("/customers/{}/addresses", segment(customer_id)), body)
            .await
    }

    /// `PATCH /customers/{customer_id}/addresses/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(
        &self,
        customer_id: &str,
        id: &str,
        body: &Value,
    ) -> Result<Address, ClientError> {
        self.endpoint
            .patch(
                &format!("/customers/{}/addresses/{}", segment(customer_id), segment(id)),
                body,
            )
            .await
    }
}
