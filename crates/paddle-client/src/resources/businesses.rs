//! Businesses saved against a customer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A business a customer buys on behalf of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Business {
    /// Business ID (`biz_...`).
    pub id: Option<String>,
    /// Owning customer ID.
    pub customer_id: Option<String>,
    /// Legal name.
    pub name: Option<String>,
    /// Company number.
    pub company_number: Option<String>,
    /// Tax or VAT identifier.
    pub tax_identifier: Option<String>,
    /// `active` or `archived`.
    pub status: Option<String>,
    /// `[{ name, email }]` contacts for invoices.
    pub contacts: Option<Vec<Value>>,
    /// Free-form data attached by the seller.
    pub custom_data: Option<Value>,
    /// Import metadata.
    pub import_meta: Option<Value>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
}

resource_handle!(Businesses, "Endpoints under `/customers/{customer_id}/businesses`.");

impl Businesses<'_> {
    /// `GET /customers/{customer_id}/businesses`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(
        &self,
        customer_id: &str,
        params: &QueryParams,
    ) -> Result<Vec<Business>, ClientError> {
        self.endpoint
            .list(&format!("/customers/{}/businesses", segment(customer_id)), params)
            .await
    }

    /// `GET /customers/{customer_id}/businesses/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, customer_id: &str, id: &str) -> Result<Business, ClientError> {
        self.endpoint
            .fetch(
                &format!("/customers/{}/businesses/{}", segment(customer_id), segment(id)),
                &QueryParams::new(),
            )
            .await
    }

    /// `POST /customers/{customer_id}/businesses`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn create(&self, customer_id: &str, body: &Value) -> Result<Business, ClientError> {
        self.endpoint
            .post(&format!("/customers/{}/businesses", segment(customer_id)), body)
            .await
    }

    /// `PATCH /customers/{customer_id}/businesses/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(
        &self,
        customer_id: &str,
        id: &str,
        body: &Value,
    ) -> Result<Business, ClientError> {
        self.endpoint
            .patch(
                &format!("/customers/{}/businesses/{}", segment(customer_id), segment(id)),
                body,
            )
            .await
    }
}
