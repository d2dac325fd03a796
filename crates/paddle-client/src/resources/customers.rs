//! Customers and their credit balances.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Customer ID (`ctm_...`).
    pub id: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Whether the customer opted in to marketing.
    pub marketing_consent: Option<bool>,
    /// `active` or `archived`.
    pub status: Option<String>,
    /// Free-form data attached by the seller.
    pub custom_data: Option<Value>,
    /// IETF BCP 47 locale.
    pub locale: Option<String>,
    /// Import metadata.
    pub import_meta: Option<Value>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
}

/// Credit held for a customer in one currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditBalance {
    /// Customer ID.
    pub customer_id: Option<String>,
    /// ISO 4217 currency code.
    pub currency_code: Option<String>,
    /// `{ available, reserved, used }`, amounts as strings.
    pub balance: Option<Value>,
}

resource_handle!(Customers, "Endpoints under `/customers`.");

impl Customers<'_> {
    /// `GET /customers`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Customer>, ClientError> {
        self.endpoint.list("/customers", params).await
    }

    /// `GET /customers/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, id: &str) -> Result<Customer, ClientError> {
        self.endpoint
            .fetch(&format!("/customers/{}", segment(id)), &QueryParams::new())
            .await
    }

    /// `POST /customers`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn create(&self, body: &Value) -> Result<Customer, ClientError> {
        self.endpoint.post("/customers", body).await
    }

    /// `PATCH /customers/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(&self, id: &str, body: &Value) -> Result<Customer, ClientError> {
        self.endpoint.patch(&format!("/customers/{}", segment(id)), body).await
    }

    /// `GET /customers/{id}/credit-balances`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn credit_balances(&self, id: &str) -> Result<Vec<CreditBalance>, ClientError> {
        self.endpoint
            .list(&format!("/customers/{}/credit-balances", segment(id)), &QueryParams::new())
            .await
    }
}
