//! Transactions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::{ApiError, ErrorKind, QueryParams};

use super::segment;
use crate::error::ClientError;

/// A transaction, from draft to completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Transaction ID (`txn_...`).
    pub id: Option<String>,
    /// `draft`, `ready`, `billed`, `paid`, `completed`, `canceled` or `past_due`.
    pub status: Option<String>,
    /// Customer ID.
    pub customer_id: Option<String>,
    /// Address ID.
    pub address_id: Option<String>,
    /// Business ID.
    pub business_id: Option<String>,
    /// Free-form data attached by the seller.
    pub custom_data: Option<Value>,
    /// ISO 4217 currency code.
    pub currency_code: Option<String>,
    /// `web`, `api`, `subscription_recurring` and so on.
    pub origin: Option<String>,
    /// Subscription this transaction belongs to.
    pub subscription_id: Option<String>,
    /// Invoice ID.
    pub invoice_id: Option<String>,
    /// Invoice number.
    pub invoice_number: Option<String>,
    /// `automatic` or `manual`.
    pub collection_mode: Option<String>,
    /// Discount ID.
    pub discount_id: Option<String>,
    /// Billing details for manually collected transactions.
    pub billing_details: Option<Value>,
    /// `{ starts_at, ends_at }`.
    pub billing_period: Option<Value>,
    /// Line items.
    pub items: Option<Vec<Value>>,
    /// Totals, line item breakdown and tax rates.
    pub details: Option<Value>,
    /// Payment attempts.
    pub payments: Option<Vec<Value>>,
    /// `{ url }` for the hosted checkout.
    pub checkout: Option<Value>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
    /// When the transaction was billed.
    pub billed_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InvoiceUrl {
    url: Option<String>,
}

resource_handle!(Transactions, "Endpoints under `/transactions`.");

impl Transactions<'_> {
    /// `GET /transactions`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Transaction>, ClientError> {
        self.endpoint.list("/transactions", params).await
    }

    /// `GET /transactions/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, id: &str) -> Result<Transaction, ClientError> {
        self.endpoint
            .fetch(&format!("/transactions/{}", segment(id)), &QueryParams::new())
            .await
    }

    /// `POST /transactions`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn create(&self, body: &Value) -> Result<Transaction, ClientError> {
        self.endpoint.post("/transactions", body).await
    }

    /// `PATCH /transactions/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(&self, id: &str, body: &Value) -> Result<Transaction, ClientError> {
        self.endpoint
            .patch(&format!("/transactions/{}", segment(id)), body)
            .await
    }

    /// `POST /transactions/preview`. Nothing is saved.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn preview(&self, body: &Value) -> Result<Transaction, ClientError> {
        self.endpoint.post("/transactions/preview", body).await
    }

    /// `GET /transactions/{id}/invoice`, returning the temporary PDF link.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request). A response
    /// without a `url` is an `unknown_error`.
    pub async fn invoice_url(&self, id: &str) -> Result<String, ClientError> {
        let invoice: InvoiceUrl = self
            .endpoint
            .fetch(&format!("/transactions/{}/invoice", segment(id)), &QueryParams::new())
            .await?;
        invoice.url.ok_or_else(|| {
            ApiError::new(ErrorKind::UnknownError)
                .with_code("invalid_response")
                .with_message("Invoice response has no url")
                .into()
        })
    }
}
