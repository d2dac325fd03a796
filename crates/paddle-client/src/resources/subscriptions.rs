//! Subscriptions.
//!
//! Subscriptions are created by completed transactions, so there is no
//! `create` here.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A recurring subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    /// Subscription ID (`sub_...`).
    pub id: Option<String>,
    /// `active`, `canceled`, `past_due`, `paused` or `trialing`.
    pub status: Option<String>,
    /// Customer ID.
    pub customer_id: Option<String>,
    /// Address ID.
    pub address_id: Option<String>,
    /// Business ID.
    pub business_id: Option<String>,
    /// ISO 4217 currency code.
    pub currency_code: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
    /// When the subscription started.
    pub started_at: Option<String>,
    /// When the first billed period started.
    pub first_billed_at: Option<String>,
    /// When the next transaction is billed.
    pub next_billed_at: Option<String>,
    /// When the subscription was paused.
    pub paused_at: Option<String>,
    /// When the subscription was canceled.
    pub canceled_at: Option<String>,
    /// Discount applied to the subscription.
    pub discount: Option<Value>,
    /// `automatic` or `manual`.
    pub collection_mode: Option<String>,
    /// Billing details for manually collected subscriptions.
    pub billing_details: Option<Value>,
    /// `{ starts_at, ends_at }` of the current period.
    pub current_billing_period: Option<Value>,
    /// `{ interval, frequency }`.
    pub billing_cycle: Option<Value>,
    /// A pending pause, resume or cancel.
    pub scheduled_change: Option<Value>,
    /// Line items.
    pub items: Option<Vec<Value>>,
    /// Free-form data attached by the seller.
    pub custom_data: Option<Value>,
    /// Customer portal and payment method update links.
    pub management_urls: Option<Value>,
    /// Import metadata.
    pub import_meta: Option<Value>,
}

resource_handle!(Subscriptions, "Endpoints under `/subscriptions`.");

impl Subscriptions<'_> {
    /// `GET /subscriptions`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Subscription>, ClientError> {
        self.endpoint.list("/subscriptions", params).await
    }

    /// `GET /subscriptions/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, id: &str) -> Result<Subscription, ClientError> {
        self.endpoint
            .fetch(&format!("/subscriptions/{}", segment(id)), &QueryParams::new())
            .await
    }

    /// `PATCH /subscriptions/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(&self, id: &str, body: &Value) -> Result<Subscription, ClientError> {
        self.endpoint
            .patch(&format!("/subscriptions/{}", segment(id)), body)
            .await
    }

    /// `POST /subscriptions/{id}/cancel`.
    ///
    /// `effective_from` is `immediately` or `next_billing_period`; `None`
    /// leaves the choice to the API.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn cancel(
        &self,
        id: &str,
        effective_from: Option<&str>,
    ) -> Result<Subscription, ClientError> {
        self.endpoint
            .post(
                &format!("/subscriptions/{}/cancel", segment(id)),
                &effective_body(effective_from),
            )
            .await
    }

    /// `POST /subscriptions/{id}/pause`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn pause(
        &self,
        id: &str,
        effective_from: Option<&str>,
    ) -> Result<Subscription, ClientError> {
        self.endpoint
            .post(
                &format!("/subscriptions/{}/pause", segment(id)),
                &effective_body(effective_from),
            )
            .await
    }

    /// `POST /subscriptions/{id}/resume`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn resume(
        &self,
        id: &str,
        effective_from: Option<&str>,
    ) -> Result<Subscription, ClientError> {
        self.endpoint
            .post(
                &format!("/subscriptions/{}/resume", segment(id)),
                &effective_body(effective_from),
            )
            .await
    }

    /// `POST /subscriptions/{id}/activate`, ending a trial early.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn activate(&self, id: &str) -> Result<Subscription, ClientError> {
        self.endpoint
            .post(&format!("/subscriptions/{}/activate", segment(id)), &json!({}))
            .await
    }
}

fn effective_body(effective_from: Option<&str>) -> Value {
    match effective_from {
        Some(when) => json!({ "effective_from": when }),
        None => json!({}),
    }
}
