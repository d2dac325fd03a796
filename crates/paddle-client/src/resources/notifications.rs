//! Webhook notifications.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A notification sent, or about to be sent, to a destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    /// Notification ID (`ntf_...`).
    pub id: Option<String>,
    /// Event type, e.g. `transaction.completed`.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// `not_attempted`, `needs_retry`, `delivered` or `failed`.
    pub status: Option<String>,
    /// The event that triggered the notification.
    pub payload: Option<Value>,
    /// RFC 3339 timestamp.
    pub occurred_at: Option<String>,
    /// When the notification was delivered.
    pub delivered_at: Option<String>,
    /// When the last delivery attempt was replayed.
    pub replayed_at: Option<String>,
    /// `event` or `replay`.
    pub origin: Option<String>,
    /// When the last attempt was made.
    pub last_attempt_at: Option<String>,
    /// When the next retry is due.
    pub retry_at: Option<String>,
    /// Attempts so far.
    pub times_attempted: Option<u32>,
    /// Destination ID (`ntfset_...`).
    pub notification_setting_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplayResponse {
    notification_id: Option<String>,
}

resource_handle!(Notifications, "Endpoints under `/notifications`.");

impl Notifications<'_> {
    /// `GET /notifications`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Notification>, ClientError> {
        self.endpoint.list("/notifications", params).await
    }

    /// `GET /notifications/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, id: &str) -> Result<Notification, ClientError> {
        self.endpoint
            .fetch(&format!("/notifications/{}", segment(id)), &QueryParams::new())
            .await
    }

    /// `POST /notifications/{id}/replay`. Returns the new notification ID,
    /// if the API reported one.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn replay(&self, id: &str) -> Result<Option<String>, ClientError> {
        let replay: ReplayResponse = self
            .endpoint
            .post(&format!("/notifications/{}/replay", segment(id)), &json!({}))
            .await?;
        Ok(replay.notification_id)
    }
}
