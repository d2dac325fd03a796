//! Events and event types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::QueryParams;

use crate::error::ClientError;

/// Something that happened in the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Event ID (`evt_...`).
    pub event_id: Option<String>,
    /// Event type, e.g. `subscription.created`.
    pub event_type: Option<String>,
    /// RFC 3339 timestamp.
    pub occurred_at: Option<String>,
    /// The entity as it was when the event occurred.
    pub data: Option<Value>,
}

/// A type of event that can be subscribed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventType {
    /// Type name, e.g. `transaction.paid`.
    pub name: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Entity group, e.g. `Transaction`.
    pub group: Option<String>,
    /// API versions that include this event.
    pub available_versions: Option<Vec<u32>>,
}

resource_handle!(Events, "Endpoints under `/events` and `/event-types`.");

impl Events<'_> {
    /// `GET /events`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Event>, ClientError> {
        self.endpoint.list("/events", params).await
    }

    /// `GET /event-types`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn types(&self) -> Result<Vec<EventType>, ClientError> {
        self.endpoint.list("/event-types", &QueryParams::new()).await
    }
}
