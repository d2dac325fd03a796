//! Notification simulations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A simulated event or scenario sent to a destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Simulation {
    /// Simulation ID (`ntfsim_...`).
    pub id: Option<String>,
    /// `active` or `archived`.
    pub status: Option<String>,
    /// Destination ID.
    pub notification_setting_id: Option<String>,
    /// Label.
    pub name: Option<String>,
    /// Event type or scenario type.
    #[serde(rename = "type")]
    pub simulation_type: Option<String>,
    /// Payload sent with the simulated event.
    pub payload: Option<Value>,
    /// When the simulation last ran.
    pub last_run_at: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
}

resource_handle!(Simulations, "Endpoints under `/simulations`.");

impl Simulations<'_> {
    /// `GET /simulations`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Simulation>, ClientError> {
        self.endpoint.list("/simulations", params).await
    }

    /// `GET /simulations/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, id: &str) -> Result<Simulation, ClientError> {
        self.endpoint
            .fetch(&format!("/simulations/{}", segment(id)), &QueryParams::new())
            .await
    }

    /// `POST /simulations`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn create(&self, body: &Value) -> Result<Simulation, ClientError> {
        self.endpoint.post("/simulations", body).await
    }

    /// `PATCH /simulations/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(&self, id: &str, body: &Value) -> Result<Simulation, ClientError> {
        self.endpoint
            .patch(&format!("/simulations/{}", segment(id)), body)
            .await
    }
}
