//! Products.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paddle_core::QueryParams;

use super::segment;
use crate::error::ClientError;

/// A product in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Product ID (`pro_...`).
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Tax category, e.g. `standard` or `saas`.
    pub tax_category: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Image URL.
    pub image_url: Option<String>,
    /// Free-form data attached by the seller.
    pub custom_data: Option<Value>,
    /// `active` or `archived`.
    pub status: Option<String>,
    /// Import metadata for migrated products.
    pub import_meta: Option<Value>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp.
    pub updated_at: Option<String>,
    /// Prices, present when requested with `include=prices`.
    pub prices: Option<Vec<Value>>,
}

resource_handle!(Products, "Endpoints under `/products`.");

impl Products<'_> {
    /// `GET /products`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<Product>, ClientError> {
        self.endpoint.list("/products", params).await
    }

    /// `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self, id: &str) -> Result<Product, ClientError> {
        self.endpoint
            .fetch(&format!("/products/{}", segment(id)), &QueryParams::new())
            .await
    }

    /// `POST /products`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`](crate::PaddleClient::post).
    pub async fn create(&self, body: &Value) -> Result<Product, ClientError> {
        self.endpoint.post("/products", body).await
    }

    /// `PATCH /products/{id}`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::patch`](crate::PaddleClient::patch).
    pub async fn update(&self, id: &str, body: &Value) -> Result<Product, ClientError> {
        self.endpoint.patch(&format!("/products/{}", segment(id)), body).await
    }
}
