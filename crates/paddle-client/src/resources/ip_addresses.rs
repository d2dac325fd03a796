//! IP addresses Paddle sends webhooks from.

use serde::{Deserialize, Serialize};

use paddle_core::QueryParams;

use crate::error::ClientError;

/// Source ranges to allowlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddresses {
    /// IPv4 CIDR blocks.
    pub ipv4_cidrs: Vec<String>,
}

resource_handle!(IpAddressesApi, "The `/ips` endpoint.");

impl IpAddressesApi<'_> {
    /// `GET /ips`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`](crate::PaddleClient::request).
    pub async fn get(&self) -> Result<IpAddresses, ClientError> {
        self.endpoint.fetch("/ips", &QueryParams::new()).await
    }
}
