//! Shared helpers for the client integration tests.

#![allow(dead_code)] // Each test binary uses a different subset

use paddle_client::{Configuration, PaddleClient};
use wiremock::{MockServer, Request};

/// Sandbox key accepted by validation.
pub const TEST_KEY: &str = "pdl_sdbx_apikey_01gtgztp8f4kek3yd4g1wrksa3";

/// Configuration pointing at a mock server.
pub fn config_for(server: &MockServer) -> Configuration {
    Configuration::new(TEST_KEY).with_base_url(server.uri())
}

/// Client pointing at a mock server.
pub fn client_for(server: &MockServer) -> PaddleClient {
    PaddleClient::new(config_for(server)).expect("valid test configuration")
}

/// Every request the server has seen.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
}

/// All values of `name` on a recorded request.
pub fn header_values(request: &Request, name: &str) -> Vec<String> {
    request
        .headers
        .get_all(name)
        .iter()
        .map(|v| v.to_str().expect("ascii header").to_string())
        .collect()
}
