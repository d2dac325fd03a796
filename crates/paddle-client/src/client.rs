//! Paddle HTTP transport.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use paddle_core::settings::SettingsProvider;
use paddle_core::{assert_safe_path, build_headers, decode, ApiError, Configuration, QueryParams};

use crate::error::ClientError;
use crate::resources::{
    Addresses, Businesses, Customers, Events, IpAddressesApi, Notifications, Prices,
    PricingPreviews, Products, Simulations, Subscriptions, Transactions,
};

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Whether a JSON body is sent with this method.
    #[must_use]
    pub const fn sends_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch | Self::Put)
    }

    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the configuration timeout for this request.
    pub timeout: Option<Duration>,
    /// Extra headers. Protected headers are dropped.
    pub headers: Vec<(String, String)>,
    /// Replaces the client configuration for this request. Validated before use.
    pub config: Option<Configuration>,
}

impl RequestOptions {
    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Use a different configuration.
    #[must_use]
    pub fn with_config(mut self, config: Configuration) -> Self {
        self.config = Some(config);
        self
    }
}

/// Paddle Billing API client.
///
/// Cheap to clone; clones share the connection pool. Each call makes exactly
/// one HTTP attempt.
#[derive(Debug, Clone)]
pub struct PaddleClient {
    http: Client,
    config: Configuration,
}

impl PaddleClient {
    /// Create a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Configuration) -> Result<Self, ClientError> {
        config.validate()?;
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Resolve the configuration from `provider` and create a client.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::new`].
    pub fn from_settings(provider: &dyn SettingsProvider) -> Result<Self, ClientError> {
        Self::new(Configuration::resolve(provider)?)
    }

    /// Create a client configured from the process environment.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::new`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(Configuration::from_env()?)
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Issue a request and decode the response.
    ///
    /// Runs, in order: configuration validation, path validation, query
    /// normalization, header assembly, one HTTP attempt, response decoding.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Configuration`] / [`ClientError::UnsafePath`] before any I/O
    /// - [`ClientError::Api`] for network failures, timeouts and error statuses
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<Value, ClientError> {
        let config = options.config.as_ref().unwrap_or(&self.config);
        config.validate()?;
        assert_safe_path(path)?;

        let query = params.to_query_string();
        let url = build_url(&config.base_url(), path, &query);
        let timeout = options.timeout.unwrap_or_else(|| config.timeout());
        let headers = to_header_map(&build_headers(config, &options.headers));

        let mut builder = self
            .http
            .request(method.into(), &url)
            .headers(headers)
            .timeout(timeout);

        if method.sends_body() {
            if let Some(body) = body.filter(|b| !b.is_null()) {
                builder = builder.body(serde_json::to_vec(body)?);
            }
        }

        tracing::debug!(
            method = method.as_str(),
            path = %path,
            query_len = query.len(),
            timeout_ms = %timeout.as_millis(),
            "Sending Paddle API request"
        );

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        let status = response.status().as_u16();
        let response_headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        tracing::debug!(status, body_len = bytes.len(), "Received Paddle API response");

        Ok(decode::decode(status, &response_headers, &bytes)?)
    }

    /// `GET path?params`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`].
    pub async fn get(
        &self,
        path: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<Value, ClientError> {
        self.request(Method::Get, path, None, params, options).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`]; also fails if `body` cannot be serialized.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<Value, ClientError> {
        self.send_json(Method::Post, path, body, options).await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`].
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<Value, ClientError> {
        self.send_json(Method::Patch, path, body, options).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::post`].
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<Value, ClientError> {
        self.send_json(Method::Put, path, body, options).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`PaddleClient::request`].
    pub async fn delete(&self, path: &str, options: &RequestOptions) -> Result<Value, ClientError> {
        self.request(Method::Delete, path, None, &QueryParams::new(), options)
            .await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<Value, ClientError> {
        let body = serde_json::to_value(body)?;
        self.request(method, path, Some(&body), &QueryParams::new(), options)
            .await
    }

    /// Products API.
    #[must_use]
    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Prices API.
    #[must_use]
    pub fn prices(&self) -> Prices<'_> {
        Prices::new(self)
    }

    /// Customers API.
    #[must_use]
    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    /// Customer addresses API.
    #[must_use]
    pub fn addresses(&self) -> Addresses<'_> {
        Addresses::new(self)
    }

    /// Customer businesses API.
    #[must_use]
    pub fn businesses(&self) -> Businesses<'_> {
        Businesses::new(self)
    }

    /// Subscriptions API.
    #[must_use]
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    /// Transactions API.
    #[must_use]
    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(self)
    }

    /// Notifications API.
    #[must_use]
    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(self)
    }

    /// Notification simulations API.
    #[must_use]
    pub fn simulations(&self) -> Simulations<'_> {
        Simulations::new(self)
    }

    /// Events API.
    #[must_use]
    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    /// IP allowlist API.
    #[must_use]
    pub fn ip_addresses(&self) -> IpAddressesApi<'_> {
        IpAddressesApi::new(self)
    }

    /// Pricing preview API.
    #[must_use]
    pub fn pricing_preview(&self) -> PricingPreviews<'_> {
        PricingPreviews::new(self)
    }
}

fn build_url(base_url: &str, path: &str, query: &str) -> String {
    let mut url = String::with_capacity(base_url.len() + path.len() + query.len() + 2);
    url.push_str(base_url);
    if !path.is_empty() && !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Invalid caller headers are skipped rather than failing the request.
fn to_header_map(headers: &[(String, String)]) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.append(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid request header"),
        }
    }
    map
}

fn transport_error(err: &reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        tracing::warn!(timeout_ms, "Paddle API request timed out");
        return ApiError::timeout_error(timeout_ms);
    }

    let mut reason = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }

    tracing::warn!(error = %reason, "Paddle API request failed");
    ApiError::network_error(reason)
}
