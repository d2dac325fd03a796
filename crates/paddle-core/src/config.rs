//! Connection settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use zeroize::Zeroize;

use crate::error::ConfigError;
use crate::settings::{self, SettingsProvider};

/// Sandbox API origin.
pub const SANDBOX_BASE_URL: &str = "https://sandbox-api.paddle.com";
/// Live API origin.
pub const LIVE_BASE_URL: &str = "https://api.paddle.com";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Every API key starts with this.
const KEY_PREFIX: &str = "pdl_";
/// Marks a key issued for the live environment.
const LIVE_KEY_MARKER: &str = "_live_";

/// A Paddle API key that never shows up in debug output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    inner: String,
}

impl ApiKey {
    /// Wrap a key. Validation happens in [`Configuration::validate`].
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// The raw key, for the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Whether the key carries the live marker.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.inner.contains(LIVE_KEY_MARKER)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let key = self.inner.as_str();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ConfigError::InvalidApiKey {
                reason: "contains whitespace or control characters",
            });
        }

        let valid_shape = key.strip_prefix(KEY_PREFIX).is_some_and(|rest| {
            rest.split_once('_').is_some_and(|(kind, remainder)| {
                !kind.is_empty()
                    && kind.chars().all(|c| c.is_ascii_alphanumeric())
                    && !remainder.is_empty()
            })
        });
        if !valid_shape {
            return Err(ConfigError::InvalidApiKey {
                reason: "unrecognized key prefix",
            });
        }

        Ok(())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

/// Target environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Test environment.
    #[default]
    Sandbox,
    /// Production environment.
    Live,
}

impl Environment {
    /// Setting value for this environment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }

    /// API origin for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Live => LIVE_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Self::Sandbox),
            "live" => Ok(Self::Live),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable connection settings.
///
/// `with_*` methods return a new value; a configuration is never changed in
/// place. Call [`validate`](Self::validate) before use; the client does so on
/// construction and for every per-request override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    api_key: ApiKey,
    environment: Environment,
    base_url: Option<String>,
    timeout_ms: u64,
    retry: bool,
}

impl Configuration {
    /// Create a configuration for `api_key`, inferring the environment from it.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = ApiKey::new(api_key);
        let environment = infer_environment(&api_key);
        Self {
            api_key,
            environment,
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: false,
        }
    }

    /// Resolve settings from `provider`.
    ///
    /// The key comes from `PADDLE_API_KEY`, then `PADDLE_SANDBOX_API_KEY`.
    /// Without `PADDLE_ENVIRONMENT` the environment is `live` only for keys
    /// carrying the live marker; anything else resolves to `sandbox`.
    ///
    /// A missing key is not an error here; [`validate`](Self::validate) reports it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the environment, timeout or retry setting
    /// cannot be parsed.
    pub fn resolve(provider: &dyn SettingsProvider) -> Result<Self, ConfigError> {
        let api_key = provider
            .get(settings::API_KEY)
            .or_else(|| provider.get(settings::SANDBOX_API_KEY))
            .unwrap_or_default();

        let mut config = Self::new(api_key);

        if let Some(environment) = provider.get(settings::ENVIRONMENT) {
            config.environment = environment.parse()?;
        }
        config.base_url = provider.get(settings::BASE_URL);

        if let Some(timeout) = provider.get(settings::TIMEOUT_MS) {
            config.timeout_ms =
                timeout
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidSetting {
                        key: settings::TIMEOUT_MS.to_string(),
                        reason: e.to_string(),
                    })?;
        }

        if let Some(retry) = provider.get(settings::RETRY) {
            config.retry = parse_bool(&retry).ok_or_else(|| ConfigError::InvalidSetting {
                key: settings::RETRY.to_string(),
                reason: format!("expected true or false, got {retry:?}"),
            })?;
        }

        tracing::debug!(
            environment = %config.environment,
            base_url = %config.base_url(),
            timeout_ms = config.timeout_ms,
            "Resolved Paddle configuration"
        );

        Ok(config)
    }

    /// Resolve from the process environment.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(&settings::EnvSettings)
    }

    /// Check every field. Pure: repeated calls give the same answer.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: key, then environment-dependent URL,
    /// then timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key.validate()?;
        validate_base_url(&self.base_url())?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Replace the API key.
    #[must_use]
    pub fn with_api_key(&self, api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            ..self.clone()
        }
    }

    /// Select an environment.
    #[must_use]
    pub fn with_environment(&self, environment: Environment) -> Self {
        Self {
            environment,
            ..self.clone()
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..self.clone()
        }
    }

    /// Set the default timeout.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ..self.clone()
        }
    }

    /// Set the retry flag.
    #[must_use]
    pub fn with_retry(&self, retry: bool) -> Self {
        Self {
            retry,
            ..self.clone()
        }
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// The base URL: the override if set, otherwise the environment origin.
    /// Trailing slashes are removed.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Default request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Default request timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Whether callers asked for retries. The transport makes one attempt
    /// regardless; retrying is left to an outer policy.
    #[must_use]
    pub const fn retry(&self) -> bool {
        self.retry
    }
}

fn infer_environment(api_key: &ApiKey) -> Environment {
    if api_key.is_live() {
        Environment::Live
    } else {
        Environment::Sandbox
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

const BLOCKED_SCHEMES: &[&str] = &["file:", "javascript:", "data:", "ftp:", "ldap:"];

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        reason: reason.to_string(),
    };

    let lowered = base_url.trim_start().to_ascii_lowercase();
    if BLOCKED_SCHEMES.iter().any(|s| lowered.starts_with(s)) {
        return Err(invalid("only http and https are allowed"));
    }
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid("must start with http:// or https://"));
    }

    let parsed = url::Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(invalid("must not contain credentials"));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }

    Ok(())
}
