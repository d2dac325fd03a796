//! Settings providers.
//!
//! [`Configuration::resolve`](crate::Configuration::resolve) reads its inputs
//! through a [`SettingsProvider`] instead of touching process state directly,
//! so tests can supply isolated values.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

/// Setting holding the API key.
pub const API_KEY: &str = "PADDLE_API_KEY";
/// Alternate setting consulted when [`API_KEY`] is unset.
pub const SANDBOX_API_KEY: &str = "PADDLE_SANDBOX_API_KEY";
/// `sandbox` or `live`.
pub const ENVIRONMENT: &str = "PADDLE_ENVIRONMENT";
/// Base URL override.
pub const BASE_URL: &str = "PADDLE_BASE_URL";
/// Request timeout in milliseconds.
pub const TIMEOUT_MS: &str = "PADDLE_TIMEOUT_MS";
/// Retry flag (`true`/`false`).
pub const RETRY: &str = "PADDLE_RETRY";

/// Key/value source for configuration.
pub trait SettingsProvider: Send + Sync {
    /// Look up a setting. Empty values count as unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Look up a setting, falling back to `default`.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsProvider for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// In-memory settings, typically explicit overrides or test fixtures.
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    values: HashMap<String, String>,
}

impl MapSettings {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a setting.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SettingsProvider for MapSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Settings read from a flat JSON secrets file.
///
/// ```json
/// { "PADDLE_API_KEY": "pdl_sdbx_apikey_...", "PADDLE_TIMEOUT_MS": 10000 }
/// ```
///
/// Non-string scalars are stored in their JSON text form; nested values are ignored.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSettings {
    values: MapSettings,
}

impl JsonFileSettings {
    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file is missing, unreadable or not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let Value::Object(map) = parsed else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "secrets file must contain a JSON object",
            ));
        };

        let values = map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Bool(_) | Value::Number(_) => Some((key, value.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            })
            .collect();

        tracing::debug!(path = %path.display(), "Loaded Paddle settings file");
        Ok(Self { values })
    }

    /// Load the first readable file among `paths`, if any.
    #[must_use]
    pub fn load_first<P: AsRef<Path>>(paths: &[P]) -> Option<Self> {
        paths.iter().find_map(|path| match Self::load(path) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::debug!(path = %path.as_ref().display(), error = %e, "Skipping settings file");
                None
            }
        })
    }
}

impl SettingsProvider for JsonFileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key)
    }
}

/// Providers consulted in order; the first one that has a key wins.
///
/// ```
/// use paddle_core::{LayeredSettings, MapSettings, SettingsProvider};
///
/// let settings = LayeredSettings::new()
///     .layer(MapSettings::new().with("PADDLE_TIMEOUT_MS", "5000"))
///     .layer(MapSettings::new().with("PADDLE_TIMEOUT_MS", "30000"));
/// assert_eq!(settings.get("PADDLE_TIMEOUT_MS").as_deref(), Some("5000"));
/// ```
#[derive(Default)]
pub struct LayeredSettings {
    layers: Vec<Box<dyn SettingsProvider>>,
}

impl LayeredSettings {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider with lower precedence than the ones already added.
    #[must_use]
    pub fn layer(mut self, provider: impl SettingsProvider + 'static) -> Self {
        self.layers.push(Box::new(provider));
        self
    }
}

impl std::fmt::Debug for LayeredSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSettings")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl SettingsProvider for LayeredSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_settings_ignore_empty_values() {
        let settings = MapSettings::new().with("A", "").with("B", "b");
        assert_eq!(settings.get("A"), None);
        assert_eq!(settings.get("B").as_deref(), Some("b"));
        assert_eq!(settings.get_or("C", "c"), "c");
    }

    #[test]
    fn layered_precedence() {
        let settings = LayeredSettings::new()
            .layer(MapSettings::new().with("A", "override"))
            .layer(MapSettings::new().with("A", "default").with("B", "default"));
        assert_eq!(settings.get("A").as_deref(), Some("override"));
        assert_eq!(settings.get("B").as_deref(), Some("default"));
        assert_eq!(settings.get("C"), None);
    }

    #[test]
    fn json_file_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"PADDLE_API_KEY": "pdl_sdbx_apikey_abc", "PADDLE_TIMEOUT_MS": 1000, "PADDLE_RETRY": true, "nested": {{"x": 1}}}}"#
        )
        .unwrap();

        let settings = JsonFileSettings::load(file.path()).unwrap();
        assert_eq!(settings.get(API_KEY).as_deref(), Some("pdl_sdbx_apikey_abc"));
        assert_eq!(settings.get(TIMEOUT_MS).as_deref(), Some("1000"));
        assert_eq!(settings.get(RETRY).as_deref(), Some("true"));
        assert_eq!(settings.get("nested"), None);
    }

    #[test]
    fn json_file_must_be_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert!(JsonFileSettings::load(file.path()).is_err());
    }

    #[test]
    fn load_first_skips_missing_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"PADDLE_ENVIRONMENT": "live"}}"#).unwrap();

        let paths = [
            std::path::PathBuf::from("/nonexistent/paddle.json"),
            file.path().to_path_buf(),
        ];
        let settings = JsonFileSettings::load_first(&paths).unwrap();
        assert_eq!(settings.get(ENVIRONMENT).as_deref(), Some("live"));

        let missing = [std::path::PathBuf::from("/nonexistent/paddle.json")];
        assert!(JsonFileSettings::load_first(&missing).is_none());
    }
}
