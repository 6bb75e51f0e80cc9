//! Connection settings for the REST backend.

use std::fmt;
use std::time::Duration;

use cabinet_core::{CabinetConfig, ConfigError, ConfigProperties, PropertyMeta};
use url::Url;

use crate::error::ClientError;

/// Base URL, API key and optional request timeout.
///
/// Loaded from the `cabinet.backend` section:
///
/// ```yaml
/// cabinet:
///   backend:
///     url: "https://project.example.co"
///     key: "${CABINET_ANON_KEY}"
///     timeout: 10          # optional, seconds
/// ```
#[derive(Clone)]
pub struct RestConfig {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

impl RestConfig {
    /// # Examples
    ///
    /// ```
    /// use cabinet_rest::RestConfig;
    ///
    /// let config = RestConfig::new("https://project.example.co", "anon-key")
    ///     .with_timeout(10);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout_secs: None,
        }
    }

    /// Bound every request by `secs` seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check the URL and key, returning the base URL without a trailing
    /// slash.
    pub fn validate(&self) -> Result<String, ClientError> {
        let raw = self.url.trim();
        let invalid = |reason: &str| ClientError::InvalidBaseUrl {
            url: self.url.clone(),
            reason: reason.to_string(),
        };

        let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

impl fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ConfigProperties for RestConfig {
    fn prefix() -> &'static str {
        "cabinet.backend"
    }

    fn properties() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta {
                key: "url",
                type_name: "String",
                required: true,
                description: "Base URL of the REST backend",
            },
            PropertyMeta {
                key: "key",
                type_name: "String",
                required: true,
                description: "API key sent as `apikey` and bearer token",
            },
            PropertyMeta {
                key: "timeout",
                type_name: "u64",
                required: false,
                description: "Per-request timeout in seconds",
            },
        ]
    }

    fn from_config(config: &CabinetConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            url: config.get(&Self::key("url"))?,
            api_key: config.get(&Self::key("key"))?,
            timeout_secs: config.get_opt(&Self::key("timeout"))?,
        })
    }
}
