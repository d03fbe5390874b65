//! Client configuration.

use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::domain::ConfigError;

use super::transport::DEFAULT_TIMEOUT;

/// Live Pretium API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.xwift.africa";

/// Versioned path segment prepended to every operation
pub const VERSION_PATH: &str = "/v1/";

/// Configuration for [`super::PretiumClient`]. Immutable once the client is built.
#[derive(Debug, Clone)]
pub struct PretiumConfig {
    /// Address that receives crypto for off-ramp payments
    pub settlement_address: String,
    /// API key sent as `x-api-key`
    pub api_key: SecretString,
    /// Where the provider delivers status webhooks
    pub callback_url: Option<String>,
    pub base_url: String,
    /// Timeout applied by the default transport
    pub timeout: Duration,
}

impl PretiumConfig {
    pub fn new(
        settlement_address: impl Into<String>,
        api_key: impl Into<String>,
        callback_url: Option<String>,
    ) -> Self {
        let api_key: String = api_key.into();
        Self {
            settlement_address: settlement_address.into(),
            api_key: SecretString::from(api_key),
            callback_url: callback_url.filter(|u| !u.is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different host (sandbox, mock server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from `PRETIUM_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let settlement_address = required("PRETIUM_SETTLEMENT_ADDRESS")?;
        let api_key = required("PRETIUM_API_KEY")?;
        let callback_url = lookup("PRETIUM_CALLBACK_URL");

        let mut config = Self::new(settlement_address, api_key, callback_url);

        if let Some(base_url) = lookup("PRETIUM_BASE_URL").filter(|u| !u.is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup("PRETIUM_TIMEOUT_SECS") {
            let secs = raw
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "PRETIUM_TIMEOUT_SECS".to_string(),
                    message: e.to_string(),
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Full URL for an operation path such as `exchange-rate` or `onramp/KES`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, VERSION_PATH, path)
    }
}
