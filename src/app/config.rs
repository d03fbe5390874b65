//! Receiver configuration loaded from the environment.

use std::env;

use crate::domain::ConfigError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Shared secret expected on incoming webhooks (optional)
    pub webhook_secret: Option<String>,
    /// Confirm each notification through the status endpoint
    pub confirm_webhook_status: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            webhook_secret: None,
            confirm_webhook_status: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST")
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: e.to_string(),
            })?,
            None => defaults.port,
        };

        let webhook_secret = lookup("PRETIUM_WEBHOOK_SECRET").filter(|s| !s.is_empty());

        let confirm_webhook_status = lookup("CONFIRM_WEBHOOK_STATUS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(defaults.confirm_webhook_status);

        Ok(Self {
            host,
            port,
            webhook_secret,
            confirm_webhook_status,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
