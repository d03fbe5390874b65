//! Default reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use crate::domain::{AppError, ConfigError, Transport, TransportError};

/// Default per-request timeout applied by [`ReqwestTransport`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport that dispatches requests through a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let http_client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::Config(ConfigError::InvalidValue {
                key: "http_client".to_string(),
                message: e.to_string(),
            })
        })?;

        Ok(Self { http_client })
    }

    /// Wrap an already configured client
    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }

    pub fn client(&self) -> &Client {
        &self.http_client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, TransportError> {
        self.http_client.execute(request).await.map_err(|e| {
            error!(error = %e, timeout = e.is_timeout(), "Pretium request failed");
            TransportError::Http(e)
        })
    }
}
