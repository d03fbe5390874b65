//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::{AppError, TransportError};
use super::types::WebhookNotification;

/// HTTP transport used by the client to reach the provider.
///
/// Implementations must be safe to share between concurrent calls. A failed
/// `execute` is terminal for that call: the client never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a fully built request and return the raw response.
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, TransportError>;
}

/// Consumer of provider webhook notifications
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Handle a single decoded notification
    async fn handle_notification(&self, notification: WebhookNotification)
    -> Result<(), AppError>;
}
