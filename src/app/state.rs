//! Application state management.

use std::sync::Arc;

use crate::domain::WebhookHandler;

/// Shared state of the webhook receiver
#[derive(Clone)]
pub struct AppState {
    pub webhook_handler: Arc<dyn WebhookHandler>,
    /// Shared secret expected in the `Authorization` header (optional)
    pub webhook_secret: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(webhook_handler: Arc<dyn WebhookHandler>) -> Self {
        Self {
            webhook_handler,
            webhook_secret: None,
        }
    }

    /// Require a shared secret on incoming webhooks (builder pattern)
    #[must_use]
    pub fn with_webhook_secret(mut self, secret: Option<String>) -> Self {
        self.webhook_secret = secret.filter(|s| !s.is_empty());
        self
    }
}
