//! Webhook notification processing.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::domain::{
    AppError, StatusRequest, TransactionStatus, ValidationError, WebhookHandler,
    WebhookNotification,
};
use crate::infra::{CallContext, PretiumClient};

/// Default time allowed for the confirming status call
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(15);

/// Handles provider notifications, optionally confirming them through the
/// status endpoint before trusting the reported state.
pub struct NotificationService {
    client: PretiumClient,
    confirm_status: bool,
    confirm_timeout: Duration,
}

impl NotificationService {
    #[must_use]
    pub fn new(client: PretiumClient, confirm_status: bool) -> Self {
        Self {
            client,
            confirm_status,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    /// Fetch the authoritative status for a notified transaction
    pub async fn confirm(
        &self,
        notification: &WebhookNotification,
    ) -> Result<TransactionStatus, AppError> {
        if notification.transaction_code.is_empty() {
            return Err(AppError::Validation(ValidationError::InvalidField {
                field: "transaction_code".to_string(),
                message: "Notification has no transaction code".to_string(),
            }));
        }

        let ctx = CallContext::background().timeout(self.confirm_timeout);
        let request = StatusRequest::new(notification.transaction_code.clone());
        let response = self.client.status(&ctx, &request).await?;

        Ok(response.data.transaction_status())
    }
}

#[async_trait]
impl WebhookHandler for NotificationService {
    #[instrument(skip(self, notification), fields(transaction_code = %notification.transaction_code))]
    async fn handle_notification(
        &self,
        notification: WebhookNotification,
    ) -> Result<(), AppError> {
        info!(
            status = %notification.status,
            message = %notification.message,
            "Pretium notification received"
        );

        if !self.confirm_status {
            return Ok(());
        }

        let confirmed = self.confirm(&notification).await.map_err(|e| {
            error!(error = %e, "Failed to confirm notification status");
            e
        })?;

        if confirmed == notification.transaction_status() {
            info!(status = ?confirmed, "Notification status confirmed");
        } else {
            warn!(
                notified = %notification.status,
                confirmed = ?confirmed,
                "Notification status differs from provider status"
            );
        }

        Ok(())
    }
}
