//! Decoding of provider webhook notifications.
//!
//! The payload is decoded as-is; authenticity is not checked here.

use std::io::Read;

use tracing::debug;

use crate::domain::{AppError, AppResult, WebhookNotification};

/// Decode a notification from a byte stream
pub fn parse_webhook<R: Read>(reader: R) -> AppResult<WebhookNotification> {
    let notification: WebhookNotification =
        serde_json::from_reader(reader).map_err(|e| AppError::Decode(e.to_string()))?;
    debug!(
        transaction_code = %notification.transaction_code,
        status = %notification.status,
        "Webhook notification decoded"
    );
    Ok(notification)
}

/// Decode a notification from an in-memory body
pub fn parse_webhook_slice(body: &[u8]) -> AppResult<WebhookNotification> {
    parse_webhook(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionStatus;

    #[test]
    fn test_parse_webhook() {
        let body = r#"{"status": "COMPLETE", "transaction_code": "TX-1", "message": "Paid"}"#;
        let notification = parse_webhook(body.as_bytes()).unwrap();
        assert_eq!(notification.transaction_code, "TX-1");
        assert_eq!(notification.message, "Paid");
        assert_eq!(notification.transaction_status(), TransactionStatus::Complete);
    }

    #[test]
    fn test_parse_webhook_ignores_extra_fields() {
        let body = br#"{"status": "FAILED", "transaction_code": "TX-2", "message": "", "receipt": "R1"}"#;
        let notification = parse_webhook_slice(body).unwrap();
        assert_eq!(notification.transaction_status(), TransactionStatus::Failed);
    }

    #[test]
    fn test_parse_webhook_malformed() {
        let result = parse_webhook_slice(b"not json");
        assert!(matches!(result, Err(AppError::Decode(_))));
    }
}
