//! HTTP handlers for the webhook receiver.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::{error, info};

use crate::app::AppState;
use crate::domain::{AppError, ErrorDetail, ErrorResponse, TransportError};
use crate::infra::parse_webhook_slice;

/// Receive a Pretium status notification
///
/// Validates the `Authorization` header against the configured webhook secret
/// (when one is set), decodes the payload and hands it to the handler.
pub async fn pretium_webhook_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    if let Some(expected_secret) = &state.webhook_secret {
        let auth_header = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing Authorization header".to_string()))?;

        if !secrets_match(auth_header.as_bytes(), expected_secret.as_bytes()) {
            return Err(AppError::Authentication(
                "Invalid webhook secret".to_string(),
            ));
        }
    }

    let notification = parse_webhook_slice(&body)?;
    let transaction_code = notification.transaction_code.clone();

    state
        .webhook_handler
        .handle_notification(notification)
        .await?;

    info!(transaction_code = %transaction_code, "Pretium webhook processed");

    Ok(StatusCode::OK)
}

/// Compare without short-circuiting on the first differing byte.
fn secrets_match(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Liveness probe
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_type, message) = match &self {
            AppError::Transport(transport_err) => match transport_err {
                TransportError::DeadlineExceeded => {
                    (StatusCode::GATEWAY_TIMEOUT, "timeout", self.to_string())
                }
                _ => (
                    StatusCode::BAD_GATEWAY,
                    "external_service_error",
                    self.to_string(),
                ),
            },
            AppError::Api(_) | AppError::UnexpectedStatus { .. } => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                self.to_string(),
            ),
            AppError::Decode(_) => (
                StatusCode::BAD_REQUEST,
                "deserialization_error",
                self.to_string(),
            ),
            AppError::Validation(_) | AppError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                self.to_string(),
            ),
            AppError::Authentication(_) => (
                StatusCode::UNAUTHORIZED,
                "authentication_error",
                self.to_string(),
            ),
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                self.to_string(),
            ),
            AppError::Serialization(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "serialization_error",
                self.to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                self.to_string(),
            ),
        };

        if status.is_server_error() {
            error!(error_type = %error_type, message = %message, "Server error");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                r#type: error_type.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match(b"hook-secret", b"hook-secret"));
        assert!(!secrets_match(b"hook-secreT", b"hook-secret"));
        assert!(!secrets_match(b"hook", b"hook-secret"));
        assert!(!secrets_match(b"", b"hook-secret"));
    }
}
