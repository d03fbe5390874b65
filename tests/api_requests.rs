//! Tests for the webhook receiver router.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use pretium_client::api::{WEBHOOK_PATH, create_router};
use pretium_client::app::{AppState, NotificationService};
use pretium_client::domain::ErrorResponse;
use pretium_client::test_utils::{MockResponse, MockTransport, RecordingWebhookHandler};
use pretium_client::{PretiumClient, PretiumConfig};

fn webhook_request(body: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(WEBHOOK_PATH)
        .header("Content-Type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn notification_body() -> String {
    json!({
        "status": "COMPLETE",
        "transaction_code": "PAY-1",
        "message": "Transaction processed successfully"
    })
    .to_string()
}

fn router_with(handler: Arc<RecordingWebhookHandler>, secret: Option<&str>) -> Router {
    let state = AppState::new(handler as _).with_webhook_secret(secret.map(str::to_string));
    create_router(Arc::new(state))
}

async fn error_type(response: axum::response::Response) -> String {
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let error: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();
    error.error.r#type
}

#[tokio::test]
async fn test_webhook_is_delivered_to_handler() {
    let handler = Arc::new(RecordingWebhookHandler::new());
    let router = router_with(Arc::clone(&handler), None);

    let response = router
        .oneshot(webhook_request(&notification_body(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let received = handler.notifications();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].transaction_code, "PAY-1");
    assert_eq!(received[0].status, "COMPLETE");
}

#[tokio::test]
async fn test_malformed_webhook_is_bad_request() {
    let handler = Arc::new(RecordingWebhookHandler::new());
    let router = router_with(Arc::clone(&handler), None);

    let response = router
        .oneshot(webhook_request("{not json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_type(response).await, "deserialization_error");
    assert!(handler.notifications().is_empty());
}

#[tokio::test]
async fn test_webhook_secret_enforced() {
    let handler = Arc::new(RecordingWebhookHandler::new());
    let router = router_with(Arc::clone(&handler), Some("hook-secret"));

    let missing = router
        .clone()
        .oneshot(webhook_request(&notification_body(), None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = router
        .clone()
        .oneshot(webhook_request(&notification_body(), Some("guess")))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_type(wrong).await, "authentication_error");

    let same_length = router
        .clone()
        .oneshot(webhook_request(&notification_body(), Some("hook-secreT")))
        .await
        .unwrap();
    assert_eq!(same_length.status(), StatusCode::UNAUTHORIZED);

    let correct = router
        .oneshot(webhook_request(&notification_body(), Some("hook-secret")))
        .await
        .unwrap();
    assert_eq!(correct.status(), StatusCode::OK);

    assert_eq!(handler.notifications().len(), 1);
}

#[tokio::test]
async fn test_handler_failure_is_server_error() {
    let handler = Arc::new(RecordingWebhookHandler::failing("handler exploded"));
    let router = router_with(handler, None);

    let response = router
        .oneshot(webhook_request(&notification_body(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_type(response).await, "internal_error");
}

#[tokio::test]
async fn test_liveness() {
    let router = router_with(Arc::new(RecordingWebhookHandler::new()), None);

    let request = Request::builder()
        .uri("/health/live")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// NOTIFICATION SERVICE
// ============================================================================

fn confirming_router(transport: Arc<MockTransport>) -> Router {
    let config = PretiumConfig::new("0xSettlementAddress", "mock-key", None);
    let client = PretiumClient::with_transport(config, transport);
    let service = NotificationService::new(client, true);
    create_router(Arc::new(AppState::new(Arc::new(service))))
}

#[tokio::test]
async fn test_notification_confirmed_through_status() {
    let transport = Arc::new(MockTransport::new().respond(
        "/v1/status",
        MockResponse::json(
            200,
            json!({
                "code": 200,
                "message": "Transaction",
                "data": { "transaction_code": "PAY-1", "status": "COMPLETE" }
            }),
        ),
    ));
    let router = confirming_router(Arc::clone(&transport));

    let response = router
        .oneshot(webhook_request(&notification_body(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/status");
    assert_eq!(requests[0].body.as_ref().unwrap()["transaction_code"], "PAY-1");
}

#[tokio::test]
async fn test_notification_confirmation_failure_is_bad_gateway() {
    let transport = Arc::new(MockTransport::new().respond(
        "/v1/status",
        MockResponse::json(404, json!({ "message": "Transaction not found" })),
    ));
    let router = confirming_router(transport);

    let response = router
        .oneshot(webhook_request(&notification_body(), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(error_type(response).await, "external_service_error");
}

#[tokio::test]
async fn test_notification_without_code_is_rejected() {
    let transport = Arc::new(MockTransport::new());
    let router = confirming_router(Arc::clone(&transport));

    let body = json!({ "status": "COMPLETE", "message": "" }).to_string();
    let response = router.oneshot(webhook_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(transport.requests().is_empty());
}
