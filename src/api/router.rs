//! Router construction for the webhook receiver.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::app::AppState;

use super::handlers::{liveness_handler, pretium_webhook_handler};

/// Path the provider is configured to call back on
pub const WEBHOOK_PATH: &str = "/webhooks/pretium";

/// Notifications are small JSON objects
const MAX_WEBHOOK_BODY_BYTES: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(pretium_webhook_handler))
        .route("/health/live", get(liveness_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_WEBHOOK_BODY_BYTES)),
        )
        .with_state(state)
}
