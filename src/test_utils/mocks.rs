//! Mock implementations for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http;
use serde_json::Value;

use crate::domain::{AppError, Transport, TransportError, WebhookHandler, WebhookNotification};

/// Configuration for mock behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub should_fail: bool,
    pub error_message: Option<String>,
}

impl MockConfig {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }

    fn message(&self) -> String {
        self.error_message
            .clone()
            .unwrap_or_else(|| "Mock error".to_string())
    }
}

/// Canned reply served by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as seen by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync>;

/// In-memory transport that serves scripted responses keyed by URL path
pub struct MockTransport {
    routes: Mutex<HashMap<String, Responder>>,
    requests: Mutex<Vec<RecordedRequest>>,
    config: MockConfig,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            config,
        }
    }

    /// Transport whose every call fails at the connection level
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Serve a fixed response for `path` (e.g. `/v1/status`)
    #[must_use]
    pub fn respond(self, path: &str, response: MockResponse) -> Self {
        self.respond_with(path, move |_| response.clone())
    }

    /// Serve a response computed from the incoming request
    #[must_use]
    pub fn respond_with<F>(self, path: &str, responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Arc::new(responder));
        self
    }

    /// All requests received so far (for assertions)
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(request: &reqwest::Request) -> RecordedRequest {
        let headers = request
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = request
            .body()
            .and_then(|b| b.as_bytes())
            .and_then(|bytes| serde_json::from_slice(bytes).ok());

        RecordedRequest {
            method: request.method().to_string(),
            path: request.url().path().to_string(),
            headers,
            body,
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, TransportError> {
        let recorded = Self::record(&request);
        self.requests.lock().unwrap().push(recorded.clone());

        if self.config.should_fail {
            return Err(TransportError::Connection(self.config.message()));
        }

        let responder = self.routes.lock().unwrap().get(&recorded.path).cloned();
        let reply = match responder {
            Some(responder) => responder(&recorded),
            None => MockResponse::json(404, serde_json::json!({ "message": "Route not found" })),
        };

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }

        let response = http::Response::builder()
            .status(reply.status)
            .header("content-type", "application/json")
            .body(reply.body)
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(reqwest::Response::from(response))
    }
}

/// Webhook handler that stores every notification it receives
#[derive(Default)]
pub struct RecordingWebhookHandler {
    notifications: Mutex<Vec<WebhookNotification>>,
    config: MockConfig,
}

impl RecordingWebhookHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            config: MockConfig::failure(message),
        }
    }

    pub fn notifications(&self) -> Vec<WebhookNotification> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookHandler for RecordingWebhookHandler {
    async fn handle_notification(
        &self,
        notification: WebhookNotification,
    ) -> Result<(), AppError> {
        if self.config.should_fail {
            return Err(AppError::Internal(self.config.message()));
        }
        self.notifications.lock().unwrap().push(notification);
        Ok(())
    }
}
