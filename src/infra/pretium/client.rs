//! Shared request/response pipeline for every Pretium operation.
//!
//! Each operation serializes its body, builds an authenticated request,
//! hands it to the configured [`Transport`] and decodes the response. Error
//! statuses are decoded into [`ApiError`] where the provider sent a usable
//! `{code, message}` body.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Method, Request, Response, Url};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::domain::{ApiError, AppError, AppResult, Transport};

use super::config::PretiumConfig;
use super::context::CallContext;
use super::transport::ReqwestTransport;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

pub const CLIENT_USER_AGENT: &str = concat!("pretium-client-rs/", env!("CARGO_PKG_VERSION"));

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the Pretium settlement API.
///
/// Holds no mutable state after construction, so a single instance can be
/// shared (or cloned) across tasks.
#[derive(Clone)]
pub struct PretiumClient {
    config: Arc<PretiumConfig>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for PretiumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PretiumClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PretiumClient {
    /// Create a client using the default reqwest transport
    pub fn new(config: PretiumConfig) -> AppResult<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a caller-supplied transport
    pub fn with_transport(config: PretiumConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Replace the transport used for subsequent calls
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
        self.transport = transport;
        self
    }

    pub fn config(&self) -> &PretiumConfig {
        &self.config
    }

    pub fn settlement_address(&self) -> &str {
        &self.config.settlement_address
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.config.callback_url.as_deref()
    }

    /// Attach the API key plus user-agent and JSON content negotiation headers.
    pub fn apply_headers(&self, request: &mut Request) -> AppResult<()> {
        let api_key = HeaderValue::from_str(self.config.api_key.expose_secret())
            .map_err(|e| AppError::InvalidRequest(format!("invalid API key header: {}", e)))?;

        let headers = request.headers_mut();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(())
    }

    /// Build, authenticate and send a request, returning the raw response.
    ///
    /// The call is bound to `ctx`: cancellation or expiry aborts it. Transport
    /// failures are returned as they are; nothing is retried.
    pub async fn execute(
        &self,
        ctx: &CallContext,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> AppResult<Response> {
        ctx.run(self.dispatch(method, url, body)).await
    }

    async fn dispatch(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> AppResult<Response> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::InvalidRequest(format!("invalid URL '{}': {}", url, e)))?;

        let mut request = Request::new(method, parsed);
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }
        self.apply_headers(&mut request)?;

        debug!(method = %request.method(), url = %request.url(), "Calling Pretium API");

        Ok(self.transport.execute(request).await?)
    }

    /// POST `body` as JSON to `{base}/v1/{path}` and decode the reply into `T`.
    pub(crate) async fn post<B, T>(&self, ctx: &CallContext, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let url = self.config.endpoint(path);

        ctx.run(async {
            let response = self.dispatch(Method::POST, &url, Some(payload)).await?;
            decode_response(response).await
        })
        .await
    }

    /// The callback URL as sent on the wire (empty when unset)
    pub(crate) fn wire_callback_url(&self) -> &str {
        self.config.callback_url.as_deref().unwrap_or_default()
    }
}

/// Wire form of a provider error body. Both fields are optional.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Parse a provider error body, backfilling `code` from the HTTP status.
///
/// Returns `None` if the body is not an error object or carries no message.
pub fn parse_api_error(status: u16, body: &[u8]) -> Option<ApiError> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = parsed.message.filter(|m| !m.is_empty())?;
    let code = match parsed.code {
        Some(code) if code != 0 => code,
        _ => i64::from(status),
    };
    Some(ApiError { code, message })
}

/// Decode a provider response into `T`, or into an error for statuses >= 400.
///
/// Takes ownership of the response; its body is released on every return path.
pub async fn decode_response<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) if is_error => {
            error!(status = %status, error = %e, "Failed to read Pretium error body");
            return Err(AppError::UnexpectedStatus {
                status: status.to_string(),
                body: None,
            });
        }
        Err(e) => {
            error!(status = %status, error = %e, "Failed to read Pretium response body");
            return Err(AppError::Transport(e.into()));
        }
    };

    if is_error {
        if let Some(api_err) = parse_api_error(status.as_u16(), &body) {
            warn!(
                status = %status,
                code = api_err.code,
                message = %api_err.message,
                "Pretium API returned error"
            );
            return Err(AppError::Api(api_err));
        }

        let body = String::from_utf8_lossy(&body).into_owned();
        error!(status = %status, body = %body, "Pretium API returned unparseable error");
        return Err(AppError::UnexpectedStatus {
            status: status.to_string(),
            body: Some(body),
        });
    }

    let decoded = serde_json::from_slice(&body).map_err(|e| {
        error!(status = %status, error = %e, "Failed to decode Pretium response");
        AppError::Decode(e.to_string())
    })?;

    debug!(status = %status, "Pretium response decoded");
    Ok(decoded)
}
