//! Pretium settlement API client.
//!
//! All operations share one pipeline: serialize the body, attach
//! credentials, send through the [`crate::domain::Transport`], decode.
//! Provider failures come back as [`crate::domain::ApiError`] and can be
//! classified with [`crate::domain::ErrorCondition`].

pub mod client;
pub mod config;
pub mod context;
pub mod offramp;
pub mod onramp;
pub mod transport;
pub mod webhook;

pub use client::{API_KEY_HEADER, PretiumClient, decode_response, parse_api_error};
pub use config::{DEFAULT_BASE_URL, PretiumConfig};
pub use context::{CallContext, CancelHandle};
pub use transport::{DEFAULT_TIMEOUT, ReqwestTransport};
pub use webhook::{parse_webhook, parse_webhook_slice};
