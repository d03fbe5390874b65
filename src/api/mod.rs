//! The API layer: an HTTP receiver for provider webhooks.

pub mod handlers;
pub mod router;

pub use handlers::{liveness_handler, pretium_webhook_handler};
pub use router::{WEBHOOK_PATH, create_router};
