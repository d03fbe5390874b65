//! Application layer: webhook processing and shared state.

pub mod config;
pub mod service;
pub mod state;

pub use config::ServerConfig;
pub use service::NotificationService;
pub use state::AppState;
