//! Client library for the Pretium on-ramp/off-ramp settlement API.
//!
//! ```no_run
//! use pretium_client::{CallContext, ErrorCondition, PretiumClient, PretiumConfig};
//! use pretium_client::domain::ExchangeRateRequest;
//!
//! # async fn run() -> Result<(), pretium_client::AppError> {
//! let config = PretiumConfig::new("0xSettlement", "api-key", None);
//! let client = PretiumClient::new(config)?;
//!
//! let ctx = CallContext::background();
//! match client.exchange_rate(&ctx, &ExchangeRateRequest::new("KES")).await {
//!     Ok(rate) => println!("buy {} / sell {}", rate.data.buying_rate, rate.data.selling_rate),
//!     Err(e) if e.matches(ErrorCondition::AmountBelowMinimum) => println!("too small"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use domain::{ApiError, AppError, AppResult, ErrorCondition, TransportError};
pub use infra::{CallContext, CancelHandle, PretiumClient, PretiumConfig, parse_webhook};
