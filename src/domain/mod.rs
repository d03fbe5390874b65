//! Domain layer containing provider types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{
    ApiError, AppError, AppResult, ConfigError, ErrorCondition, TransportError, ValidationError,
};
pub use traits::{Transport, WebhookHandler};
pub use types::{
    ErrorDetail, ErrorResponse, ExchangeRateData, ExchangeRateRequest, ExchangeRateResponse,
    OnrampRequest, OnrampResponse, PayRequest, PayResponse, StatusData, StatusRequest,
    StatusResponse, SubmissionData, TransactionStatus, ValidationData, ValidationRequest,
    ValidationResponse, WebhookNotification,
};
