//! Error taxonomy for provider calls.
//!
//! Failures fall into three families:
//!
//! - [`TransportError`]: the request never produced an HTTP response
//!   (DNS, connect, timeout, cancellation).
//! - [`ApiError`]: the provider answered with a structured `{code, message}`
//!   error body. These can be classified with [`ApiError::matches`].
//! - Decoding failures: the provider answered but the body could not be
//!   turned into the expected shape.

use std::fmt;

use thiserror::Error;

/// Result alias used across the crate.
pub type AppResult<T> = Result<T, AppError>;

/// Top-level error returned by every client operation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Pretium API error: {0}")]
    Api(#[from] ApiError),

    /// Error status whose body was not a usable `{code, message}` object.
    #[error("{}", unexpected_status_message(.status, .body.as_deref()))]
    UnexpectedStatus {
        status: String,
        body: Option<String>,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn unexpected_status_message(status: &str, body: Option<&str>) -> String {
    match body {
        Some(body) => format!("Pretium server error: status={} body={}", status, body),
        None => format!("Pretium server error: status={}", status),
    }
}

impl AppError {
    /// Returns true when this is a provider error matching `condition`.
    ///
    /// Every non-API failure returns false.
    pub fn matches(&self, condition: ErrorCondition) -> bool {
        match self {
            Self::Api(api_err) => api_err.matches(condition),
            _ => false,
        }
    }

    /// Borrow the structured provider error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api_err) => Some(api_err),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Cancelled))
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::Transport(TransportError::DeadlineExceeded))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Failures below the HTTP layer. Surfaced as-is, never reinterpreted.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

/// Structured error reported by the provider.
///
/// `code` is always populated once returned to a caller: when the provider
/// omits it, the HTTP status code is used instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Check whether this error's message describes `condition`.
    ///
    /// The provider has no stable error codes for these cases, so the match
    /// is done on the message text, case-insensitively.
    pub fn matches(&self, condition: ErrorCondition) -> bool {
        condition.matches_message(&self.message)
    }

    /// The first condition (in declaration order) this error matches.
    pub fn condition(&self) -> Option<ErrorCondition> {
        ErrorCondition::classify(&self.message)
    }
}

/// Semantic failure conditions recognised from provider error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCondition {
    /// The transaction hash was already submitted.
    TransactionAlreadyProcessed,
    /// The on-chain amount does not match the quoted USD equivalent.
    AmountMismatch,
    /// The requested amount is below the provider minimum.
    AmountBelowMinimum,
}

impl ErrorCondition {
    /// All conditions, in classification priority order.
    pub const ALL: [ErrorCondition; 3] = [
        Self::TransactionAlreadyProcessed,
        Self::AmountMismatch,
        Self::AmountBelowMinimum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransactionAlreadyProcessed => "transaction_already_processed",
            Self::AmountMismatch => "amount_mismatch",
            Self::AmountBelowMinimum => "amount_below_minimum",
        }
    }

    /// Apply this condition's matching rule to a raw provider message.
    pub fn matches_message(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        match self {
            Self::TransactionAlreadyProcessed => message.contains("already been processed"),
            Self::AmountMismatch => {
                message.contains("mismatch equivalent amount in usd")
                    || message.contains("mismatch equivalent amount")
            }
            Self::AmountBelowMinimum => message.starts_with("the amount field must be at least"),
        }
    }

    /// First match wins, in the order of [`ErrorCondition::ALL`].
    pub fn classify(message: &str) -> Option<ErrorCondition> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.matches_message(message))
    }
}

impl fmt::Display for ErrorCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Local validation failure, from [`validator::Validate`] or the receiver.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Multiple validation errors: {0}")]
    Multiple(String),
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        if field_errors.len() == 1 {
            if let Some((field, errs)) = field_errors.iter().next() {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                return Self::InvalidField {
                    field: field.to_string(),
                    message,
                };
            }
        }
        Self::Multiple(errors.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.into())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
