//! Request and response shapes for the Pretium API, with validation support.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// OFF-RAMP
// ============================================================================

/// Body of `POST /v1/exchange-rate`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExchangeRateRequest {
    /// ISO currency code, e.g. `KES`
    #[validate(length(min = 1, message = "Currency code is required"))]
    pub currency_code: String,
}

impl ExchangeRateRequest {
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRateData {
    #[serde(default)]
    pub buying_rate: String,
    #[serde(default)]
    pub selling_rate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRateResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: ExchangeRateData,
}

/// Body of `POST /v1/validation`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidationRequest {
    /// Payout channel type, e.g. `MOBILE`
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
    #[validate(length(min = 1, message = "Shortcode is required"))]
    pub shortcode: String,
    #[validate(length(min = 1, message = "Mobile network is required"))]
    pub mobile_network: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationData {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub shortcode: String,
    #[serde(default)]
    pub public_name: String,
    #[serde(default)]
    pub mobile_network: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: ValidationData,
}

/// Body of `POST /v1/pay`
///
/// The client adds the configured `callback_url` before sending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PayRequest {
    /// Hash of the on-chain transfer to the settlement address
    #[validate(length(min = 1, message = "Transaction hash is required"))]
    pub transaction_hash: String,
    /// Fiat amount as a decimal string
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
    #[validate(length(min = 1, message = "Shortcode is required"))]
    pub shortcode: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
    #[validate(length(min = 1, message = "Chain is required"))]
    pub chain: String,
}

/// Acknowledgement data shared by pay and onramp submissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubmissionData {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub transaction_code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: SubmissionData,
}

/// Body of `POST /v1/status`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusRequest {
    #[validate(length(min = 1, message = "Transaction code is required"))]
    pub transaction_code: String,
}

impl StatusRequest {
    pub fn new(transaction_code: impl Into<String>) -> Self {
        Self {
            transaction_code: transaction_code.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusData {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub transaction_code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub amount_in_usd: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub shortcode: String,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub public_name: Option<String>,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub asset: String,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub is_released: bool,
    #[serde(default)]
    pub created_at: String,
}

impl StatusData {
    pub fn transaction_status(&self) -> TransactionStatus {
        TransactionStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: StatusData,
}

// ============================================================================
// ON-RAMP
// ============================================================================

/// Body of `POST /v1/onramp/{currency_code}`
///
/// The client adds the configured `callback_url` before sending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OnrampRequest {
    /// Mobile number debited for the fiat leg
    #[validate(length(min = 1, message = "Shortcode is required"))]
    pub shortcode: String,
    #[validate(
        custom(function = "validate_finite_amount"),
        range(exclusive_min = 0.0, message = "Amount must be greater than 0")
    )]
    pub amount: f64,
    #[validate(length(min = 1, message = "Mobile network is required"))]
    pub mobile_network: String,
    #[validate(length(min = 1, message = "Chain is required"))]
    pub chain: String,
    #[validate(length(min = 1, message = "Asset is required"))]
    pub asset: String,
    /// Wallet address credited with the purchased asset
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

/// NaN slips past a `range` check and serializes as `null`.
fn validate_finite_amount(amount: f64) -> Result<(), validator::ValidationError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("finite")
            .with_message("Amount must be a finite number".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnrampResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: SubmissionData,
}

/// Outgoing body for pay/onramp: the request fields plus the callback URL.
#[derive(Debug, Serialize)]
pub(crate) struct WithCallback<'a, T: Serialize> {
    #[serde(flatten)]
    pub body: &'a T,
    pub callback_url: &'a str,
}

// ============================================================================
// WEBHOOKS
// ============================================================================

/// Notification pushed by the provider to the configured callback URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookNotification {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub transaction_code: String,
    #[serde(default)]
    pub message: String,
}

impl WebhookNotification {
    pub fn transaction_status(&self) -> TransactionStatus {
        TransactionStatus::parse(&self.status)
    }
}

/// Transaction status as reported in status responses and webhooks.
///
/// The provider reports status as free text; unrecognised values are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Complete,
    Failed,
    Other(String),
}

impl TransactionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" | "processing" => Self::Pending,
            "complete" | "completed" | "success" => Self::Complete,
            "failed" | "reversed" => Self::Failed,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Whether no further status changes are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

// ============================================================================
// RECEIVER RESPONSES
// ============================================================================

/// Standard error response returned by the webhook receiver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error type identifier
    pub r#type: String,
    /// Human-readable error message
    pub message: String,
}
