//! Off-ramp operations: crypto in, fiat out.

use tracing::instrument;

use crate::domain::types::WithCallback;
use crate::domain::{
    AppResult, ExchangeRateRequest, ExchangeRateResponse, PayRequest, PayResponse, StatusRequest,
    StatusResponse, ValidationRequest, ValidationResponse,
};

use super::client::PretiumClient;
use super::context::CallContext;

impl PretiumClient {
    /// Current buying and selling rate for a fiat currency
    #[instrument(skip(self, ctx, input), fields(currency = %input.currency_code))]
    pub async fn exchange_rate(
        &self,
        ctx: &CallContext,
        input: &ExchangeRateRequest,
    ) -> AppResult<ExchangeRateResponse> {
        self.post(ctx, "exchange-rate", input).await
    }

    /// Resolve the registered name behind a payout shortcode
    #[instrument(skip(self, ctx, input), fields(kind = %input.kind, network = %input.mobile_network))]
    pub async fn validation(
        &self,
        ctx: &CallContext,
        input: &ValidationRequest,
    ) -> AppResult<ValidationResponse> {
        self.post(ctx, "validation", input).await
    }

    /// Submit an off-ramp payout backed by an on-chain transfer to the
    /// settlement address. The configured callback URL is attached.
    #[instrument(skip(self, ctx, input), fields(chain = %input.chain, tx_hash = %input.transaction_hash))]
    pub async fn pay(&self, ctx: &CallContext, input: &PayRequest) -> AppResult<PayResponse> {
        let payload = WithCallback {
            body: input,
            callback_url: self.wire_callback_url(),
        };
        self.post(ctx, "pay", &payload).await
    }

    /// Poll the state of a previously submitted transaction
    #[instrument(skip(self, ctx, input), fields(transaction_code = %input.transaction_code))]
    pub async fn status(
        &self,
        ctx: &CallContext,
        input: &StatusRequest,
    ) -> AppResult<StatusResponse> {
        self.post(ctx, "status", input).await
    }
}
