//! On-ramp operation: fiat in, crypto out.

use tracing::instrument;

use crate::domain::types::WithCallback;
use crate::domain::{AppResult, OnrampRequest, OnrampResponse};

use super::client::PretiumClient;
use super::context::CallContext;

impl PretiumClient {
    /// Collect `currency_code` fiat from a mobile wallet and credit the
    /// purchased asset to `input.address`.
    #[instrument(skip(self, ctx, input), fields(currency = %currency_code, chain = %input.chain, asset = %input.asset))]
    pub async fn onramp(
        &self,
        ctx: &CallContext,
        currency_code: &str,
        input: &OnrampRequest,
    ) -> AppResult<OnrampResponse> {
        let payload = WithCallback {
            body: input,
            callback_url: self.wire_callback_url(),
        };
        self.post(ctx, &format!("onramp/{}", currency_code), &payload)
            .await
    }
}
