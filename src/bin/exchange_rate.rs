use anyhow::{Context, Result};
use dotenvy::dotenv;
use pretium_client::domain::ExchangeRateRequest;
use pretium_client::{CallContext, PretiumClient, PretiumConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let currencies: Vec<String> = std::env::args().skip(1).collect();
    if currencies.is_empty() {
        anyhow::bail!("usage: exchange_rate <CURRENCY_CODE>...  (e.g. exchange_rate KES UGX)");
    }

    let config = PretiumConfig::from_env().context("Failed to load Pretium configuration")?;
    let client = PretiumClient::new(config).context("Failed to create Pretium client")?;
    let ctx = CallContext::background();

    for currency in currencies {
        let rate = client
            .exchange_rate(&ctx, &ExchangeRateRequest::new(currency.clone()))
            .await
            .with_context(|| format!("Exchange rate lookup failed for {}", currency))?;

        println!(
            "{:<5} buying: {:>12}  selling: {:>12}",
            currency, rate.data.buying_rate, rate.data.selling_rate
        );
    }

    Ok(())
}
