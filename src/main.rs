//! Webhook receiver entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pretium_client::api::{WEBHOOK_PATH, create_router};
use pretium_client::app::{AppState, NotificationService, ServerConfig};
use pretium_client::{PretiumClient, PretiumConfig};

const DEFAULT_LOG_FILTER: &str = "info,pretium_client=debug,tower_http=debug";

/// `LOG_FORMAT=json` switches to one JSON object per line for log shippers.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Resolves with the name of the signal that stopped the receiver.
#[cfg(unix)]
async fn wait_for_shutdown() -> std::io::Result<&'static str> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
        res = signal::ctrl_c() => res.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> std::io::Result<&'static str> {
    signal::ctrl_c().await?;
    Ok("Ctrl+C")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    info!("Pretium webhook receiver v{}", env!("CARGO_PKG_VERSION"));

    let pretium_config = PretiumConfig::from_env().context("Invalid Pretium configuration")?;
    let server_config = ServerConfig::from_env().context("Invalid server configuration")?;

    match pretium_config.callback_url.as_deref() {
        Some(url) => info!("   ✓ Callback URL: {}", url),
        None => info!("   ○ No PRETIUM_CALLBACK_URL set (provider will not know where to call)"),
    }

    let client = PretiumClient::new(pretium_config).context("Failed to create Pretium client")?;
    info!("   ✓ Pretium client created ({})", client.config().base_url);

    let service = NotificationService::new(client, server_config.confirm_webhook_status);
    if server_config.confirm_webhook_status {
        info!("   ✓ Notifications confirmed via status endpoint");
    } else {
        info!("   ○ Notification confirmation disabled");
    }

    let app_state = AppState::new(Arc::new(service))
        .with_webhook_secret(server_config.webhook_secret.clone());

    if app_state.webhook_secret.is_some() {
        info!("   ✓ Webhook secret configured");
    } else {
        info!("   ○ Webhook secret not configured (webhook auth disabled)");
    }

    let router = create_router(Arc::new(app_state));

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🚀 Receiving webhooks on http://{}{}", addr, WEBHOOK_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            match wait_for_shutdown().await {
                Ok(name) => info!(signal = name, "Draining in-flight webhooks"),
                Err(e) => error!(error = %e, "Signal listener failed, shutting down"),
            }
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
