use anyhow::Result;
use p2p_price_alert::api::{P2pClient, TelegramClient};
use p2p_price_alert::core::logging::init_logging;
use p2p_price_alert::core::{shutdown, Config, SystemClock};
use p2p_price_alert::PriceMonitor;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config.log_level);

    tracing::info!("🚀 P2P price alert starting...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Watching {} {} via {} (threshold {}, every {}s)",
        config.marketplace.asset,
        config.marketplace.fiat,
        config.marketplace.pay_type,
        config.monitor.threshold_price,
        config.monitor.interval_secs
    );

    let source = Arc::new(P2pClient::new(config.marketplace.clone())?);
    let notifier = Arc::new(TelegramClient::new(config.telegram.clone()));

    let monitor = PriceMonitor::new(
        config.monitor.clone(),
        config.marketplace.clone(),
        source,
        notifier,
        Arc::new(SystemClock),
    );

    let (trigger, shutdown) = shutdown::channel();
    tokio::spawn(shutdown::listen_for_shutdown(trigger));

    if let Err(e) = monitor.run(shutdown).await {
        tracing::error!("Price monitor failed: {:#}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
