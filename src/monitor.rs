use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::alert::format_alert;
use crate::api::{Notifier, PriceSource};
use crate::core::{Clock, MarketplaceConfig, MonitorConfig, Shutdown};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckOutcome {
    NoPrice,
    BelowThreshold(f64),
    Alerted(f64),
}

/// Fetch, compare, notify, sleep.
pub struct PriceMonitor {
    config: MonitorConfig,
    marketplace: MarketplaceConfig,
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl PriceMonitor {
    pub fn new(
        config: MonitorConfig,
        marketplace: MarketplaceConfig,
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            marketplace,
            source,
            notifier,
            clock,
        }
    }

    pub fn should_alert(&self, price: Option<f64>) -> bool {
        matches!(price, Some(p) if p >= self.config.threshold_price)
    }

    pub async fn check_once(&self) -> Result<CheckOutcome> {
        let price = match self.source.highest_price().await {
            Some(price) => price,
            None => {
                tracing::info!("No price available this round");
                return Ok(CheckOutcome::NoPrice);
            }
        };

        tracing::info!(
            "Top {} price: {} {} (threshold {})",
            self.marketplace.asset,
            price,
            self.marketplace.fiat,
            self.config.threshold_price
        );

        if !self.should_alert(Some(price)) {
            return Ok(CheckOutcome::BelowThreshold(price));
        }

        let text = format_alert(&self.marketplace, price, self.clock.now());
        self.notifier
            .send_message(&text)
            .await
            .with_context(|| format!("Failed to deliver alert for price {}", price))?;

        tracing::info!("🚨 Alert sent for price {}", price);
        Ok(CheckOutcome::Alerted(price))
    }

    /// Polls until `shutdown` fires. Returns early only if an alert could not
    /// be delivered.
    pub async fn run(&self, shutdown: Shutdown) -> Result<()> {
        self.run_bounded(None, shutdown).await.map(|_| ())
    }

    /// Like [`run`](Self::run) but stops after `iterations` checks. No sleep
    /// follows the last one. Returns the number of checks performed.
    pub async fn run_iterations(&self, iterations: u64, shutdown: Shutdown) -> Result<u64> {
        self.run_bounded(Some(iterations), shutdown).await
    }

    async fn run_bounded(&self, limit: Option<u64>, shutdown: Shutdown) -> Result<u64> {
        let interval = Duration::from_secs(self.config.interval_secs);
        let mut completed = 0u64;

        tracing::info!(
            "Price monitor started (threshold {}, interval {}s)",
            self.config.threshold_price,
            self.config.interval_secs
        );

        loop {
            if limit.is_some_and(|n| completed >= n) || shutdown.is_triggered() {
                break;
            }

            self.check_once().await?;
            completed += 1;

            if limit.is_some_and(|n| completed >= n) {
                break;
            }

            tokio::select! {
                _ = self.clock.sleep(interval) => {}
                _ = shutdown.wait() => break,
            }
        }

        tracing::info!("Price monitor stopped after {} checks", completed);
        Ok(completed)
    }
}
