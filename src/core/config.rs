use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fmt;

use crate::core::error::PriceAlertError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub marketplace: MarketplaceConfig,
    pub monitor: MonitorConfig,
    pub log_level: String,
}

#[derive(Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub base_url: String,
}

// Token stays out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            base_url: "https://api.telegram.org".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    pub base_url: String,
    pub asset: String,
    pub fiat: String,
    pub trade_type: String,
    pub pay_type: String,
    pub limit: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://p2p.cryptobot.biz".to_string(),
            asset: "USDT".to_string(),
            fiat: "UZS".to_string(),
            trade_type: "SELL".to_string(),
            pay_type: "Uzcard".to_string(),
            limit: 10,
            request_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/90.0.4430.93 Safari/537.36"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    pub threshold_price: f64,
    pub interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold_price: 13200.0,
            interval_secs: 1200,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `TELEGRAM_TOKEN` and
    /// `CHAT_ID` are required; everything else falls back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(PriceAlertError::MissingEnv(key))
        };

        Ok(Config {
            telegram: TelegramConfig::new(required("TELEGRAM_TOKEN")?, required("CHAT_ID")?),
            marketplace: MarketplaceConfig::default(),
            monitor: MonitorConfig::default(),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}
