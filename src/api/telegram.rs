use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

#[cfg(test)]
use mockall::automock;

use super::types::SendMessageResponse;
use crate::core::{PriceAlertError, TelegramConfig};

/// Delivers a text message somewhere a human will see it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<()>;
}

pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.base_url.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    /// Posts `text` to the configured chat. Only transport failures are
    /// errors; a rejected message is logged and otherwise ignored.
    pub async fn post_message(&self, text: &str) -> Result<(), PriceAlertError> {
        let response = self
            .client
            .post(self.send_message_url())
            .form(&[("chat_id", self.config.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(|e| PriceAlertError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let description = response
                .json::<SendMessageResponse>()
                .await
                .ok()
                .and_then(|r| r.description)
                .unwrap_or_default();
            tracing::warn!("Telegram rejected message: {} {}", status, description);
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<()> {
        self.post_message(text)
            .await
            .context("Failed to send Telegram message")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_url() {
        let mut config = TelegramConfig::new("123:abc", "42");
        config.base_url = "http://localhost:9000/".to_string();
        let client = TelegramClient::new(config);
        assert_eq!(
            client.send_message_url(),
            "http://localhost:9000/bot123:abc/sendMessage"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_without_token() {
        let mut config = TelegramConfig::new("secret-token", "42");
        config.base_url = "http://127.0.0.1:1".to_string();
        let client = TelegramClient::new(config);

        let err = client.send_message("hello").await.unwrap_err();
        assert!(!format!("{:#}", err).contains("secret-token"));
    }
}
