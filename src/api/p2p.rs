use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use super::types::*;
use crate::core::{MarketplaceConfig, PriceAlertError};

/// Anything that can report the current top sell price.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current top price, or `None` when it could not be determined.
    async fn highest_price(&self) -> Option<f64>;
}

pub struct P2pClient {
    client: Client,
    config: MarketplaceConfig,
}

impl P2pClient {
    pub fn new(config: MarketplaceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build marketplace HTTP client")?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!(
            "{}/api/merchant/search",
            self.config.base_url.trim_end_matches('/')
        )
    }

    pub async fn fetch_top_price(&self) -> Result<Option<f64>, PriceAlertError> {
        let limit = self.config.limit.to_string();
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("asset", self.config.asset.as_str()),
                ("fiat", self.config.fiat.as_str()),
                ("trade_type", self.config.trade_type.as_str()),
                ("limit", limit.as_str()),
                ("pay_type", self.config.pay_type.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PriceAlertError::Status { status, body });
        }

        let body = response.bytes().await?;
        let search: SearchResponse = serde_json::from_slice(&body)?;

        top_price(&search)
    }
}

#[async_trait]
impl PriceSource for P2pClient {
    async fn highest_price(&self) -> Option<f64> {
        match self.fetch_top_price().await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!("Error fetching price: {}", e);
                None
            }
        }
    }
}

/// Price of the first listing, or `None` when there are no listings.
pub fn top_price(response: &SearchResponse) -> Result<Option<f64>, PriceAlertError> {
    match response.first_listing() {
        Some(listing) => parse_price(&listing?.price).map(Some),
        None => Ok(None),
    }
}

pub fn parse_price(field: &PriceField) -> Result<f64, PriceAlertError> {
    let value = match field {
        PriceField::Number(n) => *n,
        PriceField::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| PriceAlertError::InvalidPrice(s.clone()))?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(PriceAlertError::InvalidPrice(value.to_string()));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_top_price_takes_first_listing() {
        let resp = response(r#"{"data": [{"price": "13250.5"}, {"price": "13000"}]}"#);
        assert_eq!(top_price(&resp).unwrap(), Some(13250.5));
    }

    #[test]
    fn test_top_price_below_threshold_value() {
        let resp = response(r#"{"data": [{"price": "13100"}]}"#);
        assert_eq!(top_price(&resp).unwrap(), Some(13100.0));
    }

    #[test]
    fn test_top_price_ignores_malformed_later_listings() {
        let resp = response(r#"{"data": [{"price": "13250.5"}, {"price": null}, {"price": true}]}"#);
        assert_eq!(top_price(&resp).unwrap(), Some(13250.5));
    }

    #[test]
    fn test_top_price_rejects_null_first_price() {
        let resp = response(r#"{"data": [{"price": null}, {"price": "13250.5"}]}"#);
        assert!(matches!(top_price(&resp), Err(PriceAlertError::Json(_))));
    }

    #[test]
    fn test_top_price_empty_listing() {
        let resp = response(r#"{"data": []}"#);
        assert_eq!(top_price(&resp).unwrap(), None);
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        let err = parse_price(&PriceField::Text("abc".to_string())).unwrap_err();
        assert!(matches!(err, PriceAlertError::InvalidPrice(ref s) if s == "abc"));
    }

    #[test]
    fn test_parse_price_rejects_negative_and_nan() {
        assert!(parse_price(&PriceField::Number(-1.0)).is_err());
        assert!(parse_price(&PriceField::Text("NaN".to_string())).is_err());
        assert!(parse_price(&PriceField::Text("inf".to_string())).is_err());
    }

    #[test]
    fn test_parse_price_trims_whitespace() {
        assert_eq!(
            parse_price(&PriceField::Text(" 13200 ".to_string())).unwrap(),
            13200.0
        );
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let client = P2pClient::new(MarketplaceConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.search_url(), "http://localhost:8080/api/merchant/search");
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_none() {
        let client = P2pClient::new(MarketplaceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.highest_price().await, None);
    }
}
