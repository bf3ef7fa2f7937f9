// src/services/market.rs
use async_trait::async_trait;
use reqwest::Client;

use super::error::FeedResult;
use super::{coingecko, news, stooq};
use crate::config::FeedConfig;
use crate::models::NewsItem;

/// Upstream data the valuation pipeline depends on. Each call is a single
/// attempt; `Ok(None)` means the provider had nothing for the symbol.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn stock_quote(&self, symbol: &str) -> FeedResult<Option<f64>>;

    async fn crypto_quote(&self, symbol: &str) -> FeedResult<Option<f64>>;

    async fn headlines(&self, query: &str, limit: usize) -> FeedResult<Vec<NewsItem>>;
}

/// Talks to Stooq, CoinGecko and Google News over one shared HTTP client.
pub struct LiveMarketFeed {
    client: Client,
    config: FeedConfig,
}

impl LiveMarketFeed {
    pub fn new(config: FeedConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl MarketFeed for LiveMarketFeed {
    async fn stock_quote(&self, symbol: &str) -> FeedResult<Option<f64>> {
        stooq::fetch_latest_close(&self.client, &self.config.stooq_url, symbol).await
    }

    async fn crypto_quote(&self, symbol: &str) -> FeedResult<Option<f64>> {
        coingecko::fetch_usd_price(&self.client, &self.config.coingecko_url, symbol).await
    }

    async fn headlines(&self, query: &str, limit: usize) -> FeedResult<Vec<NewsItem>> {
        news::fetch_headlines(&self.client, &self.config.news_url, query, limit).await
    }
}
