// src/services/stub.rs
//! Canned `MarketFeed` for unit tests.
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::error::{FeedError, FeedResult};
use super::market::MarketFeed;
use crate::models::NewsItem;

#[derive(Debug, Clone, Copy)]
pub enum StubQuote {
    Price(f64),
    Missing,
    Down,
}

impl StubQuote {
    fn answer(self) -> FeedResult<Option<f64>> {
        match self {
            StubQuote::Price(p) => Ok(Some(p)),
            StubQuote::Missing => Ok(None),
            StubQuote::Down => Err(FeedError::malformed("stub", "service down")),
        }
    }
}

pub struct StubFeed {
    stock: StubQuote,
    crypto: StubQuote,
    news: Option<Vec<NewsItem>>,
    quote_calls: AtomicUsize,
    news_queries: Mutex<Vec<String>>,
}

impl Default for StubFeed {
    fn default() -> Self {
        StubFeed {
            stock: StubQuote::Missing,
            crypto: StubQuote::Missing,
            news: Some(Vec::new()),
            quote_calls: AtomicUsize::new(0),
            news_queries: Mutex::new(Vec::new()),
        }
    }
}

impl StubFeed {
    pub fn with_stock(mut self, quote: StubQuote) -> Self {
        self.stock = quote;
        self
    }

    pub fn with_crypto(mut self, quote: StubQuote) -> Self {
        self.crypto = quote;
        self
    }

    pub fn with_news(mut self, items: Vec<NewsItem>) -> Self {
        self.news = Some(items);
        self
    }

    pub fn with_news_down(mut self) -> Self {
        self.news = None;
        self
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn news_queries(&self) -> Vec<String> {
        self.news_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketFeed for StubFeed {
    async fn stock_quote(&self, _symbol: &str) -> FeedResult<Option<f64>> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.stock.answer()
    }

    async fn crypto_quote(&self, _symbol: &str) -> FeedResult<Option<f64>> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.crypto.answer()
    }

    async fn headlines(&self, query: &str, limit: usize) -> FeedResult<Vec<NewsItem>> {
        self.news_queries.lock().unwrap().push(query.to_string());
        match &self.news {
            Some(items) => Ok(items.iter().take(limit).cloned().collect()),
            None => Err(FeedError::malformed("stub", "feed down")),
        }
    }
}
