// src/services/pricing.rs
use log::{debug, warn};

use super::error::FeedResult;
use super::market::MarketFeed;
use super::{coingecko, stooq};
use crate::models::AssetClass;

pub const SOURCE_STATIC: &str = "static";
pub const SOURCE_COST_BASIS: &str = "user_cost_basis";

pub const NOTE_NO_QUOTE: &str = "No quote found";
pub const NOTE_UNSUPPORTED_CRYPTO: &str = "Unsupported crypto symbol";
pub const NOTE_UNAVAILABLE: &str = "Quote service unavailable";
pub const NOTE_CASH: &str = "Cash is valued at par in USD";
pub const NOTE_REAL_ESTATE: &str = "Using cost basis until valuation feed is connected";
pub const NOTE_BOND: &str = "Using cost basis until bond quote feed is connected";
pub const NOTE_FALLBACK: &str = "Fallback valuation used";

/// Result of a single live quote lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuoteOutcome {
    Price(f64),
    NoData,
    Unavailable,
}

impl From<FeedResult<Option<f64>>> for QuoteOutcome {
    fn from(result: FeedResult<Option<f64>>) -> Self {
        match result {
            Ok(Some(price)) => QuoteOutcome::Price(price),
            Ok(None) => QuoteOutcome::NoData,
            Err(e) => {
                warn!("Quote lookup failed: {}", e);
                QuoteOutcome::Unavailable
            }
        }
    }
}

/// How an asset was valued. `price` is `None` when no live quote was found.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResolution {
    pub price: Option<f64>,
    pub source: &'static str,
    pub note: Option<&'static str>,
}

impl PriceResolution {
    fn fixed(price: f64, source: &'static str, note: &'static str) -> Self {
        PriceResolution {
            price: Some(price),
            source,
            note: Some(note),
        }
    }

    /// Maps a live lookup onto (price, source, note).
    pub fn from_quote(outcome: QuoteOutcome, source: &'static str, no_data_note: &'static str) -> Self {
        match outcome {
            QuoteOutcome::Price(price) => PriceResolution {
                price: Some(price),
                source,
                note: None,
            },
            QuoteOutcome::NoData => PriceResolution {
                price: None,
                source,
                note: Some(no_data_note),
            },
            QuoteOutcome::Unavailable => PriceResolution {
                price: None,
                source,
                note: Some(NOTE_UNAVAILABLE),
            },
        }
    }
}

/// Prices one asset according to its class. Every class yields a
/// resolution; upstream failures only show up in `note`.
pub async fn resolve_price(
    feed: &dyn MarketFeed,
    asset_type: &str,
    symbol: &str,
    cost_basis: f64,
) -> PriceResolution {
    let resolution = match AssetClass::parse(asset_type) {
        AssetClass::Stock | AssetClass::Fund => {
            let outcome = QuoteOutcome::from(feed.stock_quote(symbol).await);
            PriceResolution::from_quote(outcome, stooq::PROVIDER, NOTE_NO_QUOTE)
        }
        AssetClass::Crypto => {
            let outcome = QuoteOutcome::from(feed.crypto_quote(symbol).await);
            PriceResolution::from_quote(outcome, coingecko::PROVIDER, NOTE_UNSUPPORTED_CRYPTO)
        }
        AssetClass::Cash => PriceResolution::fixed(1.0, SOURCE_STATIC, NOTE_CASH),
        AssetClass::RealEstate => PriceResolution::fixed(cost_basis, SOURCE_COST_BASIS, NOTE_REAL_ESTATE),
        AssetClass::Bond => PriceResolution::fixed(cost_basis, SOURCE_COST_BASIS, NOTE_BOND),
        AssetClass::Other => PriceResolution::fixed(cost_basis, SOURCE_COST_BASIS, NOTE_FALLBACK),
    };
    debug!("Resolved {} {} -> {:?}", asset_type, symbol, resolution);
    resolution
}
