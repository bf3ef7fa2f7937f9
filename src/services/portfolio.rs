// src/services/portfolio.rs
use chrono::Utc;
use log::{info, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::market::MarketFeed;
use super::news::{build_query, HEADLINE_LIMIT};
use super::pricing::resolve_price;
use crate::models::{Asset, EnrichedAsset, NewsItem, PortfolioOverview, PortfolioTotals};

/// Rounds the exact binary value to cents, ties to even (0.125 -> 0.12,
/// 2.675 -> 2.67 since it is stored as 2.67499...).
fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .and_then(|d| d.round_dp(2).to_f64())
        .unwrap_or(value)
}

/// Percentage change relative to `cost`; undefined for non-positive cost.
fn pct_of(gain_loss: f64, cost: f64) -> Option<f64> {
    if cost > 0.0 {
        Some(gain_loss / cost * 100.0)
    } else {
        None
    }
}

/// Values a single asset. Uses the cost basis when there is no live price.
pub async fn enrich_asset(feed: &dyn MarketFeed, asset: &Asset) -> EnrichedAsset {
    let resolution = resolve_price(feed, &asset.asset_type, &asset.symbol, asset.cost_basis).await;

    let effective_price = resolution.price.unwrap_or(asset.cost_basis);
    let market_value = effective_price * asset.quantity;
    let position_cost = asset.cost_basis * asset.quantity;
    let gain_loss = market_value - position_cost;

    EnrichedAsset {
        id: asset.id.clone(),
        asset_type: asset.asset_type.clone(),
        symbol: asset.symbol.to_uppercase(),
        quantity: asset.quantity,
        cost_basis: asset.cost_basis,
        account: asset.account.clone(),
        current_price: resolution.price,
        market_value,
        gain_loss,
        gain_loss_pct: pct_of(gain_loss, position_cost),
        pricing_source: resolution.source.to_string(),
        notes: resolution.note.map(str::to_string),
    }
}

/// Prices every asset in order, fetches news once per symbol and totals the
/// portfolio. Upstream failures degrade individual fields, never the result.
pub async fn build_overview(feed: &dyn MarketFeed, assets: &[Asset]) -> PortfolioOverview {
    info!("Building portfolio overview for {} assets", assets.len());

    let mut enriched = Vec::with_capacity(assets.len());
    let mut news_by_symbol: BTreeMap<String, Vec<NewsItem>> = BTreeMap::new();
    let mut total_cost = 0.0;
    let mut total_value = 0.0;

    for asset in assets {
        let valued = enrich_asset(feed, asset).await;
        total_cost += asset.cost_basis * asset.quantity;
        total_value += valued.market_value;
        enriched.push(valued);

        let symbol_key = asset.symbol.to_uppercase();
        if !news_by_symbol.contains_key(&symbol_key) {
            let query = build_query(&asset.asset_type, &symbol_key);
            let headlines = match feed.headlines(&query, HEADLINE_LIMIT).await {
                Ok(items) => items,
                Err(e) => {
                    warn!("News lookup for {} failed: {}", symbol_key, e);
                    Vec::new()
                }
            };
            news_by_symbol.insert(symbol_key, headlines);
        }
    }

    let total_gain_loss = total_value - total_cost;
    let totals = PortfolioTotals {
        cost_basis: round2(total_cost),
        market_value: round2(total_value),
        gain_loss: round2(total_gain_loss),
        gain_loss_pct: pct_of(total_gain_loss, total_cost).map(round2),
    };
    info!("Portfolio totals: {:?}", totals);

    PortfolioOverview {
        as_of: Utc::now().to_rfc3339(),
        totals,
        assets: enriched,
        news_by_symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stub::{StubFeed, StubQuote};

    fn asset(id: &str, asset_type: &str, symbol: &str, quantity: f64, cost_basis: f64) -> Asset {
        Asset {
            id: id.to_string(),
            asset_type: asset_type.to_string(),
            symbol: symbol.to_string(),
            quantity,
            cost_basis,
            account: None,
        }
    }

    fn headline(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: format!("https://news.example.com/{}", title),
            published_at: "Fri, 15 Mar 2024 09:30:00 GMT".to_string(),
            source: "Reuters".to_string(),
        }
    }

    #[tokio::test]
    async fn cash_position_has_no_gain() {
        let feed = StubFeed::default();
        let overview = build_overview(&feed, &[asset("1", "cash", "usd", 100.0, 1.0)]).await;

        assert_eq!(
            overview.totals,
            PortfolioTotals {
                cost_basis: 100.0,
                market_value: 100.0,
                gain_loss: 0.0,
                gain_loss_pct: Some(0.0),
            }
        );
        let cash = &overview.assets[0];
        assert_eq!(cash.symbol, "USD");
        assert_eq!(cash.pricing_source, "static");
        assert_eq!(cash.current_price, Some(1.0));
    }

    #[tokio::test]
    async fn live_quotes_drive_market_value() {
        let feed = StubFeed::default().with_stock(StubQuote::Price(185.4));
        let enriched = enrich_asset(&feed, &asset("a", "stock", "aapl", 3.0, 150.0)).await;

        assert_eq!(enriched.current_price, Some(185.4));
        assert_eq!(enriched.market_value, 185.4 * 3.0);
        assert_eq!(enriched.gain_loss, 185.4 * 3.0 - 150.0 * 3.0);
        assert_eq!(enriched.gain_loss_pct, Some((185.4 * 3.0 - 450.0) / 450.0 * 100.0));
        assert_eq!(enriched.notes, None);
    }

    #[tokio::test]
    async fn missing_quotes_fall_back_to_cost_basis() {
        let feed = StubFeed::default().with_stock(StubQuote::Down);
        let enriched = enrich_asset(&feed, &asset("a", "stock", "AAPL", 2.0, 120.0)).await;

        assert_eq!(enriched.current_price, None);
        assert_eq!(enriched.market_value, 240.0);
        assert_eq!(enriched.gain_loss, 0.0);
        assert_eq!(enriched.pricing_source, "stooq");
        assert_eq!(enriched.notes.as_deref(), Some("Quote service unavailable"));
    }

    #[tokio::test]
    async fn zero_cost_position_has_no_percentage() {
        let feed = StubFeed::default().with_crypto(StubQuote::Price(2.0));
        let overview = build_overview(&feed, &[asset("gift", "crypto", "DOGE", 10.0, 0.0)]).await;

        let doge = &overview.assets[0];
        assert_eq!(doge.market_value, 20.0);
        assert_eq!(doge.gain_loss, 20.0);
        assert_eq!(doge.gain_loss_pct, None);
        assert_eq!(overview.totals.gain_loss_pct, None);
        assert_eq!(overview.totals.market_value, 20.0);
    }

    #[tokio::test]
    async fn totals_are_rounded_but_assets_are_not() {
        let feed = StubFeed::default().with_stock(StubQuote::Price(10.333));
        let assets = [
            asset("a", "stock", "ABC", 3.0, 10.0),
            asset("b", "bond", "T10", 1.0, 99.999),
        ];
        let overview = build_overview(&feed, &assets).await;

        assert_eq!(overview.assets[0].market_value, 10.333 * 3.0);
        assert_eq!(overview.totals.cost_basis, 130.0);
        assert_eq!(overview.totals.market_value, 131.0);
        assert_eq!(overview.totals.gain_loss, 1.0);
        assert_eq!(overview.totals.gain_loss_pct, Some(0.77));
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(10.125), 10.12);
        assert_eq!(round2(-1.005), -1.0);
        assert_eq!(round2(1234.5678), 1234.57);
    }

    #[tokio::test]
    async fn half_cent_totals_round_like_cost_basis_entries() {
        let feed = StubFeed::default();
        for (cost, rounded) in [(0.125, 0.12), (2.675, 2.67), (10.125, 10.12)] {
            let overview = build_overview(&feed, &[asset("h", "real_estate", "HOME", 1.0, cost)]).await;
            assert_eq!(overview.totals.cost_basis, rounded);
            assert_eq!(overview.totals.market_value, rounded);
            assert_eq!(overview.assets[0].market_value, cost);
        }
    }

    #[tokio::test]
    async fn news_is_fetched_once_per_symbol() {
        let feed = StubFeed::default()
            .with_crypto(StubQuote::Price(64_000.0))
            .with_news(vec![headline("a"), headline("b")]);
        let assets = [
            asset("1", "crypto", "btc", 0.5, 30_000.0),
            asset("2", "crypto", "BTC", 0.25, 40_000.0),
            asset("3", "real_estate", "Austin", 1.0, 400_000.0),
        ];
        let overview = build_overview(&feed, &assets).await;

        assert_eq!(feed.news_queries(), vec!["BTC crypto", "AUSTIN real estate market"]);
        assert_eq!(overview.news_by_symbol.len(), 2);
        assert_eq!(overview.news_by_symbol["BTC"].len(), 2);
        assert_eq!(overview.assets.len(), 3);
        assert_eq!(overview.assets[1].id, "2");
    }

    #[tokio::test]
    async fn news_outage_yields_empty_lists() {
        let feed = StubFeed::default().with_news_down();
        let overview = build_overview(&feed, &[asset("1", "stock", "MSFT", 1.0, 300.0)]).await;

        assert_eq!(overview.news_by_symbol.get("MSFT"), Some(&Vec::new()));
        assert_eq!(overview.assets[0].notes.as_deref(), Some("No quote found"));
    }

    #[tokio::test]
    async fn empty_portfolio() {
        let feed = StubFeed::default();
        let overview = build_overview(&feed, &[]).await;
        assert!(overview.assets.is_empty());
        assert!(overview.news_by_symbol.is_empty());
        assert_eq!(overview.totals.cost_basis, 0.0);
        assert_eq!(overview.totals.gain_loss_pct, None);
        assert!(chrono::DateTime::parse_from_rfc3339(&overview.as_of).is_ok());
    }
}
