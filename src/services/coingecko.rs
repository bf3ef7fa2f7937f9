// src/services/coingecko.rs
use log::{debug, info};
use reqwest::Client;
use serde_json::Value;

use super::error::{FeedError, FeedResult};

pub const PROVIDER: &str = "coingecko";

/// Exchange tickers we know how to price, mapped to CoinGecko coin ids.
const COIN_IDS: [(&str, &str); 11] = [
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("ADA", "cardano"),
    ("XRP", "ripple"),
    ("DOGE", "dogecoin"),
    ("BNB", "binancecoin"),
    ("AVAX", "avalanche-2"),
    ("DOT", "polkadot"),
    ("LINK", "chainlink"),
    ("MATIC", "matic-network"),
];

pub fn coin_id(symbol: &str) -> Option<&'static str> {
    let symbol = symbol.trim().to_uppercase();
    COIN_IDS
        .iter()
        .find(|(ticker, _)| *ticker == symbol)
        .map(|(_, id)| *id)
}

/// Fetch the USD price of a coin. Unsupported symbols return `Ok(None)`
/// without touching the network.
pub async fn fetch_usd_price(client: &Client, base_url: &str, symbol: &str) -> FeedResult<Option<f64>> {
    let Some(id) = coin_id(symbol) else {
        debug!("No CoinGecko id for symbol {}", symbol);
        return Ok(None);
    };
    info!("Fetching CoinGecko price for {} ({})", symbol, id);

    let payload: Value = client
        .get(base_url)
        .query(&[("ids", id), ("vs_currencies", "usd")])
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(FeedError::transport(PROVIDER))?
        .json()
        .await
        .map_err(|e| FeedError::malformed(PROVIDER, e.to_string()))?;

    let price = extract_usd_price(&payload, id);
    debug!("CoinGecko price for {}: {:?}", id, price);
    Ok(price)
}

/// Reads `payload[id]["usd"]`, accepting numbers and numeric strings.
pub fn extract_usd_price(payload: &Value, id: &str) -> Option<f64> {
    let price = match payload.get(id)?.get("usd")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    price.filter(|price| price.is_finite())
}
