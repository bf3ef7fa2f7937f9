// src/services/stooq.rs
use csv::ReaderBuilder;
use log::{debug, info};
use reqwest::Client;

use super::error::{FeedError, FeedResult};

pub const PROVIDER: &str = "stooq";

/// Suffix of the primary (US) exchange on Stooq.
const DEFAULT_MARKET_SUFFIX: &str = ".us";

/// Column of the Close price in the `sd2t2ohlcv` layout:
/// Symbol, Date, Time, Open, High, Low, Close, Volume.
const CLOSE_COLUMN: usize = 6;
const MIN_FIELDS: usize = 7;

/// Lower-cases the ticker and qualifies bare tickers with the US market
/// suffix, e.g. `AAPL` -> `aapl.us`, `vod.uk` stays as is.
pub fn normalize_ticker(symbol: &str) -> String {
    let normalized = symbol.trim().to_lowercase();
    if normalized.contains('.') {
        normalized
    } else {
        format!("{}{}", normalized, DEFAULT_MARKET_SUFFIX)
    }
}

/// Fetch the latest close for a ticker via the CSV endpoint.
///
/// `Ok(None)` means Stooq answered but had no usable quote (unknown ticker
/// comes back as `N/D`); transport problems are reported as `FeedError`.
pub async fn fetch_latest_close(client: &Client, base_url: &str, symbol: &str) -> FeedResult<Option<f64>> {
    let ticker = normalize_ticker(symbol);
    let url = format!("{}?s={}&f=sd2t2ohlcv&h&e=csv", base_url, ticker);
    info!("Fetching Stooq quote CSV from URL: {}", url);

    let csv_text = client
        .get(&url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(FeedError::transport(PROVIDER))?
        .text()
        .await
        .map_err(FeedError::transport(PROVIDER))?;

    let price = parse_quote_csv(&csv_text);
    debug!("Stooq close for {}: {:?}", ticker, price);
    Ok(price)
}

/// Extracts the close price from a header + data row quote response.
pub fn parse_quote_csv(csv_text: &str) -> Option<f64> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.trim().as_bytes());

    // First data row is the quote for the requested symbol
    let row = rdr.records().next()?.ok()?;
    if row.len() < MIN_FIELDS {
        return None;
    }

    row.get(CLOSE_COLUMN)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}
