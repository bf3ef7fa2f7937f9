// src/bin/probe_feeds.rs
// Usage: probe_feeds <asset_type> <symbol> [cost_basis]
use anyhow::{bail, Context};
use dotenv::dotenv;
use log::{error, info};
use std::env;

use portfolio_overview::config::Config;
use portfolio_overview::services::market::{LiveMarketFeed, MarketFeed};
use portfolio_overview::services::news::{build_query, HEADLINE_LIMIT};
use portfolio_overview::services::pricing::resolve_price;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: probe_feeds <asset_type> <symbol> [cost_basis]");
    }
    let asset_type = &args[0];
    let symbol = args[1].to_uppercase();
    let cost_basis: f64 = match args.get(2) {
        Some(raw) => raw.parse().context("cost_basis must be a number")?,
        None => 0.0,
    };

    let config = Config::from_env();
    let feed = LiveMarketFeed::new(config.feeds).context("failed to build HTTP client")?;

    info!("Testing price lookup for {} {}...", asset_type, symbol);
    let resolution = resolve_price(&feed, asset_type, &symbol, cost_basis).await;
    println!("price:  {:?}", resolution.price);
    println!("source: {}", resolution.source);
    println!("note:   {:?}", resolution.note);

    let query = build_query(asset_type, &symbol);
    info!("Testing news lookup for '{}'...", query);
    match feed.headlines(&query, HEADLINE_LIMIT).await {
        Ok(items) => {
            info!("SUCCESS: {} headlines", items.len());
            for item in items {
                println!("- [{}] {} ({})", item.published_at, item.title, item.source);
                println!("  {}", item.link);
            }
        }
        Err(e) => {
            error!("ERROR: news lookup failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
