use anyhow::Context;
use dotenv::dotenv;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use portfolio_overview::config::Config;
use portfolio_overview::routes;
use portfolio_overview::services::market::{LiveMarketFeed, MarketFeed};
use portfolio_overview::services::store::AssetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = Config::from_env();
    info!("Using PORT: {}", config.port);

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let feed: Arc<dyn MarketFeed> = Arc::new(
        LiveMarketFeed::new(config.feeds.clone()).context("failed to build upstream HTTP client")?,
    );
    let store = Arc::new(AssetStore::new());

    let api = routes::routes(store, feed).with(routes::cors());
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
