// src/handlers/portfolio.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::models::PortfolioOverviewRequest;
use crate::services::market::MarketFeed;
use crate::services::portfolio::build_overview;

pub async fn portfolio_overview(
    request: PortfolioOverviewRequest,
    feed: Arc<dyn MarketFeed>,
) -> Result<Json, Rejection> {
    info!("Handling portfolio overview request with {} assets", request.assets.len());
    let overview = build_overview(feed.as_ref(), &request.assets).await;
    Ok(warp::reply::json(&overview))
}
