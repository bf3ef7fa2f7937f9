// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::{error, info};
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{MethodNotAllowed, Rejection};
use warp::{Filter, Reply};

use crate::config::ALLOWED_ORIGINS;
use crate::handlers::assets::{create_asset, get_asset, list_assets};
use crate::handlers::error::ApiError;
use crate::handlers::portfolio::portfolio_overview;
use crate::handlers::probe::{data, hello, HelloQuery};
use crate::services::market::MarketFeed;
use crate::services::store::AssetStore;

const MAX_BODY_BYTES: u64 = 1024 * 1024;

// Turn rejections into `{"error": ...}` bodies
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status, api_error.message.clone())
    } else if let Some(body_error) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body_error.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if err.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

/// CORS for the local frontend dev servers.
// warp has no wildcard for methods or headers, so list what browsers send.
const ALLOWED_METHODS: [&str; 7] = ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];
const ALLOWED_HEADERS: [&str; 6] = [
    "accept",
    "accept-language",
    "authorization",
    "content-language",
    "content-type",
    "x-requested-with",
];

pub fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_origins(ALLOWED_ORIGINS)
        .allow_credentials(true)
        .allow_headers(ALLOWED_HEADERS)
        .allow_methods(ALLOWED_METHODS)
}

pub fn routes(
    store: Arc<AssetStore>,
    feed: Arc<dyn MarketFeed>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());
    let feed_filter = warp::any().map(move || feed.clone());

    let list_assets_route = warp::path!("assets")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(list_assets);

    let create_asset_route = warp::path!("assets")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(store_filter.clone())
        .and_then(create_asset);

    let get_asset_route = warp::path!("assets" / String)
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_asset);

    let hello_route = warp::path!("hello")
        .and(warp::get())
        .and(warp::query::<HelloQuery>())
        .and_then(hello);

    let data_route = warp::path!("data")
        .and(warp::get())
        .and_then(data);

    let overview_route = warp::path!("portfolio" / "overview")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(feed_filter)
        .and_then(portfolio_overview);

    info!("All routes configured successfully.");

    list_assets_route
        .or(create_asset_route)
        .or(get_asset_route)
        .or(hello_route)
        .or(data_route)
        .or(overview_route)
        .recover(handle_rejection)
}
