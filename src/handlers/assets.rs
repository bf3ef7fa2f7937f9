// src/handlers/assets.rs
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::Asset;
use crate::services::store::AssetStore;

pub async fn list_assets(store: Arc<AssetStore>) -> Result<Json, Rejection> {
    info!("Handling request to list assets");
    let assets = store.list().await;
    Ok(warp::reply::json(&assets))
}

pub async fn create_asset(asset: Asset, store: Arc<AssetStore>) -> Result<Json, Rejection> {
    info!("Handling request to add asset {} ({})", asset.id, asset.symbol);
    let stored = store.add(asset).await;
    Ok(warp::reply::json(&json!({
        "message": "Asset added successfully",
        "asset": stored,
    })))
}

pub async fn get_asset(raw_id: String, store: Arc<AssetStore>) -> Result<Json, Rejection> {
    // warp hands over the segment still percent-encoded
    let asset_id = match urlencoding::decode(&raw_id) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!("Asset id {} is not valid UTF-8 once decoded: {}", raw_id, e);
            raw_id
        }
    };
    info!("Handling request to get asset {}", asset_id);
    match store.get(&asset_id).await {
        Some(asset) => Ok(warp::reply::json(&asset)),
        None => {
            warn!("Asset {} not found", asset_id);
            Err(warp::reject::custom(ApiError::not_found("Asset not found")))
        }
    }
}
