// src/handlers/probe.rs
use serde::Deserialize;
use serde_json::json;
use warp::reply::Json;
use warp::Rejection;

#[derive(Debug, Deserialize)]
pub struct HelloQuery {
    pub name: Option<String>,
}

pub async fn hello(query: HelloQuery) -> Result<Json, Rejection> {
    let name = query.name.unwrap_or_else(|| "world".to_string());
    Ok(warp::reply::json(&json!({
        "message": format!("Hello, {}!", name),
    })))
}

pub async fn data() -> Result<Json, Rejection> {
    Ok(warp::reply::json(&json!({
        "message": "Hello from /data endpoint!",
    })))
}
