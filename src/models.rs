// src/models.rs
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

/// A holding as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub asset_type: String,
    pub symbol: String,
    pub quantity: f64,
    /// Per-unit cost in USD.
    pub cost_basis: f64,
    #[serde(default)]
    pub account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedAsset {
    pub id: String,
    pub asset_type: String,
    pub symbol: String,
    pub quantity: f64,
    pub cost_basis: f64,
    pub account: Option<String>,
    pub current_price: Option<f64>,
    pub market_value: f64,
    pub gain_loss: f64,
    pub gain_loss_pct: Option<f64>,
    pub pricing_source: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published_at: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub cost_basis: f64,
    pub market_value: f64,
    pub gain_loss: f64,
    pub gain_loss_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub as_of: String,
    pub totals: PortfolioTotals,
    pub assets: Vec<EnrichedAsset>,
    pub news_by_symbol: BTreeMap<String, Vec<NewsItem>>,
}

#[derive(Debug, Deserialize)]
pub struct PortfolioOverviewRequest {
    pub assets: Vec<Asset>,
}

/// Asset classes the valuation logic distinguishes, parsed from the free-form
/// `asset_type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Stock,
    Fund,
    Crypto,
    Cash,
    RealEstate,
    Bond,
    Other,
}

impl AssetClass {
    pub fn parse(asset_type: &str) -> Self {
        match asset_type.to_lowercase().as_str() {
            "stock" => AssetClass::Stock,
            "fund" => AssetClass::Fund,
            "crypto" => AssetClass::Crypto,
            "cash" | "hysa" | "savings" => AssetClass::Cash,
            "real_estate" => AssetClass::RealEstate,
            "bond" => AssetClass::Bond,
            _ => AssetClass::Other,
        }
    }
}
