// src/services/store.rs
use log::debug;
use tokio::sync::RwLock;

use crate::models::Asset;

/// Process-lifetime list of assets. Nothing is persisted; ids are whatever
/// the caller sent and are not checked for uniqueness.
#[derive(Default)]
pub struct AssetStore {
    assets: RwLock<Vec<Asset>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Asset> {
        self.assets.read().await.clone()
    }

    pub async fn add(&self, asset: Asset) -> Asset {
        let mut assets = self.assets.write().await;
        assets.push(asset.clone());
        debug!("Stored asset {} ({} total)", asset.id, assets.len());
        asset
    }

    /// First asset with a matching id.
    pub async fn get(&self, id: &str) -> Option<Asset> {
        self.assets.read().await.iter().find(|a| a.id == id).cloned()
    }
}
