use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::asset::{parse_market_records, AssetRecord};

/// Reads a saved `/coins/markets` response from disk.
///
/// Handy for offline demos and for pinning a dashboard to a known snapshot.
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl MarketDataProvider for JsonFileProvider {
    fn name(&self) -> &str {
        "JsonFile"
    }

    async fn fetch_markets(&self) -> Result<Vec<AssetRecord>, CoreError> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| {
            CoreError::FileIO(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let records = parse_market_records(&body)?;
        info!(path = %self.path.display(), records = records.len(), "loaded market snapshot");
        Ok(records)
    }
}
