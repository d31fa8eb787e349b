use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::AssetRecord;

/// Source of market snapshots.
///
/// The dashboard only ever asks for "the current listing"; each
/// implementation decides where that comes from (an HTTP API, a saved file,
/// a test fixture).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the full market listing, in the order the source returns it.
    async fn fetch_markets(&self) -> Result<Vec<AssetRecord>, CoreError>;
}
