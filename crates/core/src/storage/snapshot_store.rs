use std::sync::Arc;
use tracing::info;

use crate::models::snapshot::AssetSnapshot;

/// Holds the most recent snapshot for a view.
///
/// Readers get a shared, read-only handle. [`SnapshotStore::replace`] swaps
/// the whole snapshot in one assignment and bumps the version, which is
/// what downstream caches key on.
#[derive(Debug)]
pub struct SnapshotStore {
    current: Arc<AssetSnapshot>,
    version: u64,
}

impl SnapshotStore {
    /// An empty store at version 0.
    pub fn new() -> Self {
        Self {
            current: Arc::new(AssetSnapshot::empty()),
            version: 0,
        }
    }

    /// Shared handle to the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<AssetSnapshot> {
        Arc::clone(&self.current)
    }

    /// Incremented on every replacement; 0 means nothing was ever stored.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the snapshot wholesale. Returns the new version.
    pub fn replace(&mut self, snapshot: AssetSnapshot) -> u64 {
        self.current = Arc::new(snapshot);
        self.version += 1;
        info!(
            version = self.version,
            records = self.current.len(),
            "snapshot replaced"
        );
        self.version
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
