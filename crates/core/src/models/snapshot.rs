use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::AssetRecord;

/// One fetched batch of asset records.
///
/// Records keep the order in which the source delivered them; nothing about
/// that order is assumed. A snapshot is never edited after construction; a
/// newer fetch produces a new snapshot that replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    records: Vec<AssetRecord>,
    fetched_at: DateTime<Utc>,
}

impl AssetSnapshot {
    /// Wrap freshly fetched records, stamped with the current time.
    pub fn new(records: Vec<AssetRecord>) -> Self {
        Self::with_timestamp(records, Utc::now())
    }

    pub fn with_timestamp(records: Vec<AssetRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records,
            fetched_at,
        }
    }

    /// The snapshot every view starts with before its first successful fetch.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by provider id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AssetRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

impl Default for AssetSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
