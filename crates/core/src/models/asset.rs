use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::errors::CoreError;

/// A numeric column of an [`AssetRecord`] that widgets can rank or display by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetField {
    CurrentPrice,
    AllTimeLow,
    AllTimeHigh,
    TotalVolume,
    MarketCap,
}

impl AssetField {
    /// Read this field from a record.
    ///
    /// Returns `None` when the value is missing or not finite, so callers
    /// never have to reason about NaN or infinities.
    pub fn value_of(&self, record: &AssetRecord) -> Option<f64> {
        let raw = match self {
            AssetField::CurrentPrice => record.current_price,
            AssetField::AllTimeLow => record.all_time_low,
            AssetField::AllTimeHigh => record.all_time_high,
            AssetField::TotalVolume => record.total_volume,
            AssetField::MarketCap => record.market_cap,
        };
        raw.filter(|v| v.is_finite())
    }
}

impl std::fmt::Display for AssetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetField::CurrentPrice => write!(f, "current_price"),
            AssetField::AllTimeLow => write!(f, "atl"),
            AssetField::AllTimeHigh => write!(f, "ath"),
            AssetField::TotalVolume => write!(f, "total_volume"),
            AssetField::MarketCap => write!(f, "market_cap"),
        }
    }
}

/// One row of a market snapshot.
///
/// Numeric fields are optional: upstream data is frequently partial, and a
/// record with a missing value simply drops out of any ranking keyed on
/// that field instead of invalidating the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Provider id, unique within a snapshot (e.g., "bitcoin")
    pub id: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    pub current_price: Option<f64>,

    #[serde(rename = "atl")]
    pub all_time_low: Option<f64>,

    #[serde(rename = "ath")]
    pub all_time_high: Option<f64>,

    pub total_volume: Option<f64>,

    pub market_cap: Option<f64>,
}

impl AssetRecord {
    /// A record with no numeric data yet. Chain the `with_*` setters to fill it in.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_price: None,
            all_time_low: None,
            all_time_high: None,
            total_volume: None,
            market_cap: None,
        }
    }

    pub fn with_current_price(mut self, value: f64) -> Self {
        self.current_price = Some(value);
        self
    }

    pub fn with_all_time_low(mut self, value: f64) -> Self {
        self.all_time_low = Some(value);
        self
    }

    pub fn with_all_time_high(mut self, value: f64) -> Self {
        self.all_time_high = Some(value);
        self
    }

    pub fn with_total_volume(mut self, value: f64) -> Self {
        self.total_volume = Some(value);
        self
    }

    pub fn with_market_cap(mut self, value: f64) -> Self {
        self.market_cap = Some(value);
        self
    }
}

// ── Wire format (CoinGecko `/coins/markets`) ────────────────────────

/// Loose shape of a single market entry as it arrives over the wire.
/// Everything is optional; validation happens in `TryFrom`.
#[derive(Debug, Deserialize)]
struct MarketEntry {
    id: Option<String>,
    name: Option<String>,
    current_price: Option<f64>,
    atl: Option<f64>,
    ath: Option<f64>,
    total_volume: Option<f64>,
    market_cap: Option<f64>,
}

/// Keep only finite, non-negative numbers.
fn sanitize(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

impl TryFrom<MarketEntry> for AssetRecord {
    type Error = String;

    fn try_from(entry: MarketEntry) -> Result<Self, Self::Error> {
        let id = entry
            .id
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "missing id".to_string())?;
        let name = entry
            .name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| format!("{id}: missing name"))?;

        Ok(Self {
            id,
            name,
            current_price: sanitize(entry.current_price),
            all_time_low: sanitize(entry.atl),
            all_time_high: sanitize(entry.ath),
            total_volume: sanitize(entry.total_volume),
            market_cap: sanitize(entry.market_cap),
        })
    }
}

/// Parse a `/coins/markets` JSON array into records, in arrival order.
///
/// The top level must be an array. Individual entries that are malformed,
/// lack an id or name, or repeat an id already seen are skipped.
pub fn parse_market_records(body: &str) -> Result<Vec<AssetRecord>, CoreError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = entries.len();

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(total);
    for (index, value) in entries.into_iter().enumerate() {
        let entry: MarketEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(index, error = %e, "skipping malformed market entry");
                continue;
            }
        };
        match AssetRecord::try_from(entry) {
            Ok(record) if seen.insert(record.id.clone()) => records.push(record),
            Ok(record) => debug!(id = %record.id, "skipping duplicate market entry"),
            Err(reason) => debug!(index, %reason, "skipping invalid market entry"),
        }
    }

    if records.len() < total {
        debug!(kept = records.len(), total, "dropped invalid market entries");
    }
    Ok(records)
}
