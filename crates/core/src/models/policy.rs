use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use super::asset::{AssetField, AssetRecord};
use crate::errors::CoreError;

/// Sort direction for a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Lowest value first
    Ascending,
    /// Highest value first
    Descending,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ascending"),
            Direction::Descending => write!(f, "descending"),
        }
    }
}

/// Comparison operator used by a [`RecordFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

impl Comparison {
    fn holds(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::GreaterThan => lhs > rhs,
            Comparison::GreaterOrEqual => lhs >= rhs,
            Comparison::LessThan => lhs < rhs,
            Comparison::LessOrEqual => lhs <= rhs,
        }
    }
}

/// Threshold predicate over one field of a record, e.g. `current_price > 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub field: AssetField,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl RecordFilter {
    pub fn new(field: AssetField, comparison: Comparison, threshold: f64) -> Self {
        Self {
            field,
            comparison,
            threshold,
        }
    }

    /// Shorthand for `field > threshold`.
    pub fn above(field: AssetField, threshold: f64) -> Self {
        Self::new(field, Comparison::GreaterThan, threshold)
    }

    /// A record whose field is missing or non-finite never matches.
    pub fn matches(&self, record: &AssetRecord) -> bool {
        self.field
            .value_of(record)
            .is_some_and(|v| self.comparison.holds(v, self.threshold))
    }
}

/// The selection rule of one widget: rank by `key` in `direction`, keep
/// records passing `filter`, truncate to `limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingPolicy {
    key: AssetField,
    direction: Direction,
    filter: Option<RecordFilter>,
    limit: NonZeroUsize,
}

impl RankingPolicy {
    /// Build a policy, rejecting a zero limit or a non-finite filter threshold.
    pub fn new(
        key: AssetField,
        direction: Direction,
        filter: Option<RecordFilter>,
        limit: usize,
    ) -> Result<Self, CoreError> {
        let limit = NonZeroUsize::new(limit).ok_or_else(|| {
            CoreError::InvalidPolicy(format!("limit must be positive (ranking by {key})"))
        })?;

        if let Some(f) = &filter {
            if !f.threshold.is_finite() {
                return Err(CoreError::InvalidPolicy(format!(
                    "filter threshold on {} must be finite, got {}",
                    f.field, f.threshold
                )));
            }
        }

        Ok(Self {
            key,
            direction,
            filter,
            limit,
        })
    }

    pub fn key(&self) -> AssetField {
        self.key
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn filter(&self) -> Option<&RecordFilter> {
        self.filter.as_ref()
    }

    pub fn limit(&self) -> usize {
        self.limit.get()
    }
}
