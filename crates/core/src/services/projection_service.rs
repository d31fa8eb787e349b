use tracing::debug;

use crate::models::asset::{AssetField, AssetRecord};
use crate::models::chart::RankedSeries;

/// Map a ranked subset into a label/value series, preserving order exactly.
///
/// A record whose value is `None` or non-finite is left out of the series
/// (label and value together), so the two sequences stay aligned.
pub fn project<L, V>(ranked: &[&AssetRecord], label_of: L, value_of: V) -> RankedSeries
where
    L: Fn(&AssetRecord) -> String,
    V: Fn(&AssetRecord) -> Option<f64>,
{
    let mut series = RankedSeries::with_capacity(ranked.len());
    for record in ranked {
        match value_of(record).filter(|v| v.is_finite()) {
            Some(value) => series.push(label_of(record), value),
            None => debug!(id = %record.id, "ranked record has no value to plot"),
        }
    }
    series
}

/// [`project`] with the record name as label and `field` as value.
pub fn project_field(ranked: &[&AssetRecord], field: AssetField) -> RankedSeries {
    project(ranked, |r| r.name.clone(), |r| field.value_of(r))
}
