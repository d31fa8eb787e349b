use std::cmp::Ordering;
use tracing::debug;

use crate::models::asset::AssetRecord;
use crate::models::policy::{Direction, RankingPolicy};

/// Select and order the records of a snapshot according to `policy`.
///
/// 1. Drop records whose ranking key is missing or non-finite
/// 2. Drop records rejected by the policy filter, if any
/// 3. Sort by key in the policy direction; equal keys keep snapshot order
/// 4. Keep the first `limit` records
///
/// An empty input yields an empty ranking.
pub fn rank<'a>(records: &'a [AssetRecord], policy: &RankingPolicy) -> Vec<&'a AssetRecord> {
    rank_where(records, policy, |_| true)
}

/// [`rank`] with an extra eligibility check applied before sorting and
/// truncation, alongside the policy filter.
pub fn rank_where<'a, P>(
    records: &'a [AssetRecord],
    policy: &RankingPolicy,
    eligible: P,
) -> Vec<&'a AssetRecord>
where
    P: Fn(&AssetRecord) -> bool,
{
    let key = policy.key();

    let mut keyed: Vec<(f64, &AssetRecord)> = records
        .iter()
        .filter_map(|record| match key.value_of(record) {
            Some(value) => Some((value, record)),
            None => {
                debug!(id = %record.id, field = %key, "excluding record without a ranking key");
                None
            }
        })
        .filter(|(_, record)| policy.filter().map_or(true, |f| f.matches(record)))
        .filter(|(_, record)| eligible(record))
        .collect();

    // `sort_by` is stable, which is what keeps ties in snapshot order.
    // Keys are finite here, so `partial_cmp` never returns `None`.
    let by_key = |a: f64, b: f64| a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    match policy.direction() {
        Direction::Ascending => keyed.sort_by(|a, b| by_key(a.0, b.0)),
        Direction::Descending => keyed.sort_by(|a, b| by_key(b.0, a.0)),
    }

    keyed.truncate(policy.limit());
    keyed.into_iter().map(|(_, record)| record).collect()
}
