use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::asset::AssetField;
use super::chart::ChartKind;
use super::policy::{Direction, RankingPolicy, RecordFilter};
use crate::errors::CoreError;

/// Price floor for the "cheapest" widget; anything at or below is ignored.
pub const CHEAPEST_PRICE_FLOOR: f64 = 100.0;

/// The four dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Cheapest assets priced above [`CHEAPEST_PRICE_FLOOR`]
    CheapestAboveThreshold,
    /// Ranked by all-time low, displaying all-time high
    AllTimeLow,
    HighestVolume,
    HighestMarketCap,
}

impl WidgetKind {
    /// All widgets, in dashboard order.
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::CheapestAboveThreshold,
        WidgetKind::AllTimeLow,
        WidgetKind::HighestVolume,
        WidgetKind::HighestMarketCap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::CheapestAboveThreshold => "cheapest-above-threshold",
            WidgetKind::AllTimeLow => "all-time-low",
            WidgetKind::HighestVolume => "highest-volume",
            WidgetKind::HighestMarketCap => "highest-market-cap",
        }
    }

    /// The built-in configuration for this widget.
    pub fn spec(&self) -> Result<WidgetSpec, CoreError> {
        let spec = match self {
            WidgetKind::CheapestAboveThreshold => WidgetSpec {
                kind: *self,
                title: "Top 5 Cheapest Cryptocurrencies".into(),
                subheader: "Top 5 Cheapest Cryptocurrencies Above $100 Measured By Their Market Price"
                    .into(),
                chart_kind: ChartKind::Doughnut,
                policy: RankingPolicy::new(
                    AssetField::CurrentPrice,
                    Direction::Ascending,
                    Some(RecordFilter::above(
                        AssetField::CurrentPrice,
                        CHEAPEST_PRICE_FLOOR,
                    )),
                    5,
                )?,
                value_field: AssetField::CurrentPrice,
            },
            // Ranks on the all-time low but plots the all-time high, exactly
            // as the dashboard has always shown it.
            WidgetKind::AllTimeLow => WidgetSpec {
                kind: *self,
                title: "Top 5 Cryptocurrencies By All-Time-Low".into(),
                subheader: "Top 5 Cryptocurrencies Measured By Their All-Time-Low (ATL)".into(),
                chart_kind: ChartKind::Line,
                policy: RankingPolicy::new(AssetField::AllTimeLow, Direction::Descending, None, 5)?,
                value_field: AssetField::AllTimeHigh,
            },
            WidgetKind::HighestVolume => WidgetSpec {
                kind: *self,
                title: "Top 3 Cryptocurrencies By Volume".into(),
                subheader: "Top 3 Cryptocurrencies Measured By Their Total Volume".into(),
                chart_kind: ChartKind::Pie,
                policy: RankingPolicy::new(
                    AssetField::TotalVolume,
                    Direction::Descending,
                    None,
                    3,
                )?,
                value_field: AssetField::TotalVolume,
            },
            WidgetKind::HighestMarketCap => WidgetSpec {
                kind: *self,
                title: "Top 3 Cryptocurrencies By Market Cap".into(),
                subheader: "Top 3 Cryptocurrencies Measured By Their Market Cap".into(),
                chart_kind: ChartKind::PolarArea,
                policy: RankingPolicy::new(AssetField::MarketCap, Direction::Descending, None, 3)?,
                value_field: AssetField::MarketCap,
            },
        };
        Ok(spec)
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        WidgetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == needle)
            .ok_or_else(|| CoreError::UnknownWidget(s.to_string()))
    }
}

/// Full description of one widget: presentation metadata, the ranking
/// rule, and which field is plotted for each selected record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub title: String,
    pub subheader: String,
    pub chart_kind: ChartKind,
    pub policy: RankingPolicy,

    /// Field plotted for each ranked record. Usually the ranking key, but
    /// not necessarily (see [`WidgetKind::AllTimeLow`]).
    pub value_field: AssetField,
}

/// Built-in specs for every widget, in dashboard order.
pub fn default_widgets() -> Result<Vec<WidgetSpec>, CoreError> {
    WidgetKind::ALL.iter().map(WidgetKind::spec).collect()
}
