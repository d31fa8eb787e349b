use tracing::debug;

use crate::models::chart::{ChartKind, ChartPayload, ChartStyle, WidgetView};
use crate::models::snapshot::AssetSnapshot;
use crate::models::theme::Theme;
use crate::models::widget::{WidgetKind, WidgetSpec};
use crate::services::projection_service::project_field;
use crate::services::ranking_service::rank_where;

/// Label of the single dataset drawn by the line chart.
const ALL_TIME_LOW_DATASET: &str = "All-Time-Low";

const DOUGHNUT_CUTOUT_PERCENT: u8 = 50;

/// Turns snapshots into chart-ready widget data.
///
/// Two stages:
/// - [`ChartService::build_view`] ranks and projects; it never sees a theme.
/// - [`ChartService::payload`] attaches colors and formatted labels.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Rank `snapshot` with the widget's policy and project the result.
    ///
    /// Records without a plottable `value_field` are excluded before the
    /// limit is applied, so every ranked record lands in the series.
    pub fn build_view(&self, spec: &WidgetSpec, snapshot: &AssetSnapshot) -> WidgetView {
        let value_field = spec.value_field;
        let ranked = rank_where(snapshot.records(), &spec.policy, |record| {
            value_field.value_of(record).is_some()
        });
        let series = project_field(&ranked, value_field);
        debug!(
            widget = %spec.kind,
            candidates = snapshot.len(),
            selected = series.len(),
            "built widget series"
        );

        WidgetView {
            kind: spec.kind,
            title: spec.title.clone(),
            subheader: spec.subheader.clone(),
            chart_kind: spec.chart_kind,
            series,
        }
    }

    /// Build the renderer payload for a view, injecting `theme` colors.
    pub fn payload(&self, view: &WidgetView, theme: &Theme, currency_symbol: &str) -> ChartPayload {
        ChartPayload {
            kind: view.kind,
            chart_kind: view.chart_kind,
            title: view.title.clone(),
            subheader: view.subheader.clone(),
            labels: view.series.labels().to_vec(),
            values: view.series.values().to_vec(),
            formatted_values: view.formatted_values(currency_symbol),
            dataset_label: match view.kind {
                WidgetKind::AllTimeLow => Some(ALL_TIME_LOW_DATASET.to_string()),
                _ => None,
            },
            style: Self::style_for(view, theme),
        }
    }

    fn style_for(view: &WidgetView, theme: &Theme) -> ChartStyle {
        let p = &theme.palette;
        let slice_colors: Vec<&str> = match view.kind {
            WidgetKind::CheapestAboveThreshold => vec![
                p.yellow_dark.as_str(),
                p.error_dark.as_str(),
                p.primary_main.as_str(),
                p.success_dark.as_str(),
                p.deep_purple.as_str(),
            ],
            WidgetKind::AllTimeLow => Vec::new(),
            WidgetKind::HighestVolume => vec![
                p.primary_main.as_str(),
                p.error_dark.as_str(),
                p.yellow_dark.as_str(),
            ],
            WidgetKind::HighestMarketCap => vec![
                p.deep_purple.as_str(),
                p.success_dark.as_str(),
                p.error_dark.as_str(),
            ],
        };

        // Pie-like charts label slices in white; the others sit on the card background.
        let label_color = match view.kind {
            WidgetKind::CheapestAboveThreshold | WidgetKind::HighestVolume => p.white.clone(),
            WidgetKind::AllTimeLow | WidgetKind::HighestMarketCap => theme.label_text().to_string(),
        };

        match view.chart_kind {
            ChartKind::Line => ChartStyle {
                background_colors: Vec::new(),
                border_color: p.line_accent.clone(),
                border_width: 2,
                point_color: Some(p.line_accent.clone()),
                label_color,
                cutout_percent: None,
                show_legend: false,
            },
            kind => ChartStyle {
                background_colors: slice_colors
                    .into_iter()
                    .take(view.series.len())
                    .map(str::to_string)
                    .collect(),
                border_color: p.white.clone(),
                border_width: 1,
                point_color: None,
                label_color,
                cutout_percent: (kind == ChartKind::Doughnut).then_some(DOUGHNUT_CUTOUT_PERCENT),
                show_legend: true,
            },
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
