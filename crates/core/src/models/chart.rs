use serde::{Deserialize, Serialize};

use super::widget::WidgetKind;
use crate::services::format_service::format_currency;

/// Which chart a widget is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Line,
    Pie,
    PolarArea,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Doughnut => write!(f, "Doughnut"),
            ChartKind::Line => write!(f, "Line"),
            ChartKind::Pie => write!(f, "Pie"),
            ChartKind::PolarArea => write!(f, "Polar Area"),
        }
    }
}

/// Index-aligned labels and values, in display order.
///
/// The two sequences can only grow together through [`RankedSeries::push`],
/// so they always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl RankedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// A widget ready to hand to a renderer: its metadata plus the ranked series.
///
/// Carries no color or theme information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetView {
    pub kind: WidgetKind,
    pub title: String,
    pub subheader: String,
    pub chart_kind: ChartKind,
    pub series: RankedSeries,
}

impl WidgetView {
    /// Currency-formatted copies of the values, for on-chart labels.
    pub fn formatted_values(&self, currency_symbol: &str) -> Vec<String> {
        self.series
            .values()
            .iter()
            .map(|v| format_currency(*v, currency_symbol))
            .collect()
    }
}

/// Everything a chart front-end needs to draw one widget.
///
/// The core computes all the numbers; the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub kind: WidgetKind,
    pub chart_kind: ChartKind,
    pub title: String,
    pub subheader: String,

    /// Legend / x-axis labels
    pub labels: Vec<String>,

    /// Raw values, used for chart scaling
    pub values: Vec<f64>,

    /// Currency-formatted values, used for data labels only
    pub formatted_values: Vec<String>,

    /// Dataset label, shown by charts that have a single named series
    pub dataset_label: Option<String>,

    pub style: ChartStyle,
}

/// Static style configuration injected at the rendering boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// One fill color per slice (pie-like charts); empty for line charts
    pub background_colors: Vec<String>,
    pub border_color: String,
    pub border_width: u8,
    /// Point fill color (line charts only)
    pub point_color: Option<String>,
    pub label_color: String,
    /// Inner radius cutout in percent (doughnut only)
    pub cutout_percent: Option<u8>,
    pub show_legend: bool,
}
