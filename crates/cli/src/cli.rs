//! Command-line arguments for the dashboard.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use market_dashboard_core::models::theme::ThemeMode;
use market_dashboard_core::models::widget::WidgetKind;

use crate::error::CliError;

/// Ranked top-N market widgets in the terminal.
///
/// Fetches one snapshot of the CoinGecko market listing (or reads a saved
/// one with `--input`) and renders the cheapest-above-$100, all-time-low,
/// highest-volume and highest-market-cap widgets.
#[derive(Debug, Parser)]
#[command(name = "market-dashboard", author, version)]
pub struct Cli {
    /// JSON settings file; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the market-data API.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Number of records to request (1-250).
    #[arg(long)]
    pub per_page: Option<u16>,

    /// Read the snapshot from a saved `/coins/markets` JSON file instead of the network.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Only show these widgets (repeatable), e.g. `--widget highest-volume`.
    #[arg(long = "widget", value_name = "KIND")]
    pub widgets: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Color scheme used for JSON chart payloads.
    #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
    pub theme: ThemeArg,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    /// Parse the `--widget` values.
    pub fn widget_kinds(&self) -> Result<Vec<WidgetKind>, CliError> {
        self.widgets
            .iter()
            .map(|w| w.parse::<WidgetKind>().map_err(CliError::from))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text table per widget.
    Table,
    /// Chart payloads as a JSON array.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
        }
    }
}
