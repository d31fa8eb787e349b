mod cli;
mod error;
mod render;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use market_dashboard_core::models::settings::DashboardSettings;
use market_dashboard_core::models::theme::Theme;
use market_dashboard_core::providers::coingecko::CoinGeckoProvider;
use market_dashboard_core::providers::json_file::JsonFileProvider;
use market_dashboard_core::providers::traits::MarketDataProvider;
use market_dashboard_core::MarketDashboard;

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(&cli)?;
    let kinds = cli.widget_kinds()?;

    let provider: Box<dyn MarketDataProvider> = match &cli.input {
        Some(path) => Box::new(JsonFileProvider::new(path)),
        None => Box::new(CoinGeckoProvider::new(&settings)),
    };

    let mut dashboard = MarketDashboard::with_provider(settings, provider)?.with_widgets(&kinds)?;
    if !dashboard.refresh().await {
        tracing::warn!("no market data available, widgets will be empty");
    }

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        OutputFormat::Table => {
            let symbol = dashboard.settings().currency_symbol.clone();
            let snapshot = dashboard.snapshot();
            render::render_table(&mut stdout, &snapshot, dashboard.views(), &symbol)
        }
        OutputFormat::Json => {
            let theme = Theme::for_mode(cli.theme.into());
            render::render_json(&mut stdout, &dashboard.payloads(&theme), cli.pretty)
        }
    }
}

/// Settings file (if any), then command-line overrides.
fn load_settings(cli: &Cli) -> Result<DashboardSettings, CliError> {
    let mut settings = match &cli.config {
        Some(path) => DashboardSettings::load_from_file(path)?,
        None => DashboardSettings::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(per_page) = cli.per_page {
        settings.per_page = per_page;
    }
    settings.validate()?;
    Ok(settings)
}
