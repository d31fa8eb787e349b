pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    chart::{ChartPayload, WidgetView},
    settings::DashboardSettings,
    snapshot::AssetSnapshot,
    theme::Theme,
    widget::{default_widgets, WidgetKind, WidgetSpec},
};
use providers::{coingecko::CoinGeckoProvider, traits::MarketDataProvider};
use services::chart_service::ChartService;
use std::sync::Arc;
use storage::snapshot_store::SnapshotStore;
use tracing::{debug, info, warn};

use errors::CoreError;

/// Main entry point for the Market Dashboard core library.
/// Holds the current snapshot, the widget catalogue and the derived views.
#[must_use]
pub struct MarketDashboard {
    settings: DashboardSettings,
    provider: Box<dyn MarketDataProvider>,
    store: SnapshotStore,
    widgets: Vec<WidgetSpec>,
    chart_service: ChartService,
    /// Views derived from the snapshot at the recorded store version.
    views: Option<(u64, Vec<WidgetView>)>,
}

impl std::fmt::Debug for MarketDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDashboard")
            .field("provider", &self.provider.name())
            .field("snapshot_version", &self.store.version())
            .field("records", &self.store.snapshot().len())
            .field("widgets", &self.widgets.len())
            .finish()
    }
}

impl MarketDashboard {
    /// Dashboard backed by the CoinGecko API, configured from `settings`.
    pub fn new(settings: DashboardSettings) -> Result<Self, CoreError> {
        let provider = CoinGeckoProvider::new(&settings);
        Self::with_provider(settings, Box::new(provider))
    }

    /// Dashboard backed by any snapshot source, showing every widget.
    pub fn with_provider(
        settings: DashboardSettings,
        provider: Box<dyn MarketDataProvider>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            settings,
            provider,
            store: SnapshotStore::new(),
            widgets: default_widgets()?,
            chart_service: ChartService::new(),
            views: None,
        })
    }

    /// Restrict the dashboard to `kinds`, in the order given.
    /// Duplicates are ignored; an empty list keeps every widget.
    pub fn with_widgets(mut self, kinds: &[WidgetKind]) -> Result<Self, CoreError> {
        if kinds.is_empty() {
            return Ok(self);
        }
        let mut widgets: Vec<WidgetSpec> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !widgets.iter().any(|w| w.kind == *kind) {
                widgets.push(kind.spec()?);
            }
        }
        self.widgets = widgets;
        self.views = None;
        Ok(self)
    }

    /// Replace the widget catalogue with custom specs.
    pub fn with_widget_specs(mut self, widgets: Vec<WidgetSpec>) -> Self {
        self.widgets = widgets;
        self.views = None;
        self
    }

    // ── Snapshot ────────────────────────────────────────────────────

    /// Fetch a new snapshot and replace the current one.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned untouched.
    pub async fn try_refresh(&mut self) -> Result<u64, CoreError> {
        let records = self.provider.fetch_markets().await?;
        Ok(self.store.replace(AssetSnapshot::new(records)))
    }

    /// Fetch a new snapshot, logging and swallowing any failure.
    ///
    /// Returns `true` when the snapshot was replaced. After a failed first
    /// fetch the dashboard simply shows empty widgets.
    pub async fn refresh(&mut self) -> bool {
        info!(provider = self.provider.name(), "refreshing market snapshot");
        match self.try_refresh().await {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "market fetch failed, keeping previous snapshot"
                );
                false
            }
        }
    }

    /// Install an already-fetched snapshot.
    pub fn load_snapshot(&mut self, snapshot: AssetSnapshot) -> u64 {
        self.store.replace(snapshot)
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<AssetSnapshot> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn snapshot_version(&self) -> u64 {
        self.store.version()
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Ranked views for every widget, in dashboard order.
    ///
    /// Computed once per snapshot version and reused until the next
    /// replacement.
    pub fn views(&mut self) -> &[WidgetView] {
        self.ensure_views();
        match &self.views {
            Some((_, views)) => views,
            None => &[],
        }
    }

    /// The view of a single widget, if it is part of this dashboard.
    pub fn view(&mut self, kind: WidgetKind) -> Option<&WidgetView> {
        self.views().iter().find(|v| v.kind == kind)
    }

    /// Renderer payloads for every widget, with `theme` colors applied.
    pub fn payloads(&mut self, theme: &Theme) -> Vec<ChartPayload> {
        self.ensure_views();
        let symbol = &self.settings.currency_symbol;
        self.views
            .iter()
            .flat_map(|(_, views)| views.iter())
            .map(|view| self.chart_service.payload(view, theme, symbol))
            .collect()
    }

    fn ensure_views(&mut self) {
        let version = self.store.version();
        if let Some((cached, _)) = &self.views {
            if *cached == version {
                debug!(version, "reusing cached widget views");
                return;
            }
        }

        let snapshot = self.store.snapshot();
        let views = self
            .widgets
            .iter()
            .map(|spec| self.chart_service.build_view(spec, &snapshot))
            .collect();
        self.views = Some((version, views));
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    #[must_use]
    pub fn widgets(&self) -> &[WidgetSpec] {
        &self.widgets
    }

    /// Name of the snapshot source (for logs/diagnostics).
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
