use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::info;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::asset::{parse_market_records, AssetRecord};
use crate::models::settings::DashboardSettings;

const PROVIDER: &str = "CoinGecko";

/// CoinGecko `/coins/markets` provider.
///
/// - **Free**: No API key required for the public endpoint.
/// - **Data**: one page of up to 250 coins with price, ATL/ATH, volume and market cap.
/// - **Endpoint**: `/coins/markets?vs_currency=..&order=..&per_page=..&page=..`
pub struct CoinGeckoProvider {
    client: Client,
    markets_url: String,
}

impl CoinGeckoProvider {
    pub fn new(settings: &DashboardSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            markets_url: Self::build_markets_url(settings),
        }
    }

    /// The full request URL derived from `settings`.
    pub fn build_markets_url(settings: &DashboardSettings) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order={}&per_page={}&page={}&sparkline=false",
            settings.normalized_endpoint(),
            settings.vs_currency.trim().to_lowercase(),
            settings.order.trim(),
            settings.per_page,
            settings.page,
        )
    }

    pub fn markets_url(&self) -> &str {
        &self.markets_url
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new(&DashboardSettings::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_markets(&self) -> Result<Vec<AssetRecord>, CoreError> {
        let resp = self
            .client
            .get(&self.markets_url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Markets request failed with HTTP {status}"),
            });
        }

        let body = resp.text().await?;
        let records = parse_market_records(&body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse markets response: {e}"),
        })?;

        info!(records = records.len(), "fetched CoinGecko markets");
        Ok(records)
    }
}
