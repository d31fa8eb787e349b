use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::errors::CoreError;

pub const DEFAULT_ENDPOINT: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko refuses pages larger than this.
pub const MAX_PER_PAGE: u16 = 250;

/// Dashboard configuration. Every field has a default, so a config file
/// only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Base URL of the market-data API, without a trailing slash
    pub endpoint: String,

    /// Quote currency requested from the API (e.g., "usd")
    pub vs_currency: String,

    /// Server-side ordering of the snapshot; only affects which records arrive
    pub order: String,

    /// Number of records per snapshot (1..=250)
    pub per_page: u16,

    /// 1-based page of the market listing
    pub page: u32,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Symbol prepended by the currency formatter
    pub currency_symbol: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            vs_currency: "usd".to_string(),
            order: "market_cap_desc".to_string(),
            per_page: MAX_PER_PAGE,
            page: 1,
            timeout_secs: 30,
            currency_symbol: "$".to_string(),
        }
    }
}

impl DashboardSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidConfig(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Endpoint with surrounding whitespace and trailing slashes removed.
    pub fn normalized_endpoint(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let endpoint = self.normalized_endpoint();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(CoreError::InvalidConfig(format!(
                "endpoint must start with http:// or https://, got: '{endpoint}'"
            )));
        }
        if self.vs_currency.trim().is_empty() {
            return Err(CoreError::InvalidConfig("vs_currency must not be empty".into()));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(CoreError::InvalidConfig(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        if self.page == 0 {
            return Err(CoreError::InvalidConfig("page is 1-based, got 0".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::InvalidConfig("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
