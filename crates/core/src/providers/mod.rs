pub mod traits;

// Snapshot sources
pub mod coingecko;
#[cfg(not(target_arch = "wasm32"))]
pub mod json_file;
