pub mod asset;
pub mod chart;
pub mod policy;
pub mod settings;
pub mod snapshot;
pub mod theme;
pub mod widget;
