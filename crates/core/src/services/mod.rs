pub mod chart_service;
pub mod format_service;
pub mod projection_service;
pub mod ranking_service;
