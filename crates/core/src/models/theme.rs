use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl FromStr for ThemeMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(CoreError::InvalidConfig(format!("unknown theme mode: {other}"))),
        }
    }
}

/// Named colors widgets draw from. Values are CSS color strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub primary_main: String,
    pub error_dark: String,
    pub success_dark: String,
    pub yellow_dark: String,
    pub deep_purple: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub white: String,
    pub line_accent: String,
}

/// Presentation context. Only the chart payload boundary reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
    pub palette: Palette,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            palette: Palette {
                primary_main: "#1976d2".into(),
                error_dark: "#c62828".into(),
                success_dark: "#1b5e20".into(),
                yellow_dark: "#f9a825".into(),
                deep_purple: "#5e35b1".into(),
                text_primary: "rgba(0, 0, 0, 0.87)".into(),
                text_secondary: "rgba(0, 0, 0, 0.6)".into(),
                white: "#fff".into(),
                line_accent: "rgb(255, 99, 132)".into(),
            },
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            palette: Palette {
                primary_main: "#90caf9".into(),
                error_dark: "#d32f2f".into(),
                success_dark: "#388e3c".into(),
                yellow_dark: "#f57f17".into(),
                deep_purple: "#5e35b1".into(),
                text_primary: "#fff".into(),
                text_secondary: "rgba(255, 255, 255, 0.7)".into(),
                white: "#fff".into(),
                line_accent: "rgb(255, 99, 132)".into(),
            },
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Text color for labels drawn on top of the chart background.
    pub fn label_text(&self) -> &str {
        match self.mode {
            ThemeMode::Dark => &self.palette.text_primary,
            ThemeMode::Light => &self.palette.text_secondary,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
