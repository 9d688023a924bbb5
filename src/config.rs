use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::metrics::DEFAULT_TICK_STEP;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "PathsConfig::default_input")]
    pub input: PathBuf,
    #[serde(default = "PathsConfig::default_output_dir")]
    pub output_dir: PathBuf,
}

impl PathsConfig {
    fn default_input() -> PathBuf {
        PathBuf::from("data/csv/hanoi_results.csv")
    }
    fn default_output_dir() -> PathBuf {
        PathBuf::from("data/png")
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: Self::default_input(),
            output_dir: Self::default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_width")]
    pub width: u32,
    #[serde(default = "RenderConfig::default_height")]
    pub height: u32,
    /// Dashboard shading starts at this run time.
    #[serde(default = "RenderConfig::default_dashboard_threshold_ms")]
    pub dashboard_threshold_ms: f64,
    /// Spacing between labelled `n` values on the ratio chart.
    #[serde(default = "RenderConfig::default_tick_step")]
    pub tick_step: u32,
}

impl RenderConfig {
    fn default_width() -> u32 {
        1200
    }
    fn default_height() -> u32 {
        750
    }
    fn default_dashboard_threshold_ms() -> f64 {
        1.0
    }
    fn default_tick_step() -> u32 {
        DEFAULT_TICK_STEP
    }

    /// Canvas for single-panel charts.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Canvas for the dashboard and the ratio chart.
    pub fn wide_size(&self) -> (u32, u32) {
        (self.width * 3 / 2, self.height)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            dashboard_threshold_ms: Self::default_dashboard_threshold_ms(),
            tick_step: Self::default_tick_step(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    /// Read `path` if it exists. Otherwise write a commented-out template of
    /// the defaults there and return the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => {
                        info!(path = %path.display(), "loaded config");
                        return cfg;
                    }
                    Err(err) => {
                        warn!("Failed to parse config {}: {err}. Using defaults.", path.display());
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {}: {err}. Using defaults.", path.display());
                }
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path, Self::commented(&text)) {
                    warn!("Failed to write default config to {}: {err}", path.display());
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}"),
        }
        default_cfg
    }

    /// Keep section headers, comment out every key.
    fn commented(text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
                out.push_str(line);
            } else {
                out.push_str("# ");
                out.push_str(line);
            }
            out.push('\n');
        }
        out
    }
}
