//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{HelioError, Result};

/// Main configuration for the helio pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelioConfig {
    /// Transcript extraction configuration.
    pub extraction: ExtractionConfig,

    /// Reverse geocoding configuration.
    pub geocoding: GeocodingConfig,

    /// Electricity cost table configuration.
    pub costs: CostConfig,

    /// Report generation configuration.
    pub report: ReportConfig,

    /// Upstream agent configuration.
    pub agent: AgentConfig,
}

/// Transcript extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Multiply extracted production by this factor (e.g. 5.0 to turn a
    /// 1 kWp simulation into a 5 kWp estimate). Disabled when unset.
    pub production_scale: Option<f64>,
}

/// Reverse geocoding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Resolve countries from coordinates.
    pub enabled: bool,

    /// Reverse geocoding endpoint (Nominatim-compatible).
    pub endpoint: String,

    /// Zoom level of the request (3 = country).
    pub zoom: u8,

    /// Preferred language for returned names.
    pub language: String,

    /// User agent sent with requests.
    pub user_agent: String,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org/reverse".to_string(),
            zoom: 3,
            language: "en".to_string(),
            user_agent: concat!("helio/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Electricity cost table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// CSV file with per-country electricity costs.
    pub table_path: PathBuf,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("data/electricity_costs.csv"),
        }
    }
}

/// Report generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory where reports are saved.
    pub output_dir: PathBuf,

    /// Number of transcript characters kept in a saved report.
    pub transcript_excerpt_chars: usize,

    /// Installed system cost used for payback estimates (USD).
    pub system_cost_usd: f64,

    /// CO2 avoided per produced kWh (kg).
    pub co2_kg_per_kwh: f64,

    /// Horizon for cumulative savings (years).
    pub savings_horizon_years: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("solar_reports"),
            transcript_excerpt_chars: 1000,
            system_cost_usd: 15_000.0,
            co2_kg_per_kwh: 0.4,
            savings_horizon_years: 25,
        }
    }
}

/// Upstream agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Agent command line; the address is appended as the last argument.
    pub command: Vec<String>,

    /// Maximum agent run time in seconds.
    pub timeout_secs: u64,

    /// Pause between consecutive agent runs in seconds.
    pub delay_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            timeout_secs: 600,
            delay_secs: 30,
        }
    }
}

impl HelioConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| HelioError::Config(format!("invalid config file {}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| HelioError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
