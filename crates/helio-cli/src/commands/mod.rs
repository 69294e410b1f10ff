//! Subcommands and shared setup.

pub mod batch;
pub mod config;
pub mod process;
pub mod reports;
pub mod run;

use std::path::{Path, PathBuf};

use tracing::debug;

use helio_core::models::config::HelioConfig;
use helio_core::{CostTable, NominatimGeocoder, SolarPipeline};

/// Pipeline type used by the CLI; geocoding can be switched off.
pub type CliPipeline = SolarPipeline<Option<NominatimGeocoder>>;

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("helio")
        .join("config.json")
}

/// Config file in effect: the `--config` path or the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration from `--config`, the default file, or defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<HelioConfig> {
    if let Some(path) = explicit {
        return Ok(HelioConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(HelioConfig::from_file(&path)?)
    } else {
        Ok(HelioConfig::default())
    }
}

/// Build the pipeline from configuration and command-line overrides.
pub fn build_pipeline(config: &HelioConfig, no_geocode: bool, costs: Option<&Path>) -> CliPipeline {
    let geocoder = if no_geocode {
        None
    } else {
        NominatimGeocoder::from_config(&config.geocoding)
    };

    let table_path = costs.unwrap_or(config.costs.table_path.as_path());
    let table = CostTable::load(table_path);

    SolarPipeline::new(geocoder, table).with_production_scale(config.extraction.production_scale)
}
