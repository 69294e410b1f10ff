//! Persisted report model and derived economics.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::ReportConfig;
use super::record::SolarRecord;
use crate::extract::{DiscardedValue, ExtractionTier};

/// A report for one query, as saved to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarReport {
    /// Address or transcript path the report was produced for.
    pub query: String,

    /// Instant the report was assembled.
    pub generated_at: DateTime<Utc>,

    /// Leading part of the transcript.
    pub transcript_excerpt: String,

    /// Extracted and enriched record.
    #[serde(rename = "extracted_data")]
    pub record: SolarRecord,

    /// Extraction tier that produced the record.
    pub tier: ExtractionTier,

    /// Values rejected by the bounds check.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discarded: Vec<DiscardedValue>,

    /// Extraction warnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Savings and emissions estimates.
    pub economics: Economics,
}

/// Qualitative rating of the annual production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionRating {
    Excellent,
    Good,
    Fair,
    Low,
}

impl ProductionRating {
    /// Rating for an annual production in kWh.
    pub fn from_production(kwh: f64) -> Self {
        if kwh > 5000.0 {
            ProductionRating::Excellent
        } else if kwh > 4000.0 {
            ProductionRating::Good
        } else if kwh > 3000.0 {
            ProductionRating::Fair
        } else {
            ProductionRating::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionRating::Excellent => "excellent",
            ProductionRating::Good => "good",
            ProductionRating::Fair => "fair",
            ProductionRating::Low => "low",
        }
    }
}

impl fmt::Display for ProductionRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs of the economics estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicsParams {
    pub system_cost_usd: f64,
    pub co2_kg_per_kwh: f64,
    pub horizon_years: u32,
}

impl Default for EconomicsParams {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for EconomicsParams {
    fn from(config: &ReportConfig) -> Self {
        Self {
            system_cost_usd: config.system_cost_usd,
            co2_kg_per_kwh: config.co2_kg_per_kwh,
            horizon_years: config.savings_horizon_years,
        }
    }
}

/// Savings and emissions derived from a record. Every figure is absent when
/// its inputs are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Economics {
    /// Production times electricity cost (USD).
    pub annual_savings_usd: Option<f64>,

    /// CO2 avoided per year (kg).
    pub co2_avoided_kg: Option<f64>,

    /// Years until savings cover the system cost.
    pub payback_years: Option<f64>,

    /// First whole year in which cumulative savings reach the system cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_even_year: Option<u32>,

    /// Cumulative savings at the end of each year of the horizon (USD).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cumulative_savings_usd: Vec<f64>,

    /// Production rating.
    pub rating: Option<ProductionRating>,
}

impl Economics {
    /// Compute economics for `record`.
    pub fn compute(record: &SolarRecord, params: &EconomicsParams) -> Self {
        let production = record.annual_production_kwh();
        let savings = production
            .zip(record.electricity_cost_usd_per_kwh)
            .map(|(kwh, cost)| kwh * cost);

        let payback_years = savings
            .filter(|s| *s > 0.0)
            .map(|s| params.system_cost_usd / s);

        let cumulative_savings_usd: Vec<f64> = match savings {
            Some(s) if s > 0.0 => (1..=params.horizon_years).map(|y| s * y as f64).collect(),
            _ => Vec::new(),
        };

        let break_even_year = cumulative_savings_usd
            .iter()
            .position(|total| *total >= params.system_cost_usd)
            .map(|i| i as u32 + 1);

        Self {
            annual_savings_usd: savings,
            co2_avoided_kg: production.map(|kwh| kwh * params.co2_kg_per_kwh),
            payback_years,
            break_even_year,
            cumulative_savings_usd,
            rating: production.map(ProductionRating::from_production),
        }
    }
}
