//! Per-query pipeline: transcript, extraction, scaling and enrichment.

use tracing::{debug, info};

use crate::enrich::{CostTable, ReverseGeocoder};
use crate::error::SourceError;
use crate::extract::{ExtractionResult, SolarExtractor};
use crate::source::TranscriptSource;

/// Runs one query at a time. Holds no state across queries.
pub struct SolarPipeline<G> {
    extractor: SolarExtractor,
    geocoder: G,
    costs: CostTable,
    production_scale: Option<f64>,
}

impl<G: ReverseGeocoder + Sync> SolarPipeline<G> {
    pub fn new(geocoder: G, costs: CostTable) -> Self {
        Self {
            extractor: SolarExtractor::new(),
            geocoder,
            costs,
            production_scale: None,
        }
    }

    /// Multiply extracted production by `factor` before enrichment.
    pub fn with_production_scale(mut self, factor: Option<f64>) -> Self {
        self.production_scale = factor;
        self
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    /// Extract, scale and enrich a transcript. Never fails.
    pub async fn process_transcript(&self, text: &str) -> ExtractionResult {
        let mut result = self.extractor.extract(text);

        if let Some(factor) = self.production_scale {
            debug!("Scaling production by {}", factor);
            result.record.scale_production(factor);
        }

        let Some((latitude, longitude)) = result.record.coordinates() else {
            debug!("Coordinates incomplete, skipping enrichment");
            return result;
        };

        let Some(country) = self.geocoder.resolve_country(latitude, longitude).await else {
            result.warnings.push("Could not resolve country from coordinates".to_string());
            return result;
        };

        let cost = self.costs.lookup_cost(&country);
        if cost.is_none() {
            result
                .warnings
                .push(format!("No electricity cost found for {}", country));
        }

        result.record.country = Some(country);
        result.record.electricity_cost_usd_per_kwh = cost;
        result
    }

    /// Fetch the transcript for `query` from `source` and process it.
    pub async fn run<S: TranscriptSource + Sync>(
        &self,
        source: &S,
        query: &str,
    ) -> Result<(String, ExtractionResult), SourceError> {
        let transcript = source.fetch(query).await?;
        let result = self.process_transcript(&transcript).await;
        info!("Processed {}: {}", query, result.record.status());
        Ok((transcript, result))
    }
}
