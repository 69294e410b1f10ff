//! Merges an extraction result into a persisted report.

use chrono::Utc;
use tracing::debug;

use crate::extract::ExtractionResult;
use crate::models::config::ReportConfig;
use crate::models::report::{Economics, EconomicsParams, SolarReport};

/// Builds reports from enriched extraction results.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    params: EconomicsParams,
    excerpt_chars: usize,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

impl ReportAssembler {
    pub fn new(params: EconomicsParams, excerpt_chars: usize) -> Self {
        Self {
            params,
            excerpt_chars,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(EconomicsParams::from(config), config.transcript_excerpt_chars)
    }

    /// Assemble the report for `query` from its transcript and result.
    pub fn assemble(&self, query: &str, transcript: &str, result: ExtractionResult) -> SolarReport {
        let economics = Economics::compute(&result.record, &self.params);
        debug!(
            "Assembled {} report for {} (savings {:?})",
            result.record.status(),
            query,
            economics.annual_savings_usd
        );

        SolarReport {
            query: query.to_string(),
            generated_at: Utc::now(),
            transcript_excerpt: excerpt(transcript, self.excerpt_chars),
            record: result.record,
            tier: result.tier,
            discarded: result.discarded,
            warnings: result.warnings,
            economics,
        }
    }
}

/// First `max_chars` characters of `text`.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
