//! Two-tier transcript parser: terminal block first, per-field rules second.

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{DiscardedValue, PatternExtractor, RecordExtractor, StructuredBlockExtractor};
use crate::models::SolarRecord;

/// Which tier produced the final field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionTier {
    /// The terminal block alone supplied all four fields.
    Structured,
    /// Per-field rules were consulted.
    PerField,
}

/// Result of transcript extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: SolarRecord,
    /// Tier that produced the record.
    pub tier: ExtractionTier,
    /// Values found but rejected, for fields that stayed absent.
    pub discarded: Vec<DiscardedValue>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Transcript parser combining the structured and per-field tiers.
///
/// Pure function of its input: no I/O, no retries.
pub struct SolarExtractor<S = StructuredBlockExtractor, F = PatternExtractor> {
    structured: S,
    fallback: F,
}

impl SolarExtractor {
    /// Create a parser with the default tiers.
    pub fn new() -> Self {
        Self {
            structured: StructuredBlockExtractor::new(),
            fallback: PatternExtractor::new(),
        }
    }
}

impl Default for SolarExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RecordExtractor, F: RecordExtractor> SolarExtractor<S, F> {
    /// Create a parser with custom tiers.
    pub fn with_tiers(structured: S, fallback: F) -> Self {
        Self {
            structured,
            fallback,
        }
    }

    /// Extract a record from a transcript.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let timestamp = Utc::now();

        info!("Parsing transcript from {} characters of text", text.len());

        let structured = self.structured.extract_fields(text);
        let (fields, discarded, tier) = if structured.fields.is_complete() {
            debug!("Terminal block complete, skipping per-field rules");
            (structured.fields, structured.discarded, ExtractionTier::Structured)
        } else {
            let fallback = self.fallback.extract_fields(text);
            let mut fields = structured.fields;
            fields.fill_from(&fallback.fields);

            let mut discarded = structured.discarded;
            discarded.extend(fallback.discarded);
            (fields, discarded, ExtractionTier::PerField)
        };

        // Only fields that ended up absent count as discarded
        let mut unique: Vec<DiscardedValue> = Vec::with_capacity(discarded.len());
        for d in discarded {
            let seen = unique.iter().any(|u| u.field == d.field && u.value == d.value);
            if fields.get(d.field).is_none() && !seen {
                unique.push(d);
            }
        }
        let discarded = unique;

        let record = SolarRecord::from_fields(timestamp, fields);

        let mut warnings: Vec<String> = discarded
            .iter()
            .map(|d| format!("Discarded out-of-range {} value {}", d.field, d.value))
            .collect();
        for field in record.missing_fields() {
            warnings.push(format!("Could not extract {}", field));
        }

        debug!(
            "Extracted {} record via {:?} tier with {} warnings",
            record.status(),
            tier,
            warnings.len()
        );

        ExtractionResult {
            record,
            tier,
            discarded,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
