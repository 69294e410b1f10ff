//! Strict extraction of the terminal data block.

use regex::Captures;
use tracing::debug;

use super::rules::patterns::STRUCTURED_BLOCK;
use super::rules::{bounds, normalize_text, parse_number, DiscardedValue};
use super::{RecordExtractor, TierOutput};
use crate::models::{ExtractedFields, Field};

/// Extracts all four fields from the block a transcript is asked to end with:
///
/// ```text
/// EXTRACTED DATA:
/// Coordinates: <lat>, <lon>
/// Production: <value> kWh
/// Irradiation: <value> kWh/m²
/// ```
///
/// Each value is bounds-checked on its own; an invalid value is dropped
/// without invalidating the rest of the block.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredBlockExtractor;

impl StructuredBlockExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl RecordExtractor for StructuredBlockExtractor {
    fn extract_fields(&self, text: &str) -> TierOutput {
        let text = normalize_text(text);
        let Some(caps) = STRUCTURED_BLOCK.captures(&text) else {
            debug!("No terminal data block found");
            return TierOutput::default();
        };

        let source = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let mut output = TierOutput::default();
        let mut take = |index: usize, field: Field| -> Option<f64> {
            let value = group_number(&caps, index)?;
            if bounds::in_bounds(field, value) {
                Some(value)
            } else {
                output.discarded.push(DiscardedValue {
                    field,
                    value,
                    source: source.to_string(),
                });
                None
            }
        };

        let fields = ExtractedFields {
            latitude: take(1, Field::Latitude),
            longitude: take(2, Field::Longitude),
            annual_production_kwh: take(3, Field::AnnualProduction),
            irradiation_kwh_per_m2: take(4, Field::Irradiation),
        };
        output.fields = fields;

        debug!("Terminal block yielded {} of 4 fields", output.fields.count());
        output
    }
}

fn group_number(caps: &Captures, index: usize) -> Option<f64> {
    caps.get(index).and_then(|m| parse_number(m.as_str()))
}
