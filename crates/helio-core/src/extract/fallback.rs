//! Per-field fallback extraction.

use tracing::debug;

use super::rules::{CoordinatesExtractor, IrradiationExtractor, ProductionExtractor};
use super::{RecordExtractor, TierOutput};
use crate::models::ExtractedFields;

/// Runs each field's rule table independently over the whole transcript.
#[derive(Default)]
pub struct PatternExtractor {
    coordinates: CoordinatesExtractor,
    production: ProductionExtractor,
    irradiation: IrradiationExtractor,
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordExtractor for PatternExtractor {
    fn extract_fields(&self, text: &str) -> TierOutput {
        let coordinates = self.coordinates.scan(text, true);
        let production = self.production.scan(text, true);
        let irradiation = self.irradiation.scan(text, true);

        let point = coordinates.matches.first();
        let production_match = production.matches.first();
        let irradiation_match = irradiation.matches.first();

        for (name, rule) in [
            ("coordinates", point.map(|m| m.rule)),
            ("production", production_match.map(|m| m.rule)),
            ("irradiation", irradiation_match.map(|m| m.rule)),
        ] {
            match rule {
                Some(rule) => debug!("Matched {} with rule {}", name, rule),
                None => debug!("No valid match for {}", name),
            }
        }

        let fields = ExtractedFields {
            latitude: point.map(|m| m.value.latitude),
            longitude: point.map(|m| m.value.longitude),
            annual_production_kwh: production_match.map(|m| m.value),
            irradiation_kwh_per_m2: irradiation_match.map(|m| m.value),
        };

        let mut discarded = coordinates.discarded;
        discarded.extend(production.discarded);
        discarded.extend(irradiation.discarded);

        TierOutput { fields, discarded }
    }
}
