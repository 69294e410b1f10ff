//! Yearly solar irradiation extraction.

use lazy_static::lazy_static;

use super::patterns::{IRRADIATION_LABELED, IRRADIATION_LOOSE, IRRADIATION_PVGIS, IRRADIATION_UNIT};
use super::{
    capture_number, check_scalar, normalize_text, scan_rules, ExtractionMatch, FieldExtractor,
    PatternRule, RuleScan,
};
use crate::models::Field;

lazy_static! {
    /// Irradiation rules, most specific first.
    pub static ref IRRADIATION_RULES: Vec<PatternRule<f64>> = vec![
        PatternRule::new("pvgis_label", &IRRADIATION_PVGIS, 0.95, capture_number),
        PatternRule::new("labeled_kwh", &IRRADIATION_LABELED, 0.9, capture_number),
        PatternRule::new("loose_label", &IRRADIATION_LOOSE, 0.7, capture_number),
        PatternRule::new("area_unit", &IRRADIATION_UNIT, 0.6, capture_number),
    ];
}

/// Irradiation field extractor.
pub struct IrradiationExtractor {
    rules: &'static [PatternRule<f64>],
}

impl IrradiationExtractor {
    pub fn new() -> Self {
        Self {
            rules: &IRRADIATION_RULES,
        }
    }

    /// Run the rule table, recording bounds rejections.
    pub fn scan(&self, text: &str, first_only: bool) -> RuleScan<f64> {
        let text = normalize_text(text);
        scan_rules(self.rules, &text, first_only, check_scalar(Field::Irradiation))
    }
}

impl Default for IrradiationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IrradiationExtractor {
    type Output = ExtractionMatch<f64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.scan(text, true).matches.into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.scan(text, false).matches
    }
}
