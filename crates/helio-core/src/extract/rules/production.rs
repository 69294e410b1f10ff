//! Annual energy production extraction.

use lazy_static::lazy_static;
use regex::Captures;

use super::patterns::{
    PRODUCTION_BARE_KWH, PRODUCTION_LABELED, PRODUCTION_LOOSE, PRODUCTION_PER_YEAR,
    PRODUCTION_PVGIS,
};
use super::{
    capture_number, check_scalar, normalize_text, scan_rules, ExtractionMatch, FieldExtractor,
    PatternRule, RuleScan,
};
use crate::models::Field;

lazy_static! {
    /// Production rules, most specific first.
    pub static ref PRODUCTION_RULES: Vec<PatternRule<f64>> = vec![
        PatternRule::new("pvgis_label", &PRODUCTION_PVGIS, 0.95, capture_number),
        PatternRule::new("labeled_kwh", &PRODUCTION_LABELED, 0.9, capture_number),
        PatternRule::new("kwh_per_year", &PRODUCTION_PER_YEAR, 0.75, capture_number),
        PatternRule::new("loose_label", &PRODUCTION_LOOSE, 0.6, capture_number),
        PatternRule::new("bare_kwh", &PRODUCTION_BARE_KWH, 0.4, bare_kwh),
    ];
}

/// A bare "<number> kWh" that is not an area unit (kWh/m²).
fn bare_kwh(caps: &Captures) -> Option<f64> {
    if caps.get(2).is_some() {
        return None;
    }
    capture_number(caps)
}

/// Annual production field extractor.
pub struct ProductionExtractor {
    rules: &'static [PatternRule<f64>],
}

impl ProductionExtractor {
    pub fn new() -> Self {
        Self {
            rules: &PRODUCTION_RULES,
        }
    }

    /// Run the rule table, recording bounds rejections.
    pub fn scan(&self, text: &str, first_only: bool) -> RuleScan<f64> {
        let text = normalize_text(text);
        scan_rules(self.rules, &text, first_only, check_scalar(Field::AnnualProduction))
    }
}

impl Default for ProductionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ProductionExtractor {
    type Output = ExtractionMatch<f64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.scan(text, true).matches.into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.scan(text, false).matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production(text: &str) -> Option<f64> {
        ProductionExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_pvgis_label() {
        assert_eq!(
            production("Yearly PV energy production [kWh]: 1696.92"),
            Some(1696.92)
        );
        assert_eq!(
            production("Yearly PV energy production (kWh) 1,696.92"),
            Some(1696.92)
        );
    }

    #[test]
    fn test_labeled_kwh() {
        assert_eq!(production("Production: 4847 kWh"), Some(4847.0));
    }

    #[test]
    fn test_label_beats_loose_number() {
        let text = "The panel costs about 1200.50 kWh of energy to build. Production: 4847 kWh";
        let m = ProductionExtractor::new().extract(text).unwrap();
        assert_eq!(m.value, 4847.0);
        assert_eq!(m.rule, "labeled_kwh");
    }

    #[test]
    fn test_per_year_and_bare() {
        assert_eq!(production("about 1450 kWh per year"), Some(1450.0));
        assert_eq!(production("environ 1500 kWh/an"), Some(1500.0));
        assert_eq!(production("we got 1696.92 kWh overall"), Some(1696.92));
    }

    #[test]
    fn test_bare_kwh_skips_area_unit() {
        assert_eq!(production("irradiance of 1961.40 kWh/m² on the plane"), None);
    }

    #[test]
    fn test_negative_value_discarded() {
        let scan = ProductionExtractor::new().scan("production: -5 kwh", true);
        assert!(scan.matches.is_empty());
        assert_eq!(scan.discarded[0].value, -5.0);
    }

    #[test]
    fn test_minus_sign_kept_on_unlabeled_values() {
        assert_eq!(production("we got -4847.00 kWh overall"), None);
        assert_eq!(production("-5 kWh per year"), None);

        let scan = ProductionExtractor::new().scan("roughly -1450 kWh per year", true);
        assert!(scan.matches.is_empty());
        assert_eq!(scan.discarded.len(), 1);
        assert_eq!(scan.discarded[0].value, -1450.0);
    }

    #[test]
    fn test_value_glued_to_digits_ignored() {
        // No trailing digits may be cut out of a longer number
        assert_eq!(production("1234567.00 kWh"), None);
        assert_eq!(production("12345.678 kWh"), None);
    }

    #[test]
    fn test_zero_value_discarded_then_next_match_used() {
        let text = "Production: 0 kWh (first try). Production: 4200 kWh";
        assert_eq!(production(text), Some(4200.0));

        let scan = ProductionExtractor::new().scan(text, true);
        assert_eq!(scan.discarded.len(), 1);
        assert_eq!(scan.discarded[0].value, 0.0);
    }

    #[test]
    fn test_extract_all_in_priority_order() {
        let text = "Production: 4847 kWh. Yearly PV energy production [kWh]: 1696.92";
        let values: Vec<f64> = ProductionExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(values[0], 1696.92);
        assert_eq!(values[1], 4847.0);
    }
}
