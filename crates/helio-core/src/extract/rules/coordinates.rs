//! Latitude/longitude pair extraction.

use lazy_static::lazy_static;
use regex::Captures;
use serde::{Deserialize, Serialize};

use super::patterns::{COORDS_DECIMAL_PAIR, COORDS_HEMISPHERE, COORDS_LABELED, LAT_LON_LABELED};
use super::{
    bounds, normalize_text, parse_number, scan_rules, ExtractionMatch, FieldExtractor,
    PatternRule, RuleScan,
};
use crate::models::Field;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

lazy_static! {
    /// Coordinate rules, most specific first.
    pub static ref COORDINATE_RULES: Vec<PatternRule<GeoPoint>> = vec![
        PatternRule::new("labeled_pair", &COORDS_LABELED, 0.95, signed_pair),
        PatternRule::new("lat_lon_labels", &LAT_LON_LABELED, 0.9, signed_pair),
        PatternRule::new("hemisphere", &COORDS_HEMISPHERE, 0.85, hemisphere_pair),
        PatternRule::new("decimal_pair", &COORDS_DECIMAL_PAIR, 0.5, signed_pair),
    ];
}

/// Groups 1 and 2 hold signed decimal degrees.
fn signed_pair(caps: &Captures) -> Option<GeoPoint> {
    let latitude = parse_number(caps.get(1)?.as_str())?;
    let longitude = parse_number(caps.get(2)?.as_str())?;
    Some(GeoPoint {
        latitude,
        longitude,
    })
}

/// Groups hold `<lat> <n|s> <lon> <e|w>`.
fn hemisphere_pair(caps: &Captures) -> Option<GeoPoint> {
    let latitude = parse_number(caps.get(1)?.as_str())?;
    let longitude = parse_number(caps.get(3)?.as_str())?;
    let lat_sign = if caps.get(2)?.as_str() == "s" { -1.0 } else { 1.0 };
    let lon_sign = if caps.get(4)?.as_str() == "w" { -1.0 } else { 1.0 };
    Some(GeoPoint {
        latitude: latitude * lat_sign,
        longitude: longitude * lon_sign,
    })
}

fn check_point(point: &GeoPoint) -> Vec<(Field, f64)> {
    let mut violations = Vec::new();
    if !bounds::valid_latitude(point.latitude) {
        violations.push((Field::Latitude, point.latitude));
    }
    if !bounds::valid_longitude(point.longitude) {
        violations.push((Field::Longitude, point.longitude));
    }
    violations
}

/// Coordinate pair extractor.
///
/// A pair is only accepted when both components are within bounds.
pub struct CoordinatesExtractor {
    rules: &'static [PatternRule<GeoPoint>],
}

impl CoordinatesExtractor {
    pub fn new() -> Self {
        Self {
            rules: &COORDINATE_RULES,
        }
    }

    /// Run the rule table, recording bounds rejections.
    pub fn scan(&self, text: &str, first_only: bool) -> RuleScan<GeoPoint> {
        let text = normalize_text(text);
        scan_rules(self.rules, &text, first_only, check_point)
    }
}

impl Default for CoordinatesExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CoordinatesExtractor {
    type Output = ExtractionMatch<GeoPoint>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.scan(text, true).matches.into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.scan(text, false).matches
    }
}
