//! Regex patterns for solar transcript extraction.
//!
//! All patterns are written in lower case and run against lower-cased text.
//! Value groups keep a leading minus sign so the bounds check can reject it.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Terminal block (English and French headers)
    pub static ref STRUCTURED_BLOCK: Regex = Regex::new(
        r"(?s)(?:extracted\s+data|donn[ée]es\s+extraites)\s*:.*?coordinates?\s*:\s*(-?\d+(?:\.\d+)?)\s*°?\s*,\s*(-?\d+(?:\.\d+)?).*?production\s*:\s*(-?\d[\d.,]*)\s*kwh.*?irradiation\s*:\s*(-?\d[\d.,]*)\s*kwh\s*/\s*m(?:²|2|\^2)"
    ).unwrap();

    // Coordinate pairs
    pub static ref COORDS_LABELED: Regex = Regex::new(
        r"coord(?:inate)?s?(?:\s*\([^)]*\))?\s*[:=]\s*\(?\s*(-?\d{1,3}(?:\.\d+)?)\s*°?\s*,\s*(-?\d{1,3}(?:\.\d+)?)"
    ).unwrap();

    pub static ref LAT_LON_LABELED: Regex = Regex::new(
        r"lat(?:itude)?\s*[:=]?\s*(-?\d{1,3}(?:\.\d+)?)\s*°?\s*[,;/]?\s*(?:and\s+)?lon(?:g(?:itude)?)?\s*[:=]?\s*(-?\d{1,3}(?:\.\d+)?)"
    ).unwrap();

    pub static ref COORDS_HEMISPHERE: Regex = Regex::new(
        r"(?:^|[^\d.\-])(\d{1,3}(?:\.\d+)?)\s*°?\s*([ns])\b\s*,?\s*(\d{1,3}(?:\.\d+)?)\s*°?\s*([ew])\b"
    ).unwrap();

    pub static ref COORDS_DECIMAL_PAIR: Regex = Regex::new(
        r"(?:^|[^\d.\-])(-?\d{1,2}\.\d{3,})\s*,\s*(-?\d{1,3}\.\d{3,})"
    ).unwrap();

    // Annual production
    pub static ref PRODUCTION_PVGIS: Regex = Regex::new(
        r"yearly\s+pv\s+energy\s+production\s*(?:[\[(][^\])]*[\])])?\s*:?\s*(-?\d[\d.,]*)"
    ).unwrap();

    pub static ref PRODUCTION_LABELED: Regex = Regex::new(
        r"production\s*:\s*(-?\d[\d.,]*)\s*kwh\b"
    ).unwrap();

    pub static ref PRODUCTION_PER_YEAR: Regex = Regex::new(
        r"(?:^|[^\d.\-])(-?\d[\d.,]*)\s*kwh\s*(?:/|per|a|each)?\s*(?:year|yr|annum|an)\b"
    ).unwrap();

    pub static ref PRODUCTION_LOOSE: Regex = Regex::new(
        r"production[:\s]+(-?\d[\d.,]*)"
    ).unwrap();

    pub static ref PRODUCTION_BARE_KWH: Regex = Regex::new(
        r"(?:^|[^\d.\-])(-?\d{3,5}\.\d{1,2})\s*kwh(\s*/?\s*m(?:²|2|\^2|\b))?"
    ).unwrap();

    // Solar irradiation
    pub static ref IRRADIATION_PVGIS: Regex = Regex::new(
        r"yearly\s+in-plane\s+irradiation\s*(?:[\[(][^\])]*[\])])?\s*:?\s*(-?\d[\d.,]*)"
    ).unwrap();

    pub static ref IRRADIATION_LABELED: Regex = Regex::new(
        r"irradiation\s*:\s*(-?\d[\d.,]*)\s*kwh"
    ).unwrap();

    pub static ref IRRADIATION_LOOSE: Regex = Regex::new(
        r"irradiation[:\s]+(-?\d[\d.,]*)"
    ).unwrap();

    pub static ref IRRADIATION_UNIT: Regex = Regex::new(
        r"(?:^|[^\d.\-])(-?\d[\d.,]*)\s*kwh(?:\s*/\s*|\s+)m(?:²|2|\^2|\b)"
    ).unwrap();

    // Number formats
    pub static ref THOUSANDS_GROUPED: Regex = Regex::new(
        r"^\d{1,3}(?:,\d{3})+$"
    ).unwrap();
}
