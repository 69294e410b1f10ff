//! Rule-based field extractors for solar transcripts.
//!
//! Each field owns an ordered table of [`PatternRule`]s, most specific first.
//! Extractors walk the table in order and, within a rule, every match in the
//! text; the first candidate accepted by the bounds check wins.

pub mod bounds;
pub mod coordinates;
pub mod irradiation;
pub mod numbers;
pub mod patterns;
pub mod production;

pub use bounds::{in_bounds, valid_irradiation, valid_latitude, valid_longitude, valid_production};
pub use coordinates::{CoordinatesExtractor, GeoPoint};
pub use irradiation::IrradiationExtractor;
pub use numbers::parse_number;
pub use production::ProductionExtractor;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::models::Field;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all valid occurrences of the field, in rule priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in the normalized text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
    /// Name of the rule that produced the match.
    pub rule: &'static str,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
            rule: "",
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = rule;
        self
    }
}

/// A value that was found in the text but rejected by the bounds check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscardedValue {
    /// Field the value was parsed for.
    pub field: Field,
    /// Parsed value.
    pub value: f64,
    /// Text the value was matched in.
    pub source: String,
}

/// One entry of a field's ordered pattern table.
pub struct PatternRule<T> {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// Pattern run against lower-cased text.
    pub regex: &'static Regex,
    /// Confidence assigned to matches of this rule.
    pub confidence: f32,
    /// Turns a match into a raw (not yet bounds-checked) value.
    pub convert: fn(&Captures) -> Option<T>,
}

impl<T> PatternRule<T> {
    pub fn new(
        name: &'static str,
        regex: &'static Regex,
        confidence: f32,
        convert: fn(&Captures) -> Option<T>,
    ) -> Self {
        Self {
            name,
            regex,
            confidence,
            convert,
        }
    }
}

/// Outcome of running a rule table over a text.
#[derive(Debug, Clone)]
pub struct RuleScan<T> {
    /// Accepted matches in priority order.
    pub matches: Vec<ExtractionMatch<T>>,
    /// Candidates rejected by the bounds check.
    pub discarded: Vec<DiscardedValue>,
}

impl<T> Default for RuleScan<T> {
    fn default() -> Self {
        Self {
            matches: Vec::new(),
            discarded: Vec::new(),
        }
    }
}

impl<T> RuleScan<T> {
    fn discard(&mut self, field: Field, value: f64, source: &str) {
        let already = self
            .discarded
            .iter()
            .any(|d| d.field == field && d.value == value);
        if !already {
            self.discarded.push(DiscardedValue {
                field,
                value,
                source: source.to_string(),
            });
        }
    }
}

/// Run `rules` over `text` in order.
///
/// `check` returns the fields whose bounds a candidate violates, with the
/// offending values; an empty list accepts the candidate. With `first_only`
/// the scan stops at the first accepted candidate.
pub fn scan_rules<T>(
    rules: &[PatternRule<T>],
    text: &str,
    first_only: bool,
    check: impl Fn(&T) -> Vec<(Field, f64)>,
) -> RuleScan<T> {
    let mut scan = RuleScan::default();

    for rule in rules {
        for caps in rule.regex.captures_iter(text) {
            let Some(full_match) = caps.get(0) else {
                continue;
            };
            let Some(value) = (rule.convert)(&caps) else {
                continue;
            };

            let violations = check(&value);
            if !violations.is_empty() {
                for (field, raw) in violations {
                    scan.discard(field, raw, full_match.as_str());
                }
                continue;
            }

            scan.matches.push(
                ExtractionMatch::new(value, rule.confidence, full_match.as_str())
                    .with_position(full_match.start(), full_match.end())
                    .with_rule(rule.name),
            );
            if first_only {
                return scan;
            }
        }
    }

    scan
}

/// Lower-case a transcript for matching.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
}

/// Converter for rules whose first group is a single number.
pub(crate) fn capture_number(caps: &Captures) -> Option<f64> {
    caps.get(1).and_then(|m| parse_number(m.as_str()))
}

/// Bounds check for a single-valued field.
pub(crate) fn check_scalar(field: Field) -> impl Fn(&f64) -> Vec<(Field, f64)> {
    move |value| {
        if in_bounds(field, *value) {
            Vec::new()
        } else {
            vec![(field, *value)]
        }
    }
}
