//! Electricity cost reference table and country join.

use std::io::Read;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CostTableError;

lazy_static! {
    static ref HEADER_YEAR: Regex = Regex::new(r"(?:^|\D)((?:19|20)\d{2})(?:\D|$)").unwrap();
}

/// Words ignored when building a country acronym.
const ACRONYM_STOPWORDS: &[&str] = &["of", "the", "and"];

/// A dated electricity price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostObservation {
    /// Year the figure refers to.
    pub period: i32,
    /// Price in USD/kWh, if published for that period.
    pub usd_per_kwh: Option<f64>,
}

/// Electricity prices for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub country: String,
    pub observations: Vec<CostObservation>,
}

impl CostEntry {
    pub fn new(country: impl Into<String>, observations: Vec<CostObservation>) -> Self {
        Self {
            country: country.into(),
            observations,
        }
    }

    /// Newest available price.
    pub fn latest_cost(&self) -> Option<f64> {
        self.observations
            .iter()
            .filter_map(|o| o.usd_per_kwh.map(|cost| (o.period, cost)))
            .max_by_key(|(period, _)| *period)
            .map(|(_, cost)| cost)
    }
}

/// How a query matched a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Same name after case folding.
    Exact,
    /// One name contains the other, or the query is the entry's acronym.
    Fuzzy,
}

/// Immutable table of electricity costs keyed by country.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    entries: Vec<IndexedEntry>,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    key: String,
    acronym: String,
    entry: CostEntry,
}

impl CostTable {
    /// Empty table; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table from in-memory entries.
    pub fn from_entries(entries: impl IntoIterator<Item = CostEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| IndexedEntry {
                key: fold_name(&entry.country),
                acronym: acronym(&entry.country),
                entry,
            })
            .collect();
        Self { entries }
    }

    /// Load a CSV table, falling back to an empty table on any error.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(table) => {
                info!("Loaded {} cost entries from {}", table.len(), path.display());
                table
            }
            Err(e) => {
                warn!("Cost table unavailable, continuing without costs: {}", e);
                Self::empty()
            }
        }
    }

    /// Load a CSV table from a file.
    pub fn from_path(path: &Path) -> Result<Self, CostTableError> {
        let file = std::fs::File::open(path).map_err(|source| CostTableError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse a CSV table.
    ///
    /// The country column is the first header containing "country"; every
    /// header containing a year (e.g. `cost_2024_usd_kwh`) is a price column.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CostTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let country_col = headers
            .iter()
            .position(|h| h.to_lowercase().contains("country"))
            .ok_or(CostTableError::MissingCountryColumn)?;

        let year_cols: Vec<(usize, i32)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != country_col)
            .filter_map(|(i, h)| {
                HEADER_YEAR
                    .captures(h)
                    .and_then(|c| c[1].parse().ok())
                    .map(|year| (i, year))
            })
            .collect();

        debug!("Cost table has {} dated columns", year_cols.len());

        let mut entries = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let country = record.get(country_col).unwrap_or_default();
            if country.is_empty() {
                continue;
            }

            let observations = year_cols
                .iter()
                .map(|(col, year)| CostObservation {
                    period: *year,
                    usd_per_kwh: record
                        .get(*col)
                        .and_then(|v| v.parse::<f64>().ok())
                        .filter(|v| v.is_finite()),
                })
                .collect();

            entries.push(CostEntry::new(country, observations));
        }

        Ok(Self::from_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `country`: exact match first, then fuzzy.
    pub fn find(&self, country: &str) -> Option<(&CostEntry, MatchKind)> {
        let query = fold_name(country);
        if query.is_empty() {
            return None;
        }

        if let Some(indexed) = self.entries.iter().find(|e| e.key == query) {
            return Some((&indexed.entry, MatchKind::Exact));
        }

        self.entries
            .iter()
            .find(|e| {
                !e.key.is_empty()
                    && (e.key.contains(&query) || query.contains(&e.key) || e.acronym == query)
            })
            .map(|e| (&e.entry, MatchKind::Fuzzy))
    }

    /// Newest electricity cost for `country` in USD/kWh.
    pub fn lookup_cost(&self, country: &str) -> Option<f64> {
        let Some((entry, kind)) = self.find(country) else {
            debug!("No cost entry for {}", country);
            return None;
        };

        let cost = entry.latest_cost();
        debug!(
            "Matched {} to {} ({:?}), cost {:?}",
            country, entry.country, kind, cost
        );
        cost
    }
}

/// Fold a country name for comparison: strip accents, lower-case, collapse
/// punctuation and whitespace.
pub fn fold_name(name: &str) -> String {
    let stripped: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn acronym(name: &str) -> String {
    let folded = fold_name(name);
    let words: Vec<&str> = folded
        .split_whitespace()
        .filter(|w| !ACRONYM_STOPWORDS.contains(w))
        .collect();
    if words.len() < 2 {
        return String::new();
    }
    words.iter().filter_map(|w| w.chars().next()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn obs(period: i32, cost: Option<f64>) -> CostObservation {
        CostObservation {
            period,
            usd_per_kwh: cost,
        }
    }

    fn fixture() -> CostTable {
        CostTable::from_entries([
            CostEntry::new("France", vec![obs(2022, Some(0.21)), obs(2024, Some(0.27))]),
            CostEntry::new("United States of America", vec![obs(2024, Some(0.17))]),
            CostEntry::new("Sénégal", vec![obs(2022, Some(0.19)), obs(2024, Some(0.22))]),
            CostEntry::new("Germany", vec![obs(2022, Some(0.38)), obs(2024, None)]),
            CostEntry::new("Atlantis", vec![obs(2022, None), obs(2024, None)]),
        ])
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let table = fixture();
        assert_eq!(table.lookup_cost("france"), Some(0.27));
        assert_eq!(table.find("FRANCE").map(|(_, k)| k), Some(MatchKind::Exact));
    }

    #[test]
    fn test_prefers_newest_figure() {
        assert_eq!(fixture().lookup_cost("France"), Some(0.27));
    }

    #[test]
    fn test_falls_back_to_older_figure() {
        assert_eq!(fixture().lookup_cost("Germany"), Some(0.38));
    }

    #[test]
    fn test_no_figures_is_absent() {
        assert_eq!(fixture().lookup_cost("Atlantis"), None);
    }

    #[test]
    fn test_acronym_fuzzy_match() {
        let table = fixture();
        assert_eq!(table.lookup_cost("USA"), Some(0.17));
        assert_eq!(table.find("USA").map(|(_, k)| k), Some(MatchKind::Fuzzy));
    }

    #[test]
    fn test_substring_fuzzy_match() {
        let table = fixture();
        assert_eq!(table.lookup_cost("United States"), Some(0.17));
        assert_eq!(table.lookup_cost("Republic of France"), Some(0.27));
    }

    #[test]
    fn test_accent_folding() {
        assert_eq!(fixture().lookup_cost("Senegal"), Some(0.22));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(fixture().lookup_cost("Narnia"), None);
        assert_eq!(fixture().lookup_cost(""), None);
        assert_eq!(CostTable::empty().lookup_cost("France"), None);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let table = fixture();
        let first = table.lookup_cost("USA");
        for _ in 0..3 {
            assert_eq!(table.lookup_cost("USA"), first);
        }
    }

    #[test]
    fn test_from_csv() {
        let csv = "Country,cost_2022_usd_kwh,cost_2024_usd_kwh,notes\n\
                   France,0.21,0.27,household\n\
                   Germany,0.38,,household\n\
                   ,0.1,0.1,orphan\n";
        let table = CostTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup_cost("France"), Some(0.27));
        assert_eq!(table.lookup_cost("Germany"), Some(0.38));
    }

    #[test]
    fn test_csv_without_country_column() {
        let result = CostTable::from_reader("name,2024\nFrance,0.2\n".as_bytes());
        assert!(matches!(result, Err(CostTableError::MissingCountryColumn)));
    }

    #[test]
    fn test_missing_file_gives_empty_table() {
        let table = CostTable::load(Path::new("/nonexistent/costs.csv"));
        assert!(table.is_empty());
        assert_eq!(table.lookup_cost("France"), None);
    }

    #[test]
    fn test_fold_name() {
        assert_eq!(fold_name("  Côte d'Ivoire "), "cote d ivoire");
        assert_eq!(fold_name("SÉNÉGAL"), "senegal");
    }
}
