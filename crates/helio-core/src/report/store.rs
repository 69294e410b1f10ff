//! Directory of saved JSON reports.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ReportError;
use crate::models::report::SolarReport;

const FILE_PREFIX: &str = "solar_calc_";

/// Saves and loads reports as `solar_calc_<timestamp>.json` files.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `report` as pretty JSON and return its path.
    pub fn save(&self, report: &SolarReport) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let stamp = report.generated_at.format("%Y%m%d_%H%M%S_%3f").to_string();
        let mut path = self.dir.join(format!("{}{}.json", FILE_PREFIX, stamp));
        let mut suffix = 1;
        while path.exists() {
            path = self.dir.join(format!("{}{}_{}.json", FILE_PREFIX, stamp, suffix));
            suffix += 1;
        }

        let content = serde_json::to_string_pretty(report).map_err(|source| ReportError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Saved report to {}", path.display());
        Ok(path)
    }

    /// Read one report file.
    pub fn load(path: &Path) -> Result<SolarReport, ReportError> {
        let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// All readable reports, newest first.
    ///
    /// A missing directory yields no reports. Unreadable files are skipped.
    pub fn load_all(&self) -> Result<Vec<(PathBuf, SolarReport)>, ReportError> {
        if !self.dir.exists() {
            debug!("Report directory {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|source| ReportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut reports = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_report = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(FILE_PREFIX) && n.ends_with(".json"));
            if !is_report {
                continue;
            }

            match Self::load(&path) {
                Ok(report) => reports.push((path, report)),
                Err(e) => warn!("Skipping unreadable report: {}", e),
            }
        }

        reports.sort_by(|(pa, a), (pb, b)| {
            b.generated_at
                .cmp(&a.generated_at)
                .then_with(|| pb.cmp(pa))
        });
        Ok(reports)
    }

    /// The newest report, if any.
    pub fn latest(&self) -> Result<Option<(PathBuf, SolarReport)>, ReportError> {
        Ok(self.load_all()?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::SolarExtractor;
    use crate::report::ReportAssembler;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn report(query: &str) -> SolarReport {
        let text = "Yearly PV energy production [kWh]: 1696.92";
        ReportAssembler::default().assemble(query, text, SolarExtractor::new().extract(text))
    }

    #[test]
    fn test_save_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("nested").join("reports"));

        let mut saved = report("Dakar");
        saved.generated_at = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let path = store.save(&saved).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "solar_calc_20250304_050607_000.json"
        );
        let loaded = ReportStore::load(&path).unwrap();
        assert_eq!(loaded.query, "Dakar");
        assert_eq!(loaded.generated_at, saved.generated_at);
        assert_eq!(loaded.record.status(), saved.record.status());
        assert_eq!(loaded.record.annual_production_kwh(), Some(1696.92));
    }

    #[test]
    fn test_same_timestamp_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        let first = report("first");
        let mut second = report("second");
        second.generated_at = first.generated_at;

        let a = store.save(&first).unwrap();
        let b = store.save(&second).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_load_all_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        for (i, query) in ["old", "newest", "middle"].iter().enumerate() {
            let mut r = report(query);
            r.generated_at = match i {
                0 => base,
                1 => base + Duration::hours(2),
                _ => base + Duration::hours(1),
            };
            store.save(&r).unwrap();
        }

        let queries: Vec<String> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|(_, r)| r.query)
            .collect();
        assert_eq!(queries, vec!["newest", "middle", "old"]);
        assert_eq!(store.latest().unwrap().unwrap().1.query, "newest");
    }

    #[test]
    fn test_unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        store.save(&report("good")).unwrap();
        fs::write(dir.path().join("solar_calc_broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let reports = store.load_all().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].1.query, "good");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("absent"));
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.latest().unwrap().is_none());
    }
}
