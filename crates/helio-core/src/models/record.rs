//! The structured record produced from one transcript.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One of the four core fields recovered from a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Latitude,
    Longitude,
    AnnualProduction,
    Irradiation,
}

impl Field {
    /// All core fields in report order.
    pub const ALL: [Field; 4] = [
        Field::Latitude,
        Field::Longitude,
        Field::AnnualProduction,
        Field::Irradiation,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::AnnualProduction => "annual production",
            Field::Irradiation => "irradiation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Completeness of a record, derived from its core fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// All four core fields present.
    Completed,
    /// Between one and three core fields present.
    Partial,
    /// No core field present.
    #[default]
    Failed,
}

impl Status {
    /// Status for a given number of populated core fields.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Status::Failed,
            1..=3 => Status::Partial,
            _ => Status::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "completed",
            Status::Partial => "partial",
            Status::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output of an extraction tier: the four core fields, each optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtractedFields {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub annual_production_kwh: Option<f64>,
    pub irradiation_kwh_per_m2: Option<f64>,
}

impl ExtractedFields {
    /// Number of populated fields.
    pub fn count(&self) -> usize {
        [
            self.latitude,
            self.longitude,
            self.annual_production_kwh,
            self.irradiation_kwh_per_m2,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }

    pub fn is_complete(&self) -> bool {
        self.count() == 4
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Latitude => self.latitude,
            Field::Longitude => self.longitude,
            Field::AnnualProduction => self.annual_production_kwh,
            Field::Irradiation => self.irradiation_kwh_per_m2,
        }
    }

    /// Fill absent fields from `other`, keeping values already present.
    ///
    /// Coordinates move as a pair: they are taken from `other` only when both
    /// are absent here, so a lone component is never joined to another point.
    pub fn fill_from(&mut self, other: &ExtractedFields) {
        if self.latitude.is_none() && self.longitude.is_none() {
            self.latitude = other.latitude;
            self.longitude = other.longitude;
        }
        self.annual_production_kwh = self.annual_production_kwh.or(other.annual_production_kwh);
        self.irradiation_kwh_per_m2 = self.irradiation_kwh_per_m2.or(other.irradiation_kwh_per_m2);
    }
}

/// Structured record for one query.
///
/// The four core fields are only assigned inside the crate so that `status`
/// always reflects them. Enrichment fields are public and never affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarRecord {
    /// Instant extraction started.
    pub timestamp: DateTime<Utc>,

    latitude: Option<f64>,

    longitude: Option<f64>,

    annual_production_kwh: Option<f64>,

    irradiation_kwh_per_m2: Option<f64>,

    /// Country resolved from the coordinates.
    pub country: Option<String>,

    /// Electricity cost for `country` in USD/kWh.
    pub electricity_cost_usd_per_kwh: Option<f64>,

    status: Status,
}

impl SolarRecord {
    /// Empty record stamped with `timestamp`.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            latitude: None,
            longitude: None,
            annual_production_kwh: None,
            irradiation_kwh_per_m2: None,
            country: None,
            electricity_cost_usd_per_kwh: None,
            status: Status::Failed,
        }
    }

    /// Record built from extracted fields, with status derived from them.
    pub fn from_fields(timestamp: DateTime<Utc>, fields: ExtractedFields) -> Self {
        let mut record = Self::new(timestamp);
        record.set_fields(fields);
        record
    }

    pub(crate) fn set_fields(&mut self, fields: ExtractedFields) {
        self.latitude = fields.latitude;
        self.longitude = fields.longitude;
        self.annual_production_kwh = fields.annual_production_kwh;
        self.irradiation_kwh_per_m2 = fields.irradiation_kwh_per_m2;
        self.status = Status::from_count(fields.count());
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn annual_production_kwh(&self) -> Option<f64> {
        self.annual_production_kwh
    }

    pub fn irradiation_kwh_per_m2(&self) -> Option<f64> {
        self.irradiation_kwh_per_m2
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Both coordinates, if present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Snapshot of the core fields.
    pub fn fields(&self) -> ExtractedFields {
        ExtractedFields {
            latitude: self.latitude,
            longitude: self.longitude,
            annual_production_kwh: self.annual_production_kwh,
            irradiation_kwh_per_m2: self.irradiation_kwh_per_m2,
        }
    }

    /// Core fields that are absent.
    pub fn missing_fields(&self) -> Vec<Field> {
        let fields = self.fields();
        Field::ALL
            .into_iter()
            .filter(|f| fields.get(*f).is_none())
            .collect()
    }

    /// Multiply the annual production by `factor`.
    ///
    /// Used to extrapolate a per-kWp figure to a larger installation. The
    /// factor must be positive and finite; anything else leaves the record
    /// unchanged.
    pub fn scale_production(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            warn!("Ignoring invalid production scale factor {}", factor);
            return;
        }
        if let Some(production) = self.annual_production_kwh {
            self.annual_production_kwh = Some(production * factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(lat: Option<f64>, lon: Option<f64>, prod: Option<f64>, irr: Option<f64>) -> ExtractedFields {
        ExtractedFields {
            latitude: lat,
            longitude: lon,
            annual_production_kwh: prod,
            irradiation_kwh_per_m2: irr,
        }
    }

    #[test]
    fn test_status_from_count() {
        assert_eq!(Status::from_count(0), Status::Failed);
        assert_eq!(Status::from_count(1), Status::Partial);
        assert_eq!(Status::from_count(3), Status::Partial);
        assert_eq!(Status::from_count(4), Status::Completed);
    }

    #[test]
    fn test_status_tracks_fields() {
        let now = Utc::now();
        let full = SolarRecord::from_fields(now, fields(Some(1.0), Some(2.0), Some(3.0), Some(4.0)));
        assert_eq!(full.status(), Status::Completed);

        let partial = SolarRecord::from_fields(now, fields(None, None, Some(1696.92), None));
        assert_eq!(partial.status(), Status::Partial);
        assert_eq!(
            partial.missing_fields(),
            vec![Field::Latitude, Field::Longitude, Field::Irradiation]
        );

        assert_eq!(SolarRecord::new(now).status(), Status::Failed);
    }

    #[test]
    fn test_enrichment_does_not_change_status() {
        let mut record = SolarRecord::from_fields(Utc::now(), fields(Some(1.0), None, None, None));
        record.country = Some("Senegal".to_string());
        record.electricity_cost_usd_per_kwh = Some(0.2);
        assert_eq!(record.status(), Status::Partial);
    }

    #[test]
    fn test_fill_from_keeps_existing() {
        let mut primary = fields(Some(10.0), None, None, Some(1500.0));
        let fallback = fields(Some(20.0), Some(30.0), Some(4000.0), None);
        primary.fill_from(&fallback);
        assert_eq!(primary, fields(Some(10.0), None, Some(4000.0), Some(1500.0)));
    }

    #[test]
    fn test_fill_from_takes_whole_pair() {
        let mut primary = fields(None, None, Some(4000.0), None);
        let fallback = fields(Some(20.0), Some(30.0), Some(1.0), Some(1500.0));
        primary.fill_from(&fallback);
        assert_eq!(primary, fields(Some(20.0), Some(30.0), Some(4000.0), Some(1500.0)));
    }

    #[test]
    fn test_scale_production() {
        let mut record = SolarRecord::from_fields(Utc::now(), fields(None, None, Some(1000.0), None));
        record.scale_production(5.0);
        assert_eq!(record.annual_production_kwh(), Some(5000.0));

        record.scale_production(-1.0);
        record.scale_production(f64::NAN);
        assert_eq!(record.annual_production_kwh(), Some(5000.0));
    }

    #[test]
    fn test_json_shape() {
        let record = SolarRecord::from_fields(Utc::now(), fields(Some(48.8584), Some(2.2945), None, None));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["latitude"], 48.8584);
        assert_eq!(json["status"], "partial");
        assert!(json["annual_production_kwh"].is_null());
    }
}
