//! Data models shared across extraction, enrichment and reporting.

pub mod config;
pub mod record;
pub mod report;

pub use config::HelioConfig;
pub use record::{ExtractedFields, Field, SolarRecord, Status};
pub use report::{Economics, ProductionRating, SolarReport};
