//! Core library for solar transcript processing.
//!
//! This crate provides:
//! - Two-tier extraction of coordinates, annual production and irradiation
//!   from free-form agent transcripts
//! - Country resolution by reverse geocoding and electricity cost lookup
//! - Report assembly with savings and emissions estimates
//! - Transcript sources (files, external agent commands) and a report store

pub mod enrich;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod source;

pub use enrich::{CostTable, NominatimGeocoder, ReverseGeocoder};
pub use error::{HelioError, Result};
pub use extract::{ExtractionResult, ExtractionTier, SolarExtractor};
pub use models::{Economics, Field, HelioConfig, SolarRecord, SolarReport, Status};
pub use pipeline::SolarPipeline;
pub use report::{ReportAssembler, ReportStore};
pub use source::{CommandSource, FileSource, TranscriptSource};
