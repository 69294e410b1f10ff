//! Error types for the helio-core library.
//!
//! Extraction and enrichment never fail: missing or implausible data is
//! represented by absent fields. The errors below cover the collaborators
//! around the core: transcript sources, cost table loading, report storage
//! and the configuration file.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for the helio library.
#[derive(Error, Debug)]
pub enum HelioError {
    /// Upstream transcript source failed.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Cost table could not be read.
    #[error("cost table error: {0}")]
    CostTable(#[from] CostTableError),

    /// Report could not be stored or loaded.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the upstream transcript generator.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transcript file could not be read.
    #[error("failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Agent command could not be started.
    #[error("failed to spawn agent `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Agent command exited unsuccessfully.
    #[error("agent exited with {status}: {stderr}")]
    AgentFailed { status: String, stderr: String },

    /// Agent command did not finish in time.
    #[error("agent timed out after {0:?}")]
    Timeout(Duration),

    /// Agent output was not valid UTF-8.
    #[error("agent produced invalid UTF-8 output")]
    InvalidOutput,

    /// No agent command configured.
    #[error("no agent command configured")]
    NotConfigured,
}

/// Errors related to loading the electricity cost table.
#[derive(Error, Debug)]
pub enum CostTableError {
    /// File could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV data is malformed.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Header row has no country column.
    #[error("no country column in header")]
    MissingCountryColumn,
}

/// Errors related to report persistence.
#[derive(Error, Debug)]
pub enum ReportError {
    /// I/O error while reading or writing a report.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report JSON could not be encoded or decoded.
    #[error("invalid report JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for the helio library.
pub type Result<T> = std::result::Result<T, HelioError>;
