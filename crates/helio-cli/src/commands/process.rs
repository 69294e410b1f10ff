//! Process command - extract and enrich a single transcript.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use helio_core::report::{render_csv, render_text};
use helio_core::{FileSource, ReportAssembler, ReportStore, SolarReport, Status, TranscriptSource};

use super::{build_pipeline, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Transcript file, or "-" to read from stdin
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Query recorded in the report (default: the input path)
    #[arg(short, long)]
    query: Option<String>,

    /// Save the report to the report directory
    #[arg(long)]
    save: bool,

    /// Skip reverse geocoding and cost lookup
    #[arg(long)]
    no_geocode: bool,

    /// Electricity cost table (CSV)
    #[arg(long)]
    costs: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let transcript = if args.input == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        text
    } else {
        FileSource.fetch(&args.input).await?
    };

    info!("Processing transcript: {}", args.input);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Extracting solar data...");

    let pipeline = build_pipeline(&config, args.no_geocode, args.costs.as_deref());
    let result = pipeline.process_transcript(&transcript).await;

    pb.finish_and_clear();

    let query = args.query.as_deref().unwrap_or(&args.input);
    let report = ReportAssembler::from_config(&config.report).assemble(query, &transcript, result);

    if report.record.status() != Status::Completed {
        eprintln!(
            "{} Extraction {}: {}",
            style("⚠").yellow(),
            report.record.status(),
            report.warnings.join("; ")
        );
    }

    if args.save {
        let path = ReportStore::new(&config.report.output_dir).save(&report)?;
        eprintln!("{} Report saved to {}", style("✓").green(), path.display());
    }

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_report(report: &SolarReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => Ok(render_csv(std::slice::from_ref(report))?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}
