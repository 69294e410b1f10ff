//! Batch processing command for multiple transcript files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use helio_core::report::render::{csv_row, CSV_HEADER};
use helio_core::{FileSource, ReportAssembler, ReportStore, SolarReport, Status, TranscriptSource};

use super::process::{format_report, OutputFormat};
use super::{build_pipeline, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching transcript files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-transcript results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Save every report to the report directory
    #[arg(long)]
    save: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip reverse geocoding and cost lookup
    #[arg(long)]
    no_geocode: bool,

    /// Electricity cost table (CSV)
    #[arg(long)]
    costs: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<SolarReport>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} transcripts to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} transcripts")?
            .progress_chars("=>-"),
    );

    let pipeline = build_pipeline(&config, args.no_geocode, args.costs.as_deref());
    let assembler = ReportAssembler::from_config(&config.report);
    let store = args.save.then(|| ReportStore::new(&config.report.output_dir));

    // One query at a time
    let mut results = Vec::with_capacity(files.len());
    let mut unsaved = Vec::new();
    for path in files {
        let query = path.display().to_string();

        match FileSource.fetch(&query).await {
            Ok(transcript) => {
                let result = pipeline.process_transcript(&transcript).await;
                let report = assembler.assemble(&query, &transcript, result);

                if let Some(store) = &store {
                    if let Err(e) = store.save(&report) {
                        warn!("Could not save report for {}: {}", path.display(), e);
                        unsaved.push((path.clone(), e.to_string()));
                    }
                }

                results.push(ProcessResult {
                    path,
                    report: Some(report),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(report) = &result.report else {
                continue;
            };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("transcript");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_report(report, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let count = |status: Status| {
        results
            .iter()
            .filter(|r| r.report.as_ref().is_some_and(|rep| rep.record.status() == status))
            .count()
    };
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} transcripts in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} completed, {} partial, {} no data, {} unreadable",
        style(count(Status::Completed)).green(),
        style(count(Status::Partial)).yellow(),
        style(count(Status::Failed)).red(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Unreadable files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if !unsaved.is_empty() {
        println!();
        println!("{}", style("Reports not saved:").red());
        for (path, error) in &unsaved {
            println!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "error"];
    header.extend(CSV_HEADER);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let mut row = vec![filename, result.error.clone().unwrap_or_default()];
        match &result.report {
            Some(report) => row.extend(csv_row(report)),
            None => row.extend(CSV_HEADER.iter().map(|_| String::new())),
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
