//! Reports command - inspect saved reports.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use helio_core::ReportStore;

use super::load_config;
use super::process::{format_report, OutputFormat};

/// Arguments for the reports command.
#[derive(Args)]
pub struct ReportsArgs {
    /// Report directory (default: from configuration)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: ReportsCommand,
}

#[derive(Subcommand)]
enum ReportsCommand {
    /// List saved reports, newest first
    List,

    /// Show a saved report
    Show {
        /// Report file (default: the newest report)
        path: Option<PathBuf>,

        /// Show the newest report
        #[arg(long, conflicts_with = "path")]
        latest: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

pub async fn run(args: ReportsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => load_config(config_path)?.report.output_dir,
    };
    let store = ReportStore::new(dir);

    match args.command {
        ReportsCommand::List => list_reports(&store),
        ReportsCommand::Show { path, format, .. } => show_report(&store, path, format),
    }
}

fn list_reports(store: &ReportStore) -> anyhow::Result<()> {
    let reports = store.load_all()?;

    if reports.is_empty() {
        println!("No reports found in {}", store.dir().display());
        return Ok(());
    }

    println!("{}", style(format!("Reports in {}:", store.dir().display())).bold());
    println!();

    for (path, report) in &reports {
        let status = report.record.status();
        let status = match status {
            helio_core::Status::Completed => style(status.as_str()).green(),
            helio_core::Status::Partial => style(status.as_str()).yellow(),
            helio_core::Status::Failed => style(status.as_str()).red(),
        };
        let file = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        println!(
            "  {}  {:<9}  {}  ({})",
            report.generated_at.format("%Y-%m-%d %H:%M:%S"),
            status,
            report.query,
            style(file).dim()
        );
    }

    println!();
    println!("{} reports", reports.len());

    Ok(())
}

fn show_report(store: &ReportStore, path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let report = match path {
        Some(path) => ReportStore::load(&path)?,
        None => match store.latest()? {
            Some((_, report)) => report,
            None => anyhow::bail!("No reports found in {}", store.dir().display()),
        },
    };

    println!("{}", format_report(&report, format)?.trim_end());
    Ok(())
}
