//! Run command - drive the browsing agent for one or more addresses.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use helio_core::{CommandSource, ReportAssembler, ReportStore};

use super::process::{format_report, OutputFormat};
use super::{build_pipeline, load_config};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Addresses to analyse
    #[arg(required = true)]
    addresses: Vec<String>,

    /// Agent command line (overrides the configured command)
    #[arg(short, long)]
    agent: Option<String>,

    /// Seconds to wait between agent runs
    #[arg(short, long)]
    delay: Option<u64>,

    /// Agent timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format printed for each address
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Do not save reports
    #[arg(long)]
    no_save: bool,

    /// Skip reverse geocoding and cost lookup
    #[arg(long)]
    no_geocode: bool,

    /// Electricity cost table (CSV)
    #[arg(long)]
    costs: Option<PathBuf>,
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(agent) = &args.agent {
        config.agent.command = agent.split_whitespace().map(str::to_string).collect();
    }
    if let Some(timeout) = args.timeout {
        config.agent.timeout_secs = timeout;
    }
    let delay = Duration::from_secs(args.delay.unwrap_or(config.agent.delay_secs));

    let source = CommandSource::from_config(&config.agent)?;
    let pipeline = build_pipeline(&config, args.no_geocode, args.costs.as_deref());
    let assembler = ReportAssembler::from_config(&config.report);
    let store = ReportStore::new(&config.report.output_dir);

    let mut failures = Vec::new();
    let total = args.addresses.len();

    for (i, address) in args.addresses.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            println!("{} Waiting {:?} before the next run", style("ℹ").blue(), delay);
            tokio::time::sleep(delay).await;
        }

        println!(
            "{} [{}/{}] Analysing {}",
            style("☀").yellow(),
            i + 1,
            total,
            address
        );

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Waiting for agent...");

        let outcome = pipeline.run(&source, address).await;
        pb.finish_and_clear();

        let (transcript, result) = match outcome {
            Ok(done) => done,
            Err(e) => {
                warn!("Agent run failed for {}: {}", address, e);
                eprintln!("{} {}: {}", style("✗").red(), address, e);
                failures.push(address.clone());
                continue;
            }
        };

        let report = assembler.assemble(address, &transcript, result);

        println!("{}", format_report(&report, args.format)?.trim_end());

        if !args.no_save {
            match store.save(&report) {
                Ok(path) => println!("{} Report saved to {}", style("✓").green(), path.display()),
                Err(e) => {
                    warn!("Could not save report for {}: {}", address, e);
                    eprintln!("{} {}: {}", style("✗").red(), address, e);
                    failures.push(address.clone());
                }
            }
        }
        println!();
    }

    println!(
        "{} Finished {} runs in {:?}",
        style("✓").green(),
        total,
        start.elapsed()
    );

    if !failures.is_empty() {
        anyhow::bail!("{} of {} runs failed: {}", failures.len(), total, failures.join(", "));
    }

    Ok(())
}
