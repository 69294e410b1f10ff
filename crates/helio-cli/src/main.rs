//! CLI application for solar potential transcript extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, process, reports, run};

/// Helio - Extract and enrich solar potential data from agent transcripts
#[derive(Parser)]
#[command(name = "helio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single transcript
    Process(process::ProcessArgs),

    /// Process multiple transcript files
    Batch(batch::BatchArgs),

    /// Run the browsing agent for one or more addresses
    Run(run::RunArgs),

    /// Inspect saved reports
    Reports(reports::ReportsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so stdout stays machine-readable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Run(args) => run::run(args, config_path).await,
        Commands::Reports(args) => reports::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
