//! CLI Adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::snapshot_file::write_snapshot;
use crate::adapters::{RenderedReportSink, ReportFormat};
use crate::app::api::{self, TableInputs};
use crate::app::logging::init_tracing;
use crate::domain::{AllocationReport, AppError, DEFAULT_CONFIG_FILE};
use crate::ports::ReportSink;

const DEFAULT_VENUES_FILE: &str = "venues.csv";

#[derive(Parser)]
#[command(name = "fundalloc")]
#[command(version)]
#[command(
    about = "Distribute a liquidity budget across voted proposals and their deployment venues",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch proposals from the voting contract and allocate the budget
    #[clap(visible_alias = "a")]
    Allocate {
        /// Configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Venue table
        #[arg(long, default_value = DEFAULT_VENUES_FILE)]
        venues: PathBuf,
        /// Prior-round link table
        #[arg(long)]
        previous: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Allocate a stored proposal snapshot without network access
    #[clap(visible_alias = "o")]
    Offline {
        /// Snapshot written by `fetch`
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Venue table
        #[arg(long)]
        venues: Option<PathBuf>,
        /// Prior-round link table
        #[arg(long)]
        previous: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch proposals with current vote shares and write them as JSON
    #[clap(visible_alias = "f")]
    Fetch {
        /// Configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Allocate { config, venues, previous, output } => {
            let tables = TableInputs { venues: Some(venues), previous };
            api::allocate(&config, &tables).and_then(|report| emit(&report, output))
        }
        Commands::Offline { snapshot, config, venues, previous, output } => {
            let tables = TableInputs { venues, previous };
            api::allocate_offline(&config, &snapshot, &tables)
                .and_then(|report| emit(&report, output))
        }
        Commands::Fetch { config, output } => api::fetch_snapshot(&config)
            .and_then(|proposals| write_snapshot(output.as_deref(), &proposals)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn emit(report: &AllocationReport, output: OutputArgs) -> Result<(), AppError> {
    RenderedReportSink::new(output.format, output.output).emit(report)
}
