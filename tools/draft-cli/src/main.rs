//! All-Time Lineup Draft CLI
//!
//! Operator commands around a roster snapshot and the run ledger:
//! - score: score a lineup file, optionally recording the run
//! - draw: show the franchises a seed deals
//! - roster: list a franchise's all-time roster
//! - benchmark / show: read back recorded runs

mod commands;
mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "draft-cli")]
#[command(about = "All-time lineup draft scoring and run ledger tools")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log level filter (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: json, pretty or compact
    #[arg(long, global = true, default_value = "compact")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a lineup JSON file against a roster snapshot
    Score {
        /// JSON array of picks
        lineup: PathBuf,

        #[arg(short, long, default_value = "data/rosters.json")]
        snapshot: PathBuf,

        /// Scoring config file; SCORING__* env vars override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Save the scored run to the ledger
        #[arg(long)]
        record: bool,

        /// Private group the run is benchmarked in
        #[arg(long, requires = "record")]
        group: Option<String>,

        /// Seed the franchises were drawn with
        #[arg(long, requires = "record")]
        seed: Option<u64>,

        /// Ledger data directory (defaults to LEDGER_DATA_DIR or ./data/ledger)
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// Draw franchises deterministically from a seed
    Draw {
        seed: u64,

        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },

    /// Show a franchise's all-time roster
    Roster {
        /// Franchise abbreviation, e.g. LAL
        abbr: String,

        #[arg(short, long, default_value = "data/rosters.json")]
        snapshot: PathBuf,
    },

    /// Benchmark averages and top runs
    Benchmark {
        /// "global" or a group code
        #[arg(long)]
        scope: Option<String>,

        /// Number of top runs to list
        #[arg(long)]
        top: Option<usize>,

        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// Show a recorded run by share code
    Show {
        share_code: String,

        #[arg(long)]
        ledger: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.log_level {
        Some(level) => logging::initialize_logging_with_config(level, &cli.log_format)?,
        None => logging::initialize_logging()?,
    }

    match cli.command {
        Commands::Score { lineup, snapshot, config, record, group, seed, ledger } => {
            commands::score(commands::ScoreArgs { lineup, snapshot, config, record, group, seed, ledger }).await
        }
        Commands::Draw { seed, count } => commands::draw(seed, count),
        Commands::Roster { abbr, snapshot } => commands::roster(&abbr, &snapshot),
        Commands::Benchmark { scope, top, ledger } => commands::benchmark(scope.as_deref(), top, ledger).await,
        Commands::Show { share_code, ledger } => commands::show(&share_code, ledger).await,
    }
}
