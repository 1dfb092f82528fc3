use anyhow::Context;
use clap::Parser;
use roster_pipeline::{rebuild_snapshot, FranchiseOutcome, PipelineConfig};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rebuild-snapshot")]
#[command(about = "Rebuild every franchise roster and write the roster snapshot")]
struct Args {
    /// Pipeline config file (TOML/JSON/YAML); PIPELINE__* env vars override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the snapshot output path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Seed file layered over the embedded fallback seed
    #[arg(long)]
    fallback: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    info!("🏀 Starting roster snapshot rebuild");

    let mut config =
        PipelineConfig::load(args.config.as_deref()).context("Failed to load pipeline configuration")?;
    if let Some(snapshot) = args.snapshot {
        config.paths.snapshot = snapshot;
    }
    if let Some(fallback) = args.fallback {
        config.paths.fallback = fallback;
    }
    info!("📋 Source: {}, snapshot: {:?}", config.source.base_url, config.paths.snapshot);

    let summary = rebuild_snapshot(&config).await.context("Roster rebuild failed")?;

    for (franchise, outcome) in &summary.outcomes {
        match outcome {
            FranchiseOutcome::Enriched { candidates, fallbacks, backfilled } => info!(
                "✅ {}: {} candidates, {} fallbacks, {} backfilled",
                franchise, candidates, fallbacks, backfilled
            ),
            FranchiseOutcome::FellBack { reason } => warn!("⚠️ {}: kept fallback roster ({})", franchise, reason),
        }
    }
    info!(
        "🎉 Snapshot written: {} franchises enriched, {} fell back",
        summary.enriched_count(),
        summary.fell_back_count()
    );

    Ok(())
}
