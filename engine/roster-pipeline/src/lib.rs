//! Roster Pipeline
//!
//! Batch job that turns noisy per-player statistics into ranked 15-player
//! franchise rosters: screen, enrich concurrently, derive category scalars,
//! adjust for tenure, rank, backfill, and write the roster snapshot consumed by
//! the scoring engine at startup.

pub mod config;
pub mod dedup;
pub mod enrichment;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod models;
pub mod pipeline;
pub mod retry;
pub mod snapshot;

pub use config::PipelineConfig;
pub use error::{FetchError, PipelineError, Result};
pub use fallback::FallbackStore;
pub use fetcher::{HttpStatsSource, StatsSource};
pub use models::*;
pub use pipeline::{rebuild_snapshot, rebuild_with_source, RosterPipeline, RunCache};
pub use snapshot::{read_snapshot, write_snapshot};
