//! Lineup Scoring Engine
//!
//! Converts a drafted five-player lineup into a single comparable score:
//! percentile calibration against the full roster population, a soft-capped
//! weighted contribution per pick, and a bounded chemistry multiplier built
//! from synthetic role profiles.
//!
//! All scoring is synchronous and pure over an immutable [`Snapshot`]; a
//! refresh builds a new snapshot and swaps it through [`SnapshotHandle`].

pub mod calibration;
pub mod chemistry;
pub mod config;
pub mod contribution;
pub mod error;
pub mod models;
pub mod scorer;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use calibration::{CalibrationStore, Distribution, Metric};
pub use chemistry::{ChemistryEngine, ChemistryPick};
pub use config::ScoringConfig;
pub use contribution::ContributionScorer;
pub use error::{Result, ScoringError};
pub use models::*;
pub use scorer::LineupScorer;
pub use snapshot::{Snapshot, SnapshotHandle};
