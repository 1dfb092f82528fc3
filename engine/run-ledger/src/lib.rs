//! # Run Ledger
//!
//! Durable storage for completed lineup drafts. Every scored run gets a
//! UUID and a short share code, and can be aggregated into global or
//! per-group benchmarks.
//!
//! ## Architecture
//!
//! - **RunStore**: Abstract trait for storage backends
//! - **LocalRunStore**: One JSON file per run, index rebuilt on open
//! - **InMemoryRunStore**: Process-local store for tests and previews
//!
//! ## Usage
//!
//! ```rust,no_run
//! use run_ledger::{create_local_store, BenchmarkScope, RunStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = create_local_store("./data/ledger")?;
//!     let summary = store.benchmark(&BenchmarkScope::Global).await?;
//!     println!("{} runs, average {:?}", summary.runs, summary.average_score);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod local;
pub mod record;

pub use backend::{InMemoryRunStore, RunStore};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use local::{create_local_store, create_local_store_with_config, LocalRunStore};
pub use record::{
    normalize_group_code, normalize_share_code, share_code_for, BenchmarkScope, BenchmarkSummary,
    PickRecord, RunRecord, SHARE_CODE_LEN,
};

pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;
