//! Local file-based run store
//!
//! Each run is one pretty-printed JSON file, `<runs_dir>/<id>.json`. Files are
//! written to a temporary sibling and renamed into place, so a crash never
//! leaves a half-written run behind. The index is rebuilt from disk on open.

use crate::backend::{RunIndex, RunStore};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::record::{BenchmarkScope, BenchmarkSummary, RunRecord};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Run store backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct LocalRunStore {
    config: LedgerConfig,
    index: Arc<Mutex<RunIndex>>,
}

impl LocalRunStore {
    /// Open the store, creating its directories and loading existing runs
    pub fn open(config: LedgerConfig) -> Result<Self> {
        config.validate().map_err(LedgerError::config)?;

        let runs_dir = config.runs_dir();
        fs::create_dir_all(&runs_dir)?;

        let mut index = RunIndex::default();
        let mut skipped = 0;
        for path in run_files(&runs_dir)? {
            match read_run(&path) {
                Ok(record) if record.validate().is_ok() && index.check_unique(&record).is_ok() => {
                    index.insert(record)
                }
                Ok(_) => {
                    skipped += 1;
                    tracing::warn!("Skipping invalid or duplicate run file {:?}", path);
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping unreadable run file {:?}: {}", path, e);
                }
            }
        }

        tracing::info!(
            "Run ledger opened at {:?} with {} runs ({} skipped)",
            config.data_dir,
            index.len(),
            skipped
        );

        Ok(Self { config, index: Arc::new(Mutex::new(index)) })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn run_path(&self, id: Uuid) -> PathBuf {
        self.config.runs_dir().join(format!("{}.json", id))
    }

    pub async fn len(&self) -> usize {
        self.index.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl RunStore for LocalRunStore {
    async fn save_run(&self, record: RunRecord) -> Result<()> {
        record.validate()?;

        // Held across the write so two saves cannot both pass the uniqueness check
        let mut index = self.index.lock().await;
        index.check_unique(&record)?;

        let path = self.run_path(record.id);
        let pending = record.clone();
        tokio::task::spawn_blocking(move || write_run(&path, &pending))
            .await
            .map_err(|e| LedgerError::Internal(format!("Run write task failed: {e}")))??;

        tracing::debug!("Saved run {} ({})", record.id, record.share_code);
        index.insert(record);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RunRecord>> {
        Ok(self.index.lock().await.find_by_id(id))
    }

    async fn find_by_share_code(&self, code: &str) -> Result<Option<RunRecord>> {
        Ok(self.index.lock().await.find_by_share_code(code))
    }

    async fn benchmark(&self, scope: &BenchmarkScope) -> Result<BenchmarkSummary> {
        Ok(self.index.lock().await.benchmark(scope))
    }

    async fn top_runs(&self, scope: &BenchmarkScope, limit: usize) -> Result<Vec<RunRecord>> {
        Ok(self.index.lock().await.top_runs(scope, limit))
    }
}

/// Run files in creation-independent, stable order
fn run_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_run(path: &Path) -> Result<RunRecord> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_run(path: &Path, record: &RunRecord) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    {
        let file = File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Open a local run store with default configuration
pub fn create_local_store(data_dir: impl Into<PathBuf>) -> Result<LocalRunStore> {
    LocalRunStore::open(LedgerConfig::new(data_dir))
}

/// Open a local run store with custom configuration
pub fn create_local_store_with_config(config: LedgerConfig) -> Result<LocalRunStore> {
    LocalRunStore::open(config)
}
