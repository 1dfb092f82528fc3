//! Run store trait and the in-memory implementation

use crate::error::{LedgerError, Result};
use crate::record::{normalize_share_code, BenchmarkScope, BenchmarkSummary, RunRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Durable store of completed runs and their aggregates
#[async_trait::async_trait]
pub trait RunStore: Send + Sync {
    /// Persist a validated run; ids and share codes must be unique
    async fn save_run(&self, record: RunRecord) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RunRecord>>;

    /// Look up a run by share code, case-insensitively
    async fn find_by_share_code(&self, code: &str) -> Result<Option<RunRecord>>;

    /// Run count, mean and best final score in a scope
    async fn benchmark(&self, scope: &BenchmarkScope) -> Result<BenchmarkSummary>;

    /// Best runs in a scope, highest final score first
    async fn top_runs(&self, scope: &BenchmarkScope, limit: usize) -> Result<Vec<RunRecord>>;

    /// Mean final score in a scope; `None` when the scope is empty
    async fn average_score(&self, scope: &BenchmarkScope) -> Result<Option<f64>> {
        Ok(self.benchmark(scope).await?.average_score)
    }
}

/// Shared index used by both stores
#[derive(Debug, Default)]
pub(crate) struct RunIndex {
    runs: Vec<RunRecord>,
    by_share_code: HashMap<String, usize>,
}

impl RunIndex {
    pub(crate) fn check_unique(&self, record: &RunRecord) -> Result<()> {
        if self.runs.iter().any(|r| r.id == record.id) {
            return Err(LedgerError::already_exists(format!("run {}", record.id)));
        }
        if self.by_share_code.contains_key(&record.share_code) {
            return Err(LedgerError::already_exists(format!("share code {}", record.share_code)));
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, record: RunRecord) {
        self.by_share_code.insert(record.share_code.clone(), self.runs.len());
        self.runs.push(record);
    }

    pub(crate) fn len(&self) -> usize {
        self.runs.len()
    }

    pub(crate) fn find_by_id(&self, id: Uuid) -> Option<RunRecord> {
        self.runs.iter().find(|r| r.id == id).cloned()
    }

    pub(crate) fn find_by_share_code(&self, code: &str) -> Option<RunRecord> {
        self.by_share_code.get(&normalize_share_code(code)).map(|i| self.runs[*i].clone())
    }

    pub(crate) fn benchmark(&self, scope: &BenchmarkScope) -> BenchmarkSummary {
        BenchmarkSummary::from_scores(
            self.runs.iter().filter(|r| r.in_scope(scope)).map(|r| r.final_score),
        )
    }

    /// Ties go to the earlier run
    pub(crate) fn top_runs(&self, scope: &BenchmarkScope, limit: usize) -> Vec<RunRecord> {
        let mut runs: Vec<&RunRecord> = self.runs.iter().filter(|r| r.in_scope(scope)).collect();
        runs.sort_by(|a, b| {
            b.final_score.total_cmp(&a.final_score).then_with(|| a.created_at.cmp(&b.created_at))
        });
        runs.into_iter().take(limit).cloned().collect()
    }
}

/// In-memory run store (for testing and single-process use)
#[derive(Debug, Clone, Default)]
pub struct InMemoryRunStore {
    index: Arc<Mutex<RunIndex>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.index.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl RunStore for InMemoryRunStore {
    async fn save_run(&self, record: RunRecord) -> Result<()> {
        record.validate()?;
        let mut index = self.index.lock().await;
        index.check_unique(&record)?;
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
