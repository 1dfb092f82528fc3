//! Completed run records and share codes

use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use franchise_registry::{Slot, LINEUP_SIZE};
use lineup_scoring::{ChemistryBreakdown, LineupScore, NormalizedMetrics};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Crockford base32 alphabet (no I, L, O, U)
const SHARE_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of a share code
pub const SHARE_CODE_LEN: usize = 8;

/// Longest accepted group code
pub const MAX_GROUP_CODE_LEN: usize = 32;

/// Share code from the first 40 bits of the run id
pub fn share_code_for(id: &Uuid) -> String {
    let bytes = id.as_bytes();
    let bits = bytes[..5].iter().fold(0u64, |acc, b| (acc << 8) | *b as u64);

    (0..SHARE_CODE_LEN)
        .rev()
        .map(|i| SHARE_ALPHABET[((bits >> (i * 5)) & 0x1f) as usize] as char)
        .collect()
}

/// Normalize a user-typed share code: uppercase, Crockford look-alikes
/// mapped (`I`/`L` to 1, `O` to 0), separators dropped
pub fn normalize_share_code(code: &str) -> String {
    code.chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .map(|c| match c.to_ascii_uppercase() {
            'I' | 'L' => '1',
            'O' => '0',
            other => other,
        })
        .collect()
}

/// Group codes compare case-insensitively
pub fn normalize_group_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// One scored pick of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickRecord {
    pub slot: Slot,
    pub player_name: String,
    pub franchise_abbr: String,
    pub is_penalty: bool,
    pub contribution: f64,
    pub normalized_metrics: NormalizedMetrics,
}

/// A completed, scored draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub base_score: f64,
    pub final_score: f64,
    pub chemistry: ChemistryBreakdown,
    pub picks: Vec<PickRecord>,
    /// Private leaderboard this run belongs to
    pub group_code: Option<String>,
    /// Seed of the franchise draw, when the run was deterministic
    pub seed: Option<u64>,
    pub share_code: String,
}

impl RunRecord {
    /// Record a scored lineup as a new run
    pub fn from_result(result: &LineupScore, group_code: Option<&str>, seed: Option<u64>) -> Self {
        let id = Uuid::new_v4();
        let picks = result
            .player_scores
            .iter()
            .map(|p| PickRecord {
                slot: p.slot,
                player_name: p.player_name.clone(),
                franchise_abbr: p.franchise_abbr.clone(),
                is_penalty: p.is_penalty,
                contribution: p.contribution,
                normalized_metrics: p.normalized_metrics,
            })
            .collect();

        Self {
            id,
            created_at: Utc::now(),
            base_score: result.base_team_score,
            final_score: result.team_score,
            chemistry: result.chemistry,
            picks,
            group_code: group_code.map(normalize_group_code).filter(|g| !g.is_empty()),
            seed,
            share_code: share_code_for(&id),
        }
    }

    /// Check the record is a complete, finite, five-pick run
    pub fn validate(&self) -> Result<()> {
        if self.picks.len() != LINEUP_SIZE {
            return Err(LedgerError::invalid_record(format!(
                "run {} has {} picks, expected {}",
                self.id,
                self.picks.len(),
                LINEUP_SIZE
            )));
        }
        if !self.base_score.is_finite() || !self.final_score.is_finite() {
            return Err(LedgerError::invalid_record(format!("run {} has non-finite scores", self.id)));
        }
        if self.share_code.len() != SHARE_CODE_LEN {
            return Err(LedgerError::invalid_record(format!(
                "run {} has malformed share code {:?}",
                self.id, self.share_code
            )));
        }
        if let Some(group) = &self.group_code {
            let valid = !group.is_empty()
                && group.len() <= MAX_GROUP_CODE_LEN
                && group.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(LedgerError::invalid_record(format!("invalid group code {:?}", group)));
            }
        }
        Ok(())
    }

    pub fn in_scope(&self, scope: &BenchmarkScope) -> bool {
        match scope {
            BenchmarkScope::Global => true,
            BenchmarkScope::Group(code) => {
                self.group_code.as_deref() == Some(normalize_group_code(code).as_str())
            }
        }
    }
}

/// Population a benchmark is computed over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkScope {
    Global,
    Group(String),
}

/// Aggregate over the runs in a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSummary {
    pub runs: usize,
    /// Mean final score; `None` when the scope has no runs
    pub average_score: Option<f64>,
    pub best_score: Option<f64>,
}

impl BenchmarkSummary {
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let scores: Vec<f64> = scores.into_iter().collect();
        if scores.is_empty() {
            return Self { runs: 0, average_score: None, best_score: None };
        }
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { runs: scores.len(), average_score: Some(average), best_score: Some(best) }
    }
}
