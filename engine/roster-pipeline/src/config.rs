use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Smallest screening cut; anything lower could not fill a roster
pub const MIN_CANDIDATE_LIMIT: usize = 15;

/// Configuration for a roster rebuild
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// External stats source
    pub source: SourceConfig,

    /// Screening and enrichment limits
    pub enrichment: EnrichmentConfig,

    /// Input and output files
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the stats API
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Attempts per request, including the first
    pub max_attempts: u32,

    /// Linear backoff step; attempt `n` waits `n * backoff_ms`
    pub backoff_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Candidates kept after screening, per franchise
    pub candidate_limit: usize,

    /// Simultaneous candidate enrichments
    pub concurrency: usize,

    /// Players kept per franchise
    pub roster_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Snapshot written by a rebuild and read at startup
    pub snapshot: PathBuf,

    /// Optional seed file layered over the embedded seed
    pub fallback: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            timeout_ms: 10_000,
            max_attempts: 3,
            backoff_ms: 400,
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { candidate_limit: 40, concurrency: 5, roster_size: franchise_registry::ROSTER_SIZE }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("data/rosters.json"),
            fallback: PathBuf::from("data/fallback_rosters.json"),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl EnrichmentConfig {
    /// Screening cut, never below the minimum
    pub fn effective_candidate_limit(&self) -> usize {
        self.candidate_limit.max(MIN_CANDIDATE_LIMIT)
    }
}

impl PipelineConfig {
    /// Load from an optional file, then `PIPELINE__*` environment overrides
    /// (for example `PIPELINE__SOURCE__TIMEOUT_MS=5000`)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("PIPELINE").separator("__").try_parsing(true),
            )
            .build()
            .map_err(|e| PipelineError::config(e.to_string()))?;

        let config: Self =
            settings.try_deserialize().map_err(|e| PipelineError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source.base_url.trim().is_empty() {
            return Err(PipelineError::config("source.base_url must not be empty"));
        }
        if self.source.timeout_ms == 0 {
            return Err(PipelineError::config("source.timeout_ms must be greater than 0"));
        }
        if self.source.max_attempts == 0 {
            return Err(PipelineError::config("source.max_attempts must be at least 1"));
        }
        if self.enrichment.concurrency == 0 {
            return Err(PipelineError::config("enrichment.concurrency must be at least 1"));
        }
        if self.enrichment.roster_size == 0 {
            return Err(PipelineError::config("enrichment.roster_size must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enrichment.concurrency, 5);
        assert_eq!(config.enrichment.roster_size, 15);
        assert_eq!(config.source.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_candidate_limit_floor() {
        let enrichment = EnrichmentConfig { candidate_limit: 4, ..Default::default() };
        assert_eq!(enrichment.effective_candidate_limit(), MIN_CANDIDATE_LIMIT);
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = PipelineConfig::default();
        config.enrichment.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pipeline.toml");
        std::fs::write(
            &path,
            "[source]\nbase_url = \"https://stats.example.com\"\nmax_attempts = 5\n\n[enrichment]\nconcurrency = 2\n",
        )
        .unwrap();

        let config = PipelineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.source.base_url, "https://stats.example.com");
        assert_eq!(config.source.max_attempts, 5);
        assert_eq!(config.source.backoff_ms, 400);
        assert_eq!(config.enrichment.concurrency, 2);
        assert_eq!(config.enrichment.candidate_limit, 40);
    }
}
