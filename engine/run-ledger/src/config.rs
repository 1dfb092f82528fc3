//! Configuration for the run ledger

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the local run ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Base directory for ledger files
    pub data_dir: PathBuf,

    /// Runs returned by a leaderboard query when no limit is given
    pub default_top_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data/ledger"), default_top_limit: 10 }
    }
}

impl LedgerConfig {
    /// Create a configuration rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Default::default() }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("LEDGER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(limit) = std::env::var("LEDGER_TOP_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.default_top_limit = limit;
            }
        }

        config
    }

    /// Directory holding one JSON file per run
    pub fn runs_dir(&self) -> PathBuf {
        self.data_dir.join("runs")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir must not be empty".to_string());
        }
        if self.default_top_limit == 0 {
            return Err("default_top_limit must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.runs_dir(), PathBuf::from("./data/ledger/runs"));
    }

    #[test]
    fn test_invalid_config() {
        let config = LedgerConfig { default_top_limit: 0, ..LedgerConfig::new("/tmp/ledger") };
        assert!(config.validate().is_err());
    }
}
