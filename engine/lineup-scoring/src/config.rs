use crate::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for lineup scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Soft-cap exponent applied to percentiles (must be > 1)
    pub soft_cap_gamma: f64,

    /// Value a 100th-percentile metric maps to after the soft cap
    pub soft_cap_ceiling: f64,

    /// Per-category contribution weights
    pub category_weights: CategoryWeights,

    /// Chemistry sub-score weights
    pub chemistry_weights: ChemistryWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub player_accolades: f64,
    pub team_accolades: f64,
    pub stats: f64,
    pub advanced: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemistryWeights {
    pub role_coverage: f64,
    pub complementarity: f64,
    pub usage_balance: f64,
    pub two_way_balance: f64,
    pub culture: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            soft_cap_gamma: 1.15,
            soft_cap_ceiling: 95.0,
            category_weights: CategoryWeights::default(),
            chemistry_weights: ChemistryWeights::default(),
        }
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self { player_accolades: 0.30, team_accolades: 0.25, stats: 0.25, advanced: 0.20 }
    }
}

impl Default for ChemistryWeights {
    fn default() -> Self {
        Self {
            role_coverage: 0.30,
            complementarity: 0.25,
            usage_balance: 0.20,
            two_way_balance: 0.15,
            culture: 0.10,
        }
    }
}

impl CategoryWeights {
    pub fn sum(&self) -> f64 {
        self.player_accolades + self.team_accolades + self.stats + self.advanced
    }
}

impl ChemistryWeights {
    pub fn sum(&self) -> f64 {
        self.role_coverage
            + self.complementarity
            + self.usage_balance
            + self.two_way_balance
            + self.culture
    }
}

const WEIGHT_TOLERANCE: f64 = 1e-6;

impl ScoringConfig {
    /// Load configuration from an optional file, then `SCORING__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("SCORING").separator("__").try_parsing(true))
            .build()
            .map_err(|e| ScoringError::config(e.to_string()))?;

        let config: Self =
            settings.try_deserialize().map_err(|e| ScoringError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.soft_cap_gamma > 1.0) {
            return Err(ScoringError::config("soft_cap_gamma must be greater than 1"));
        }
        if !(self.soft_cap_ceiling > 0.0 && self.soft_cap_ceiling <= 100.0) {
            return Err(ScoringError::config("soft_cap_ceiling must be in (0, 100]"));
        }
        if (self.category_weights.sum() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ScoringError::config(format!(
                "category weights must sum to 1.0 (got {:.4})",
                self.category_weights.sum()
            )));
        }
        if (self.chemistry_weights.sum() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ScoringError::config(format!(
                "chemistry weights must sum to 1.0 (got {:.4})",
                self.chemistry_weights.sum()
            )));
        }
        Ok(())
    }
}
