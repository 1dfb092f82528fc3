use crate::config::{CategoryWeights, ScoringConfig};
use crate::models::{NormalizedMetrics, PlayerScore, PlayerStats};
use franchise_registry::tenure_multiplier;

/// Turns calibrated percentiles into a single comparable contribution
#[derive(Debug, Clone)]
pub struct ContributionScorer {
    gamma: f64,
    ceiling: f64,
    weights: CategoryWeights,
}

impl ContributionScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            gamma: config.soft_cap_gamma,
            ceiling: config.soft_cap_ceiling,
            weights: config.category_weights,
        }
    }

    /// Concave soft cap: `(p / 100)^γ × ceiling`
    ///
    /// Keeps elite players from bunching at 99-100.
    pub fn soft_cap(&self, percentile: f64) -> f64 {
        let p = if percentile.is_finite() { percentile.clamp(0.0, 100.0) } else { 0.0 };
        (p / 100.0).powf(self.gamma) * self.ceiling
    }

    /// Score a player from calibrated stats
    pub fn score(&self, stats: &PlayerStats) -> PlayerScore {
        let normalized_metrics = NormalizedMetrics {
            player_accolades: self.soft_cap(stats.player_accolades),
            team_accolades: self.soft_cap(stats.team_accolades),
            stats: self.soft_cap(stats.stats),
            advanced: self.soft_cap(stats.advanced),
        };

        let weighted = normalized_metrics.player_accolades * self.weights.player_accolades
            + normalized_metrics.team_accolades * self.weights.team_accolades
            + normalized_metrics.stats * self.weights.stats
            + normalized_metrics.advanced * self.weights.advanced;

        PlayerScore {
            normalized_metrics,
            contribution: weighted * tenure_multiplier(stats.tenure_ratio),
        }
    }

    /// Penalty picks skip calibration and score nothing
    pub fn score_penalty(&self) -> PlayerScore {
        PlayerScore::default()
    }
}

impl Default for ContributionScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}
