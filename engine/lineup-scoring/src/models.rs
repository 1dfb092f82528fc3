use franchise_registry::Slot;
use serde::{Deserialize, Serialize};

/// Calibrated category percentiles for one rostered player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Percentile in [0, 100]
    pub player_accolades: f64,
    /// Percentile in [0, 100]
    pub team_accolades: f64,
    /// Percentile in [0, 100]
    pub stats: f64,
    /// Percentile in [0, 100]
    pub advanced: f64,
    /// Years with the franchise over career length, clamped to [0.08, 1]
    pub tenure_ratio: f64,
}

/// Result of a stats lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsLookup {
    pub stats: PlayerStats,
    /// True when the player could not be resolved and a slot baseline stands in
    pub used_fallback: bool,
}

/// Soft-capped metric values in [0, ceiling]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMetrics {
    pub player_accolades: f64,
    pub team_accolades: f64,
    pub stats: f64,
    pub advanced: f64,
}

/// Output of the contribution scorer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub normalized_metrics: NormalizedMetrics,
    pub contribution: f64,
}

/// Synthetic seven-dimension role profile, each value in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfile {
    pub playmaking: f64,
    pub spacing: f64,
    pub rim_pressure: f64,
    pub perimeter_defense: f64,
    pub rim_protection: f64,
    pub rebounding: f64,
    pub ball_dominance: f64,
}

impl RoleProfile {
    /// Five roles a lineup needs at least one specialist for
    pub fn core_roles(&self) -> [f64; 5] {
        [
            self.playmaking,
            self.spacing,
            self.perimeter_defense,
            self.rim_protection,
            self.rebounding,
        ]
    }

    /// Six roles compared between pairs of players
    pub fn pairing_roles(&self) -> [f64; 6] {
        [
            self.playmaking,
            self.spacing,
            self.rim_pressure,
            self.perimeter_defense,
            self.rim_protection,
            self.rebounding,
        ]
    }

    pub fn offense(&self) -> f64 {
        (self.playmaking + self.spacing + self.rim_pressure) / 3.0
    }

    pub fn defense(&self) -> f64 {
        (self.perimeter_defense + self.rim_protection + self.rebounding) / 3.0
    }
}

/// Per-pick scoring detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScoreBreakdown {
    pub slot: Slot,
    pub player_name: String,
    pub franchise_abbr: String,
    pub is_penalty: bool,
    pub used_fallback: bool,
    pub normalized_metrics: NormalizedMetrics,
    pub contribution: f64,
    pub role_profile: RoleProfile,
}

/// Lineup-level synergy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemistryBreakdown {
    pub role_coverage: f64,
    pub complementarity: f64,
    pub usage_balance: f64,
    pub two_way_balance: f64,
    pub culture: f64,
    /// Weighted sub-score total in [0, 100]
    pub chemistry_score: f64,
    /// 1 + chemistry_score / 100, clamped to [1, 2]
    pub multiplier: f64,
}

impl Default for ChemistryBreakdown {
    fn default() -> Self {
        Self {
            role_coverage: 0.0,
            complementarity: 0.0,
            usage_balance: 0.0,
            two_way_balance: 0.0,
            culture: 0.0,
            chemistry_score: 0.0,
            multiplier: 1.0,
        }
    }
}

/// Full scoring result for a lineup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupScore {
    pub base_team_score: f64,
    pub team_score: f64,
    pub chemistry: ChemistryBreakdown,
    pub player_scores: Vec<PlayerScoreBreakdown>,
    pub used_fallback_stats: bool,
}
