use crate::chemistry::{ChemistryEngine, ChemistryPick};
use crate::config::ScoringConfig;
use crate::contribution::ContributionScorer;
use crate::models::{LineupScore, PlayerScore, PlayerScoreBreakdown, PlayerStats};
use crate::snapshot::Snapshot;
use franchise_registry::LineupPick;
use tracing::debug;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scores completed (or partial, for preview) lineups against a snapshot
#[derive(Debug, Clone)]
pub struct LineupScorer {
    contribution: ContributionScorer,
    chemistry: ChemistryEngine,
}

impl LineupScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self { contribution: ContributionScorer::new(config), chemistry: ChemistryEngine::new(config) }
    }

    /// Score a single player from calibrated stats
    pub fn score_player(&self, stats: &PlayerStats) -> PlayerScore {
        self.contribution.score(stats)
    }

    /// Score a lineup. Deterministic for a fixed snapshot; never fails.
    pub fn score_lineup(&self, snapshot: &Snapshot, picks: &[LineupPick]) -> LineupScore {
        let mut player_scores = Vec::with_capacity(picks.len());
        let mut chemistry_picks = Vec::with_capacity(picks.len());
        let mut used_fallback_stats = false;

        for pick in picks {
            let (score, used_fallback) = if pick.is_penalty {
                (self.contribution.score_penalty(), false)
            } else {
                let lookup = snapshot.lookup_with_slot_hint(
                    &pick.franchise_abbr,
                    &pick.player_name,
                    Some(pick.slot),
                );
                (self.contribution.score(&lookup.stats), lookup.used_fallback)
            };
            used_fallback_stats |= used_fallback;

            let chemistry_pick = ChemistryPick {
                slot: pick.slot,
                is_penalty: pick.is_penalty,
                metrics: score.normalized_metrics,
            };
            chemistry_picks.push(chemistry_pick);

            player_scores.push(PlayerScoreBreakdown {
                slot: pick.slot,
                player_name: pick.player_name.clone(),
                franchise_abbr: pick.franchise_abbr.clone(),
                is_penalty: pick.is_penalty,
                used_fallback,
                normalized_metrics: score.normalized_metrics,
                contribution: score.contribution,
                role_profile: chemistry_pick.profile(),
            });
        }

        let base_team_score = if player_scores.is_empty() {
            0.0
        } else {
            round1(
                player_scores.iter().map(|p| p.contribution).sum::<f64>()
                    / player_scores.len() as f64,
            )
        };

        let chemistry = self.chemistry.evaluate(&chemistry_picks);
        let team_score = round1(base_team_score * chemistry.multiplier);

        debug!(
            "Scored lineup of {} picks: base {:.1}, chemistry {:.1}, final {:.1}",
            picks.len(),
            base_team_score,
            chemistry.chemistry_score,
            team_score
        );

        LineupScore { base_team_score, team_score, chemistry, player_scores, used_fallback_stats }
    }
}

impl Default for LineupScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}
