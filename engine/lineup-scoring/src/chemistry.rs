//! Lineup chemistry: five synergy sub-scores and the bounded multiplier

use crate::config::{ChemistryWeights, ScoringConfig};
use crate::models::{ChemistryBreakdown, NormalizedMetrics, RoleProfile};
use franchise_registry::Slot;

/// Pair average ball dominance above which sharing the ball costs them
const DOMINANCE_THRESHOLD: f64 = 72.0;
/// Ideal lineup mean ball dominance
const USAGE_TARGET: f64 = 66.0;
/// Ball dominance that counts as a high-usage player
const HIGH_USAGE: f64 = 80.0;
/// Team accolade metric that counts as a strong winning-culture player
const CULTURE_STANDOUT: f64 = 75.0;

/// Fixed per-slot archetype adjustments, in RoleProfile field order:
/// playmaking, spacing, rim pressure, perimeter defense, rim protection,
/// rebounding, ball dominance.
fn slot_bonus(slot: Slot) -> [f64; 7] {
    match slot {
        Slot::PG => [25.0, 10.0, 0.0, 8.0, -30.0, -20.0, 20.0],
        Slot::SG => [5.0, 20.0, 8.0, 10.0, -25.0, -15.0, 10.0],
        Slot::SF => [-5.0, 8.0, 10.0, 12.0, -10.0, -5.0, 0.0],
        Slot::PF => [-15.0, -5.0, 12.0, -5.0, 12.0, 15.0, -5.0],
        Slot::C => [-20.0, -15.0, 15.0, -15.0, 25.0, 25.0, -18.0],
    }
}

/// Synthesize a role profile from a pick's normalized metrics and its slot
pub fn role_profile(slot: Slot, metrics: &NormalizedMetrics) -> RoleProfile {
    let a = metrics.player_accolades;
    let t = metrics.team_accolades;
    let s = metrics.stats;
    let v = metrics.advanced;
    let bonus = slot_bonus(slot);
    let role = |base: f64, idx: usize| (base + bonus[idx]).clamp(0.0, 100.0);

    RoleProfile {
        playmaking: role(0.45 * s + 0.35 * v + 0.20 * a, 0),
        spacing: role(0.50 * s + 0.30 * v + 0.20 * a, 1),
        rim_pressure: role(0.40 * s + 0.40 * v + 0.20 * a, 2),
        perimeter_defense: role(0.40 * v + 0.35 * t + 0.25 * a, 3),
        rim_protection: role(0.45 * v + 0.30 * t + 0.25 * a, 4),
        rebounding: role(0.45 * s + 0.35 * v + 0.20 * t, 5),
        ball_dominance: role(0.45 * a + 0.35 * s + 0.20 * v, 6),
    }
}

/// One scored pick as seen by the chemistry engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemistryPick {
    pub slot: Slot,
    pub is_penalty: bool,
    pub metrics: NormalizedMetrics,
}

impl ChemistryPick {
    /// Role profile for this pick; penalty picks get an all-zero profile
    pub fn profile(&self) -> RoleProfile {
        if self.is_penalty {
            RoleProfile::default()
        } else {
            role_profile(self.slot, &self.metrics)
        }
    }

    fn culture_signal(&self) -> f64 {
        if self.is_penalty {
            0.0
        } else {
            self.metrics.team_accolades
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Mean over the five core roles of the lineup's best value in each
pub fn role_coverage(profiles: &[RoleProfile]) -> f64 {
    if profiles.is_empty() {
        return 0.0;
    }
    let mut best = [0.0f64; 5];
    for profile in profiles {
        for (slot, value) in best.iter_mut().zip(profile.core_roles()) {
            *slot = slot.max(value);
        }
    }
    mean(&best).clamp(0.0, 100.0)
}

/// Pair score: distinct roles help, a ball-dominant pair hurts
pub fn pair_complementarity(a: &RoleProfile, b: &RoleProfile) -> f64 {
    let distance = a
        .pairing_roles()
        .iter()
        .zip(b.pairing_roles())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / 6.0;

    let average_dominance = (a.ball_dominance + b.ball_dominance) / 2.0;
    let dominance_penalty = if average_dominance > DOMINANCE_THRESHOLD {
        (average_dominance - DOMINANCE_THRESHOLD) * 0.9
    } else {
        0.0
    };

    (52.0 + distance * 0.55 - dominance_penalty).clamp(0.0, 100.0)
}

/// Mean pair score over every pair in the lineup
pub fn complementarity(profiles: &[RoleProfile]) -> f64 {
    let mut pair_scores = Vec::with_capacity(10);
    for (i, a) in profiles.iter().enumerate() {
        for b in &profiles[i + 1..] {
            pair_scores.push(pair_complementarity(a, b));
        }
    }
    mean(&pair_scores)
}

/// Rewards one clear primary ball handler
pub fn usage_balance(ball_dominance: &[f64]) -> f64 {
    if ball_dominance.is_empty() {
        return 0.0;
    }
    let high_usage = ball_dominance.iter().filter(|v| **v > HIGH_USAGE).count() as f64;
    (100.0
        - (mean(ball_dominance) - USAGE_TARGET).abs() * 1.2
        - std_dev(ball_dominance) * 1.35
        - high_usage * 3.5)
        .clamp(0.0, 100.0)
}

/// Offense vs defense balance across the lineup
pub fn two_way_balance(profiles: &[RoleProfile]) -> f64 {
    if profiles.is_empty() {
        return 0.0;
    }
    let offense = mean(&profiles.iter().map(RoleProfile::offense).collect::<Vec<_>>());
    let defense = mean(&profiles.iter().map(RoleProfile::defense).collect::<Vec<_>>());
    (100.0 - (offense - defense).abs() * 1.25).clamp(0.0, 100.0)
}

/// Uniformly strong winning context, bonus per standout
pub fn culture(team_accolades: &[f64]) -> f64 {
    if team_accolades.is_empty() {
        return 0.0;
    }
    let standouts = team_accolades.iter().filter(|v| **v > CULTURE_STANDOUT).count() as f64;
    (mean(team_accolades) - 0.5 * std_dev(team_accolades) + 2.5 * standouts).clamp(0.0, 100.0)
}

/// Combines sub-scores into a bounded multiplier
#[derive(Debug, Clone)]
pub struct ChemistryEngine {
    weights: ChemistryWeights,
}

impl ChemistryEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self { weights: config.chemistry_weights }
    }

    /// Evaluate lineup chemistry; an empty lineup yields zeros and multiplier 1.0
    pub fn evaluate(&self, picks: &[ChemistryPick]) -> ChemistryBreakdown {
        if picks.is_empty() {
            return ChemistryBreakdown::default();
        }
        let profiles: Vec<RoleProfile> = picks.iter().map(ChemistryPick::profile).collect();
        let culture_signals: Vec<f64> = picks.iter().map(ChemistryPick::culture_signal).collect();
        self.evaluate_profiles(&profiles, &culture_signals)
    }

    /// Evaluate from already-synthesized profiles and team accolade metrics
    pub fn evaluate_profiles(
        &self,
        profiles: &[RoleProfile],
        team_accolades: &[f64],
    ) -> ChemistryBreakdown {
        if profiles.is_empty() {
            return ChemistryBreakdown::default();
        }
        let ball_dominance: Vec<f64> = profiles.iter().map(|p| p.ball_dominance).collect();

        let role_coverage = role_coverage(profiles);
        let complementarity = complementarity(profiles);
        let usage_balance = usage_balance(&ball_dominance);
        let two_way_balance = two_way_balance(profiles);
        let culture = culture(team_accolades);

        let w = &self.weights;
        let chemistry_score = (role_coverage * w.role_coverage
            + complementarity * w.complementarity
            + usage_balance * w.usage_balance
            + two_way_balance * w.two_way_balance
            + culture * w.culture)
            .clamp(0.0, 100.0);

        ChemistryBreakdown {
            role_coverage,
            complementarity,
            usage_balance,
            two_way_balance,
            culture,
            chemistry_score,
            multiplier: chemistry_multiplier(chemistry_score),
        }
    }
}

impl Default for ChemistryEngine {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

/// `1 + score / 100`, clamped to [1, 2]
pub fn chemistry_multiplier(chemistry_score: f64) -> f64 {
    if !chemistry_score.is_finite() {
        return 1.0;
    }
    (1.0 + chemistry_score / 100.0).clamp(1.0, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uniform(v: f64) -> NormalizedMetrics {
        NormalizedMetrics { player_accolades: v, team_accolades: v, stats: v, advanced: v }
    }

    fn pick(slot: Slot, v: f64) -> ChemistryPick {
        ChemistryPick { slot, is_penalty: false, metrics: uniform(v) }
    }

    #[test]
    fn test_role_profile_archetypes() {
        let guard = role_profile(Slot::PG, &uniform(60.0));
        let center = role_profile(Slot::C, &uniform(60.0));

        assert!(guard.playmaking > center.playmaking);
        assert!(guard.ball_dominance > center.ball_dominance);
        assert!(center.rim_protection > guard.rim_protection);
        assert!(center.rebounding > guard.rebounding);
    }

    #[test]
    fn test_role_profile_clamped() {
        let elite = role_profile(Slot::PG, &uniform(95.0));
        assert_eq!(elite.playmaking, 100.0);
        assert_eq!(elite.ball_dominance, 100.0);

        let empty = role_profile(Slot::PG, &uniform(0.0));
        assert_eq!(empty.rim_protection, 0.0);
    }

    #[test]
    fn test_penalty_pick_has_zero_profile() {
        let penalty = ChemistryPick { slot: Slot::SF, is_penalty: true, metrics: uniform(90.0) };
        assert_eq!(penalty.profile(), RoleProfile::default());
        assert_eq!(penalty.culture_signal(), 0.0);
    }

    #[test]
    fn test_empty_lineup_short_circuits() {
        let breakdown = ChemistryEngine::default().evaluate(&[]);
        assert_eq!(breakdown.chemistry_score, 0.0);
        assert_eq!(breakdown.multiplier, 1.0);
        assert_eq!(breakdown.role_coverage, 0.0);
    }

    #[test]
    fn test_role_coverage_uses_best_specialist() {
        let mut a = RoleProfile::default();
        a.playmaking = 90.0;
        let mut b = RoleProfile::default();
        b.rebounding = 80.0;
        b.playmaking = 10.0;

        assert!((role_coverage(&[a, b]) - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_dominance_penalty_follows_pair_average() {
        let mut star = RoleProfile::default();
        star.ball_dominance = 95.0;
        let mut other_star = star;
        other_star.ball_dominance = 90.0;
        let mut big = star;
        big.ball_dominance = 40.0;

        // identical roles -> distance 0
        assert!((pair_complementarity(&star, &big) - 52.0).abs() < 1e-9);
        let expected = 52.0 - (92.5 - 72.0) * 0.9;
        assert!((pair_complementarity(&star, &other_star) - expected).abs() < 1e-9);

        // one heavy handler can drag the pair over the line on their own
        let mut creator = RoleProfile::default();
        creator.ball_dominance = 100.0;
        let mut wing = creator;
        wing.ball_dominance = 50.0;
        let expected = 52.0 - (75.0 - 72.0) * 0.9;
        assert!((pair_complementarity(&creator, &wing) - expected).abs() < 1e-9);

        wing.ball_dominance = 44.0;
        assert!((pair_complementarity(&creator, &wing) - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_usage_balance_prefers_one_primary_handler() {
        let balanced = usage_balance(&[82.0, 66.0, 62.0, 60.0, 58.0]);
        let crowded = usage_balance(&[100.0, 100.0, 95.0, 90.0, 42.0]);
        assert!(balanced > 70.0);
        assert!(crowded < 40.0);
    }

    #[test]
    fn test_two_way_balance() {
        let mut scorer = RoleProfile::default();
        scorer.playmaking = 60.0;
        scorer.spacing = 60.0;
        scorer.rim_pressure = 60.0;
        assert!((two_way_balance(&[scorer]) - 25.0).abs() < 1e-9);

        let even = role_profile(Slot::SF, &uniform(70.0));
        assert!(two_way_balance(&[even]) > 90.0);
    }

    #[test]
    fn test_culture() {
        let uniform_strong = culture(&[80.0, 80.0, 80.0, 80.0, 80.0]);
        assert!((uniform_strong - (80.0 + 12.5)).abs() < 1e-9);

        let uneven = culture(&[95.0, 95.0, 20.0, 20.0, 20.0]);
        assert!(uneven < uniform_strong);
    }

    #[test]
    fn test_balanced_lineup_chemistry() {
        let picks = [
            pick(Slot::PG, 84.0),
            pick(Slot::SG, 63.0),
            pick(Slot::SF, 63.0),
            pick(Slot::PF, 63.0),
            pick(Slot::C, 63.0),
        ];
        let breakdown = ChemistryEngine::default().evaluate(&picks);

        assert!(breakdown.chemistry_score > 60.0);
        assert!(breakdown.multiplier > 1.0);
        assert!((breakdown.multiplier - (1.0 + breakdown.chemistry_score / 100.0)).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_multiplier_bounds(
            values in prop::collection::vec(0.0f64..100.0, 0..35),
            culture_values in prop::collection::vec(0.0f64..100.0, 0..5),
        ) {
            let profiles: Vec<RoleProfile> = values
                .chunks_exact(7)
                .map(|c| RoleProfile {
                    playmaking: c[0],
                    spacing: c[1],
                    rim_pressure: c[2],
                    perimeter_defense: c[3],
                    rim_protection: c[4],
                    rebounding: c[5],
                    ball_dominance: c[6],
                })
                .collect();
            let breakdown = ChemistryEngine::default().evaluate_profiles(&profiles, &culture_values);

            prop_assert!(breakdown.multiplier >= 1.0 && breakdown.multiplier <= 2.0);
            for sub in [
                breakdown.role_coverage,
                breakdown.complementarity,
                breakdown.usage_balance,
                breakdown.two_way_balance,
                breakdown.culture,
                breakdown.chemistry_score,
            ] {
                prop_assert!((0.0..=100.0).contains(&sub));
            }
        }

        #[test]
        fn prop_multiplier_clamped(score in -500.0f64..500.0) {
            let m = chemistry_multiplier(score);
            prop_assert!((1.0..=2.0).contains(&m));
        }
    }
}
