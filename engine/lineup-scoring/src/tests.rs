//! Lineup-level scoring scenarios over synthetic roster snapshots.
//!
//! Small hand-built populations keep the calibrated percentiles exact; the
//! full-league scenario goes through the same validation as a loaded snapshot.

use std::collections::BTreeMap;

use franchise_registry::{CategoryRaw, LineupPick, RosterPlayer, RosterSnapshot, Slot, FRANCHISES, ROSTER_SIZE};

use crate::{LineupScorer, Snapshot};

/// Player whose every raw category grows linearly with `level`
fn ladder_player(name: &str, level: f64, years: u32, career: u32) -> RosterPlayer {
    RosterPlayer {
        name: name.to_string(),
        years_with_team_label: format!("{} seasons", years),
        years_with_team: years,
        eligible_positions: Slot::ALL.to_vec(),
        career_years: career,
        championships: 0,
        category_raw: CategoryRaw::new(level * 2.0, level * 1.5, level * 1000.0, level * 3.0),
    }
}

/// 30 players across two franchises, levels 0..30; level i lands on the
/// (i + 0.5) / 29 percentile in every calibrated metric
fn ladder_snapshot() -> Snapshot {
    let mut franchises: BTreeMap<String, Vec<RosterPlayer>> = BTreeMap::new();
    for level in 0..30 {
        let abbr = if level < 15 { "BOS" } else { "LAL" };
        franchises
            .entry(abbr.to_string())
            .or_default()
            .push(ladder_player(&format!("Player {}", level), level as f64, 10, 10));
    }
    Snapshot::from_population(RosterSnapshot::new(franchises))
}

fn pick(slot: Slot, level: usize) -> LineupPick {
    let (abbr, name) = if level < 15 { ("BOS", "Boston") } else { ("LAL", "Los Angeles") };
    LineupPick::new(slot, format!("Player {}", level), abbr, name)
}

fn balanced_lineup() -> Vec<LineupPick> {
    vec![
        pick(Slot::PG, 28),
        pick(Slot::SG, 22),
        pick(Slot::SF, 21),
        pick(Slot::PF, 23),
        pick(Slot::C, 20),
    ]
}

#[test]
fn test_scoring_is_deterministic() {
    let snapshot = ladder_snapshot();
    let scorer = LineupScorer::default();
    let lineup = balanced_lineup();

    let first = scorer.score_lineup(&snapshot, &lineup);
    let second = scorer.score_lineup(&snapshot, &lineup);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_balanced_lineup_earns_chemistry_boost() {
    let snapshot = ladder_snapshot();
    let score = LineupScorer::default().score_lineup(&snapshot, &balanced_lineup());

    assert!(!score.used_fallback_stats);
    assert!(score.base_team_score > 0.0);
    assert!(score.chemistry.chemistry_score > 60.0, "chemistry {}", score.chemistry.chemistry_score);
    assert!(score.chemistry.multiplier > 1.0 && score.chemistry.multiplier <= 2.0);
    assert!(score.team_score > score.base_team_score);

    // PG carries the highest percentile, so the highest contribution
    let pg = &score.player_scores[0];
    assert!(score.player_scores[1..].iter().all(|p| p.contribution < pg.contribution));
}

#[test]
fn test_penalty_pick_scores_zero() {
    let snapshot = ladder_snapshot();
    let scorer = LineupScorer::default();
    let mut lineup = balanced_lineup();
    lineup[0] = LineupPick::penalty(Slot::PG, "Player 28", "LAL", "Los Angeles");

    let score = scorer.score_lineup(&snapshot, &lineup);
    let penalty = &score.player_scores[0];

    assert!(penalty.is_penalty);
    assert_eq!(penalty.contribution, 0.0);
    assert_eq!(penalty.normalized_metrics.stats, 0.0);
    assert_eq!(penalty.role_profile.playmaking, 0.0);

    let mean = score.player_scores.iter().map(|p| p.contribution).sum::<f64>() / 5.0;
    assert!((score.base_team_score - mean).abs() <= 0.05 + 1e-9);

    let unpenalized = scorer.score_lineup(&snapshot, &balanced_lineup());
    assert!(score.base_team_score < unpenalized.base_team_score);
}

#[test]
fn test_crowded_ball_dominance_penalized() {
    let mut franchises: BTreeMap<String, Vec<RosterPlayer>> = BTreeMap::new();
    franchises.insert(
        "BOS".to_string(),
        (0..26).map(|level| ladder_player(&format!("Player {}", level), level as f64, 10, 10)).collect(),
    );
    franchises.insert(
        "MIA".to_string(),
        ["Elite A", "Elite B", "Elite C", "Elite D"]
            .iter()
            .map(|name| ladder_player(name, 40.0, 10, 10))
            .collect(),
    );
    let snapshot = Snapshot::from_population(RosterSnapshot::new(franchises));

    let lineup = vec![
        LineupPick::new(Slot::PG, "Elite A", "MIA", "Miami"),
        LineupPick::new(Slot::SG, "Elite B", "MIA", "Miami"),
        LineupPick::new(Slot::SF, "Elite C", "MIA", "Miami"),
        LineupPick::new(Slot::PF, "Elite D", "MIA", "Miami"),
        LineupPick::new(Slot::C, "Player 15", "BOS", "Boston"),
    ];
    let score = LineupScorer::default().score_lineup(&snapshot, &lineup);

    for elite in &score.player_scores[..4] {
        assert!(elite.role_profile.ball_dominance > 85.0, "{:?}", elite.role_profile);
    }
    assert!(score.chemistry.usage_balance < 40.0, "usage {}", score.chemistry.usage_balance);
}

#[test]
fn test_unknown_player_falls_back_to_baseline() {
    let snapshot = ladder_snapshot();
    let lookup = snapshot.lookup_player_stats("ATL", "Nonexistent Player");

    assert!(lookup.used_fallback);
    assert!(lookup.stats.player_accolades > 0.0);
    assert!(lookup.stats.team_accolades > 0.0);
    assert!(lookup.stats.stats > 0.0);
    assert!(lookup.stats.advanced > 0.0);

    let mut lineup = balanced_lineup();
    lineup[4] = LineupPick::new(Slot::C, "Nonexistent Player", "ATL", "Atlanta");
    let score = LineupScorer::default().score_lineup(&snapshot, &lineup);

    assert!(score.used_fallback_stats);
    assert!(score.player_scores[4].used_fallback);
    assert!(score.player_scores[4].contribution > 0.0);
}

#[test]
fn test_shorter_tenure_never_scores_higher() {
    let mut franchises: BTreeMap<String, Vec<RosterPlayer>> = BTreeMap::new();
    let mut players: Vec<RosterPlayer> =
        (0..20).map(|level| ladder_player(&format!("Player {}", level), level as f64, 10, 10)).collect();
    for years in [10, 6, 3, 1] {
        players.push(ladder_player(&format!("Stint {}", years), 17.0, years, 10));
    }
    franchises.insert("NYK".to_string(), players);
    let snapshot = Snapshot::from_population(RosterSnapshot::new(franchises));
    let scorer = LineupScorer::default();

    let contributions: Vec<f64> = [10, 6, 3, 1]
        .iter()
        .map(|years| {
            let lookup = snapshot.lookup_player_stats("NYK", &format!("Stint {}", years));
            assert!(!lookup.used_fallback);
            scorer.score_player(&lookup.stats).contribution
        })
        .collect();

    for pair in contributions.windows(2) {
        assert!(pair[1] < pair[0], "{:?}", contributions);
    }
}

#[test]
fn test_partial_lineup_preview() {
    let snapshot = ladder_snapshot();
    let score = LineupScorer::default().score_lineup(&snapshot, &balanced_lineup()[..1]);

    assert_eq!(score.player_scores.len(), 1);
    assert_eq!(score.chemistry.complementarity, 0.0);
    assert!(score.team_score >= score.base_team_score);
}

#[test]
fn test_empty_lineup_scores_zero() {
    let snapshot = ladder_snapshot();
    let score = LineupScorer::default().score_lineup(&snapshot, &[]);

    assert_eq!(score.base_team_score, 0.0);
    assert_eq!(score.team_score, 0.0);
    assert!(score.player_scores.is_empty());
}

/// 30 franchises of 15; franchise `f`, player `i` sits at level `f * 15 + i`
fn league_snapshot() -> Snapshot {
    let franchises = FRANCHISES
        .iter()
        .enumerate()
        .map(|(f, franchise)| {
            let players = (0..ROSTER_SIZE)
                .map(|i| {
                    let level = (f * ROSTER_SIZE + i) as f64;
                    ladder_player(&format!("{} {}", franchise.abbreviation, i), level, 10, 12)
                })
                .collect();
            (franchise.abbreviation.to_string(), players)
        })
        .collect();
    Snapshot::from_roster(RosterSnapshot::new(franchises)).unwrap()
}

fn league_lineup(abbr: &str, name: &str) -> Vec<LineupPick> {
    Slot::ALL
        .iter()
        .enumerate()
        .map(|(i, slot)| LineupPick::new(*slot, format!("{} {}", abbr, 10 + i), abbr, name))
        .collect()
}

#[test]
fn test_full_league_scoring() {
    let snapshot = league_snapshot();
    let scorer = LineupScorer::default();

    for franchise in FRANCHISES.iter() {
        assert_eq!(snapshot.registry().roster_by_team(franchise.abbreviation).unwrap().len(), ROSTER_SIZE);
    }

    let strong = scorer.score_lineup(&snapshot, &league_lineup("WAS", "Washington"));
    let weak = scorer.score_lineup(&snapshot, &league_lineup("ATL", "Atlanta"));

    assert!(!strong.used_fallback_stats && !weak.used_fallback_stats);
    assert!(strong.base_team_score > weak.base_team_score);
    assert!(strong.team_score >= strong.base_team_score);
    assert!((1.0..=2.0).contains(&strong.chemistry.multiplier));
    assert_eq!(strong, scorer.score_lineup(&snapshot, &league_lineup("WAS", "Washington")));
}
