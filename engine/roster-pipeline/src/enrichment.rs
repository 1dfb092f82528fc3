//! Category derivation, tenure adjustment and ranking for one franchise batch

use crate::models::{Award, AwardKind, BoxTotals, PlayerSeasons, RawPlayerCandidate};
use franchise_registry::{name_key, tenure_multiplier, tenure_ratio, CategoryRaw, RosterPlayer, Slot};
use std::collections::HashMap;

/// Weight of each category in the franchise score
pub const FRANCHISE_WEIGHTS: [f64; 4] = [0.30, 0.25, 0.25, 0.20];

/// Batch top-N counted as a franchise leaderboard appearance
pub const LEADERBOARD_DEPTH: usize = 10;

/// Franchise win fraction assumed when the source has none
const DEFAULT_WIN_PCT: f64 = 0.5;

/// Cheap pre-enrichment impact used to cut the candidate list
pub fn screen_impact(candidate: &RawPlayerCandidate) -> f64 {
    let t = &candidate.totals;
    t.points + 1.2 * t.rebounds + 1.5 * t.assists + 2.5 * t.steals + 2.5 * t.blocks
        + 0.18 * candidate.games
        - 0.7 * t.turnovers
}

/// Sort by screen impact and keep the top `limit`; one entry per name
pub fn screen_candidates(
    mut candidates: Vec<RawPlayerCandidate>,
    limit: usize,
) -> Vec<RawPlayerCandidate> {
    candidates.sort_by(|a, b| {
        screen_impact(b)
            .total_cmp(&screen_impact(a))
            .then_with(|| name_key(&a.name).cmp(&name_key(&b.name)))
    });

    let mut seen = std::collections::HashSet::new();
    candidates.retain(|c| seen.insert(name_key(&c.name)));
    candidates.truncate(limit);
    candidates
}

pub fn award_weight(kind: AwardKind) -> f64 {
    match kind {
        AwardKind::Mvp => 20.0,
        AwardKind::FinalsMvp => 14.0,
        AwardKind::DefensivePlayer => 9.0,
        AwardKind::AllNbaFirst => 8.0,
        AwardKind::AllNbaSecond => 5.0,
        AwardKind::RookieOfTheYear => 4.0,
        AwardKind::SixthMan => 3.0,
        AwardKind::AllNbaThird => 3.0,
        AwardKind::AllDefensiveFirst => 3.0,
        AwardKind::MostImproved => 2.5,
        AwardKind::AllDefensiveSecond => 2.0,
        AwardKind::AllStar => 1.5,
        AwardKind::ScoringLeader
        | AwardKind::ReboundingLeader
        | AwardKind::AssistsLeader
        | AwardKind::StealsLeader
        | AwardKind::BlocksLeader => 1.0,
        // Titles feed team accolades, not personal ones
        AwardKind::Champion => 0.0,
    }
}

/// Fallback positions from the per-game profile
pub fn infer_positions(candidate: &RawPlayerCandidate) -> Vec<Slot> {
    let apg = BoxTotals::per_game(candidate.totals.assists, candidate.games);
    let rpg = BoxTotals::per_game(candidate.totals.rebounds, candidate.games);

    if apg >= 4.0 && apg >= 0.5 * rpg {
        vec![Slot::PG, Slot::SG]
    } else if rpg >= 7.0 {
        vec![Slot::PF, Slot::C]
    } else {
        vec![Slot::SF]
    }
}

/// Tenure and accolade facts for a candidate, however they were obtained
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub positions: Vec<Slot>,
    pub years_with_team: u32,
    pub career_years: u32,
    pub years_label: String,
    pub championships: u32,
    pub player_accolades: f64,
    /// Cached or degraded instead of freshly fetched
    pub used_fallback: bool,
}

fn years_label(seasons: &[i32]) -> String {
    match (seasons.first(), seasons.last()) {
        (Some(first), Some(last)) if first != last => format!("{}-{}", first - 1, last),
        (Some(only), _) => format!("{}-{}", only - 1, only),
        _ => "1 season".to_string(),
    }
}

impl ResolvedProfile {
    /// Build from freshly fetched data, windowing awards to the franchise tenure
    pub fn from_fetched(
        franchise: &str,
        candidate: &RawPlayerCandidate,
        positions: Vec<Slot>,
        seasons: &PlayerSeasons,
        awards: &[Award],
    ) -> Self {
        let window = seasons.franchise_seasons(franchise);
        let in_window = |award: &&Award| match (window.is_empty(), award.season) {
            (true, _) => true,
            (false, Some(season)) => window.contains(&season),
            (false, None) => false,
        };

        let windowed: Vec<&Award> = awards.iter().filter(in_window).collect();
        let championships =
            windowed.iter().filter(|a| a.kind == AwardKind::Champion).count() as u32;
        let player_accolades = windowed.iter().map(|a| award_weight(a.kind)).sum();

        let years_with_team = (window.len() as u32).max(1);
        let career_years = seasons.career_years().max(years_with_team);
        let positions =
            if positions.is_empty() { infer_positions(candidate) } else { positions };

        Self {
            positions,
            years_with_team,
            career_years,
            years_label: years_label(&window),
            championships,
            player_accolades,
            used_fallback: false,
        }
    }

    /// Build from a cached roster entry for the same player
    pub fn from_cached(entry: &RosterPlayer) -> Self {
        Self {
            positions: entry.eligible_positions.clone(),
            years_with_team: entry.years_with_team.max(1),
            career_years: entry.career_years.max(entry.years_with_team).max(1),
            years_label: entry.years_with_team_label.clone(),
            championships: entry.championships,
            player_accolades: entry.category_raw.player_accolades,
            used_fallback: true,
        }
    }

    /// Zero titles, a single season, positions from the box profile
    pub fn degraded(candidate: &RawPlayerCandidate) -> Self {
        Self {
            positions: infer_positions(candidate),
            years_with_team: 1,
            career_years: 1,
            years_label: "1 season".to_string(),
            championships: 0,
            player_accolades: 0.0,
            used_fallback: true,
        }
    }
}

/// A candidate with everything needed to rank it
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCandidate {
    pub candidate: RawPlayerCandidate,
    pub profile: ResolvedProfile,
}

/// Number of box categories in which each candidate makes the batch top 10
pub fn leaderboard_appearances(batch: &[RawPlayerCandidate]) -> HashMap<String, u32> {
    let categories: [fn(&BoxTotals) -> f64; 5] =
        [|t| t.points, |t| t.rebounds, |t| t.assists, |t| t.steals, |t| t.blocks];

    let mut appearances: HashMap<String, u32> = HashMap::new();
    for value in categories {
        let mut ranked: Vec<&RawPlayerCandidate> = batch.iter().collect();
        ranked.sort_by(|a, b| value(&b.totals).total_cmp(&value(&a.totals)));
        for candidate in ranked.into_iter().take(LEADERBOARD_DEPTH) {
            if value(&candidate.totals) > 0.0 {
                *appearances.entry(candidate.player_id.clone()).or_default() += 1;
            }
        }
    }
    appearances
}

/// Raw category scalars for one enriched candidate
pub fn derive_categories(enriched: &EnrichedCandidate, leaderboard: u32) -> CategoryRaw {
    let c = &enriched.candidate;
    let t = &c.totals;
    let p = &enriched.profile;

    let team_accolades = 12.0 * p.championships as f64
        + 4.0 * leaderboard as f64
        + 1.5 * p.years_with_team as f64
        + 25.0 * c.win_pct.unwrap_or(DEFAULT_WIN_PCT);

    let stats = (t.points + 1.2 * t.rebounds + 1.5 * t.assists + 2.3 * t.steals + 2.3 * t.blocks
        - 0.9 * t.turnovers)
        .max(0.0);

    let per_game_impact = BoxTotals::per_game(
        t.points + 1.2 * t.rebounds + 1.5 * t.assists + 2.5 * t.steals + 2.5 * t.blocks
            - 0.8 * t.turnovers,
        c.games,
    );
    let advanced = (per_game_impact * 2.0).max(0.0) + 3.0 * (1.0 + c.games).ln();

    CategoryRaw::new(p.player_accolades, team_accolades, stats, advanced)
}

/// Min-max scale to [0, 100]; a flat batch maps to 50
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|v| if range > f64::EPSILON { (v - min) / range * 100.0 } else { 50.0 })
        .collect()
}

/// A ranked roster entry with its franchise score
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub player: RosterPlayer,
    pub franchise_score: f64,
    pub used_fallback: bool,
}

/// Derive categories, normalize within the batch, apply tenure and sort
/// descending. Ties break on name for a stable order.
pub fn rank_batch(batch: Vec<EnrichedCandidate>) -> Vec<RankedPlayer> {
    let raw: Vec<RawPlayerCandidate> = batch.iter().map(|e| e.candidate.clone()).collect();
    let leaderboard = leaderboard_appearances(&raw);

    let categories: Vec<CategoryRaw> = batch
        .iter()
        .map(|e| {
            let appearances = leaderboard.get(&e.candidate.player_id).copied().unwrap_or(0);
            derive_categories(e, appearances)
        })
        .collect();

    let column = |f: fn(&CategoryRaw) -> f64| -> Vec<f64> {
        min_max_normalize(&categories.iter().map(f).collect::<Vec<_>>())
    };
    let normalized = [
        column(|c| c.player_accolades),
        column(|c| c.team_accolades),
        column(|c| c.stats),
        column(|c| c.advanced),
    ];

    let mut ranked: Vec<RankedPlayer> = batch
        .into_iter()
        .zip(categories)
        .enumerate()
        .map(|(i, (enriched, category_raw))| {
            let profile = enriched.profile;
            let weighted: f64 =
                (0..4).map(|k| FRANCHISE_WEIGHTS[k] * normalized[k][i]).sum();
            let ratio = tenure_ratio(profile.years_with_team, profile.career_years);

            RankedPlayer {
                franchise_score: weighted * tenure_multiplier(ratio),
                used_fallback: profile.used_fallback,
                player: RosterPlayer {
                    name: enriched.candidate.name,
                    years_with_team_label: profile.years_label,
                    years_with_team: profile.years_with_team,
                    eligible_positions: profile.positions,
                    career_years: profile.career_years,
                    championships: profile.championships,
                    category_raw,
                },
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.franchise_score
            .total_cmp(&a.franchise_score)
            .then_with(|| name_key(&a.player.name).cmp(&name_key(&b.player.name)))
    });
    ranked
}
