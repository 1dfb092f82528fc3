//! Incoming payload schema and the typed records it validates into

use crate::error::FetchError;
use franchise_registry::Slot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Career totals of every player who appeared for a franchise
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseTotalsPayload {
    pub franchise: String,
    pub players: Vec<CandidateTotalsPayload>,
}

/// Totals for one player while with the franchise
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTotalsPayload {
    pub player_id: Option<String>,
    pub name: Option<String>,
    pub games: Option<f64>,
    pub points: Option<f64>,
    #[serde(default)]
    pub rebounds: Option<f64>,
    #[serde(default)]
    pub assists: Option<f64>,
    #[serde(default)]
    pub steals: Option<f64>,
    #[serde(default)]
    pub blocks: Option<f64>,
    #[serde(default)]
    pub turnovers: Option<f64>,
    /// Franchise win fraction while the player was there
    #[serde(default)]
    pub win_pct: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionsPayload {
    pub player_id: String,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonsPayload {
    pub player_id: String,
    pub seasons: Vec<SeasonEntry>,
}

/// One regular season on a team. A traded player has one entry per team.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonEntry {
    /// Year the season ended
    pub season: i32,
    pub team: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardsPayload {
    pub player_id: String,
    pub awards: Vec<AwardEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardEntry {
    pub award: String,
    #[serde(default)]
    pub season: Option<i32>,
}

// ---------------------------------------------------------------------------
// Validated records
// ---------------------------------------------------------------------------

/// Box totals accumulated with one franchise
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxTotals {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
}

impl BoxTotals {
    /// Per-game value of one total, 0 when no games were played
    pub fn per_game(total: f64, games: f64) -> f64 {
        if games > 0.0 {
            total / games
        } else {
            0.0
        }
    }
}

/// A franchise candidate that passed payload validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerCandidate {
    pub player_id: String,
    pub name: String,
    pub games: f64,
    pub totals: BoxTotals,
    pub win_pct: Option<f64>,
}

fn required(field: Option<f64>, name: &str, player: &str) -> Result<f64, FetchError> {
    match field {
        Some(value) => checked(value, name, player),
        None => Err(FetchError::malformed("franchise totals", format!("{player}: missing {name}"))),
    }
}

fn checked(value: f64, name: &str, player: &str) -> Result<f64, FetchError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FetchError::malformed(
            "franchise totals",
            format!("{player}: {name} must be a non-negative number, got {value}"),
        ));
    }
    Ok(value)
}

fn optional(field: Option<f64>, name: &str, player: &str) -> Result<f64, FetchError> {
    field.map_or(Ok(0.0), |value| checked(value, name, player))
}

impl CandidateTotalsPayload {
    /// Validate into a typed candidate; any missing identity or bad number is
    /// a malformed payload
    pub fn validate(self) -> Result<RawPlayerCandidate, FetchError> {
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(FetchError::malformed("franchise totals", "candidate without a name")),
        };
        let player_id = match self.player_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(FetchError::malformed(
                    "franchise totals",
                    format!("{name}: missing playerId"),
                ))
            }
        };

        let games = required(self.games, "games", &name)?;
        let totals = BoxTotals {
            points: required(self.points, "points", &name)?,
            rebounds: optional(self.rebounds, "rebounds", &name)?,
            assists: optional(self.assists, "assists", &name)?,
            steals: optional(self.steals, "steals", &name)?,
            blocks: optional(self.blocks, "blocks", &name)?,
            turnovers: optional(self.turnovers, "turnovers", &name)?,
        };
        let win_pct = match self.win_pct {
            Some(pct) if pct.is_finite() && (0.0..=1.0).contains(&pct) => Some(pct),
            Some(pct) => {
                return Err(FetchError::malformed(
                    "franchise totals",
                    format!("{name}: winPct {pct} outside [0, 1]"),
                ))
            }
            None => None,
        };

        Ok(RawPlayerCandidate { player_id, name, games, totals, win_pct })
    }
}

impl FranchiseTotalsPayload {
    /// Validate every candidate; one bad entry rejects the whole payload
    pub fn validate(self, expected_franchise: &str) -> Result<Vec<RawPlayerCandidate>, FetchError> {
        if !self.franchise.eq_ignore_ascii_case(expected_franchise) {
            return Err(FetchError::malformed(
                "franchise totals",
                format!("asked for {expected_franchise}, got {}", self.franchise),
            ));
        }
        self.players.into_iter().map(CandidateTotalsPayload::validate).collect()
    }
}

/// Parse a position string such as "G", "F-C", "PG/SG" or "Guard-Forward"
/// into eligible slots, in lineup order
pub fn parse_positions(position: &str) -> Vec<Slot> {
    let mut slots = BTreeSet::new();
    for token in position.split(|c: char| c == '-' || c == '/' || c == ',' || c.is_whitespace()) {
        let token = token.trim().to_ascii_uppercase();
        let matched: &[Slot] = match token.as_str() {
            "PG" | "POINT" => &[Slot::PG],
            "SG" | "SHOOTING" => &[Slot::SG],
            "SF" | "SMALL" => &[Slot::SF],
            "PF" | "POWER" => &[Slot::PF],
            "C" | "CENTER" | "CENTRE" => &[Slot::C],
            "G" | "GUARD" => &[Slot::PG, Slot::SG],
            "F" | "FORWARD" => &[Slot::SF, Slot::PF],
            _ => &[],
        };
        slots.extend(matched.iter().copied());
    }
    slots.into_iter().collect()
}

impl PositionsPayload {
    pub fn validate(self) -> Result<Vec<Slot>, FetchError> {
        Ok(self.position.as_deref().map(parse_positions).unwrap_or_default())
    }
}

/// Season history of one player
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerSeasons {
    pub seasons: Vec<SeasonEntry>,
}

impl PlayerSeasons {
    /// Distinct seasons across the whole career
    pub fn career_years(&self) -> u32 {
        self.seasons.iter().map(|s| s.season).collect::<BTreeSet<_>>().len() as u32
    }

    /// Distinct seasons with `franchise`, ascending
    pub fn franchise_seasons(&self, franchise: &str) -> Vec<i32> {
        self.seasons
            .iter()
            .filter(|s| s.team.eq_ignore_ascii_case(franchise))
            .map(|s| s.season)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl SeasonsPayload {
    pub fn validate(self) -> Result<PlayerSeasons, FetchError> {
        for entry in &self.seasons {
            if entry.team.trim().is_empty() {
                return Err(FetchError::malformed(
                    "seasons",
                    format!("{}: season {} without team", self.player_id, entry.season),
                ));
            }
        }
        Ok(PlayerSeasons { seasons: self.seasons })
    }
}

/// Award types that feed the accolade categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AwardKind {
    Mvp,
    FinalsMvp,
    DefensivePlayer,
    RookieOfTheYear,
    SixthMan,
    MostImproved,
    AllNbaFirst,
    AllNbaSecond,
    AllNbaThird,
    AllDefensiveFirst,
    AllDefensiveSecond,
    AllStar,
    ScoringLeader,
    ReboundingLeader,
    AssistsLeader,
    StealsLeader,
    BlocksLeader,
    Champion,
}

impl AwardKind {
    /// Match an award label; unrelated awards return `None`
    pub fn parse(label: &str) -> Option<Self> {
        let key: String = label
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let kind = match key.as_str() {
            "mvp" | "mostvaluableplayer" => AwardKind::Mvp,
            "finalsmvp" | "finalsmostvaluableplayer" => AwardKind::FinalsMvp,
            "dpoy" | "defensiveplayeroftheyear" => AwardKind::DefensivePlayer,
            "roy" | "rookieoftheyear" => AwardKind::RookieOfTheYear,
            "6moy" | "sixthman" | "sixthmanoftheyear" => AwardKind::SixthMan,
            "mip" | "mostimprovedplayer" => AwardKind::MostImproved,
            "allnba1st" | "allnbafirst" | "allnbafirstteam" => AwardKind::AllNbaFirst,
            "allnba2nd" | "allnbasecond" | "allnbasecondteam" => AwardKind::AllNbaSecond,
            "allnba3rd" | "allnbathird" | "allnbathirdteam" => AwardKind::AllNbaThird,
            "alldefensive1st" | "alldefensivefirst" | "alldefensivefirstteam" => {
                AwardKind::AllDefensiveFirst
            }
            "alldefensive2nd" | "alldefensivesecond" | "alldefensivesecondteam" => {
                AwardKind::AllDefensiveSecond
            }
            "allstar" => AwardKind::AllStar,
            "scoringleader" | "scoringchampion" => AwardKind::ScoringLeader,
            "reboundingleader" | "reboundsleader" => AwardKind::ReboundingLeader,
            "assistsleader" | "assistleader" => AwardKind::AssistsLeader,
            "stealsleader" | "stealleader" => AwardKind::StealsLeader,
            "blocksleader" | "blockleader" => AwardKind::BlocksLeader,
            "champion" | "nbachampion" | "championship" => AwardKind::Champion,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub kind: AwardKind,
    pub season: Option<i32>,
}

impl AwardsPayload {
    /// Keep the awards that map to a known kind
    pub fn validate(self) -> Result<Vec<Award>, FetchError> {
        Ok(self
            .awards
            .into_iter()
            .filter_map(|entry| {
                AwardKind::parse(&entry.award).map(|kind| Award { kind, season: entry.season })
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Run bookkeeping
// ---------------------------------------------------------------------------

/// How a franchise roster was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum FranchiseOutcome {
    /// Built from fresh data; `fallbacks` candidates used cached or degraded profiles
    Enriched { candidates: usize, fallbacks: usize, backfilled: usize },
    /// Fresh data unusable; the fallback roster was kept as-is
    FellBack { reason: String },
}

/// Per-franchise outcomes of one rebuild
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcomes: Vec<(String, FranchiseOutcome)>,
}

impl RunSummary {
    pub fn record(&mut self, franchise: &str, outcome: FranchiseOutcome) {
        self.outcomes.push((franchise.to_string(), outcome));
    }

    pub fn enriched_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, FranchiseOutcome::Enriched { .. }))
            .count()
    }

    pub fn fell_back_count(&self) -> usize {
        self.outcomes.len() - self.enriched_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(name: Option<&str>, games: Option<f64>) -> CandidateTotalsPayload {
        CandidateTotalsPayload {
            player_id: Some("p1".to_string()),
            name: name.map(str::to_string),
            games,
            points: Some(1000.0),
            rebounds: None,
            assists: Some(200.0),
            steals: None,
            blocks: None,
            turnovers: None,
            win_pct: None,
        }
    }

    #[test]
    fn test_validate_candidate() {
        let candidate = totals(Some("  Dominique Wilkins "), Some(82.0)).validate().unwrap();
        assert_eq!(candidate.name, "Dominique Wilkins");
        assert_eq!(candidate.totals.rebounds, 0.0);
        assert_eq!(candidate.totals.assists, 200.0);
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        assert!(totals(None, Some(82.0)).validate().unwrap_err().is_malformed());
        assert!(totals(Some("X"), None).validate().unwrap_err().is_malformed());
        assert!(totals(Some("X"), Some(f64::NAN)).validate().unwrap_err().is_malformed());
        assert!(totals(Some("X"), Some(-1.0)).validate().unwrap_err().is_malformed());
    }

    #[test]
    fn test_franchise_mismatch_is_malformed() {
        let payload = FranchiseTotalsPayload { franchise: "BOS".to_string(), players: vec![] };
        assert!(payload.validate("LAL").unwrap_err().is_malformed());
    }

    #[test]
    fn test_schema_rejects_wrong_types() {
        let body = r#"{"franchise": "ATL", "players": [{"playerId": "1", "name": "A", "games": "many", "points": 1}]}"#;
        assert!(serde_json::from_str::<FranchiseTotalsPayload>(body).is_err());
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(parse_positions("G"), vec![Slot::PG, Slot::SG]);
        assert_eq!(parse_positions("F-C"), vec![Slot::SF, Slot::PF, Slot::C]);
        assert_eq!(parse_positions("C-F"), vec![Slot::SF, Slot::PF, Slot::C]);
        assert_eq!(parse_positions("PG/SG"), vec![Slot::PG, Slot::SG]);
        assert_eq!(parse_positions("Guard-Forward"), vec![Slot::PG, Slot::SG, Slot::SF, Slot::PF]);
        assert!(parse_positions("Coach").is_empty());
    }

    #[test]
    fn test_franchise_seasons_are_distinct() {
        let seasons = PlayerSeasons {
            seasons: vec![
                SeasonEntry { season: 2004, team: "ORL".into() },
                SeasonEntry { season: 2005, team: "ORL".into() },
                SeasonEntry { season: 2005, team: "LAL".into() },
                SeasonEntry { season: 2006, team: "LAL".into() },
            ],
        };
        assert_eq!(seasons.career_years(), 3);
        assert_eq!(seasons.franchise_seasons("orl"), vec![2004, 2005]);
    }

    #[test]
    fn test_award_labels() {
        assert_eq!(AwardKind::parse("Finals MVP"), Some(AwardKind::FinalsMvp));
        assert_eq!(AwardKind::parse("All-NBA 1st"), Some(AwardKind::AllNbaFirst));
        assert_eq!(AwardKind::parse("All-Defensive Second Team"), Some(AwardKind::AllDefensiveSecond));
        assert_eq!(AwardKind::parse("NBA Champion"), Some(AwardKind::Champion));
        assert_eq!(AwardKind::parse("Citizenship Award"), None);
    }
}
