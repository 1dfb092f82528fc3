use crate::franchise::{find_franchise, FRANCHISES};
use crate::ROSTER_SIZE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the five fixed lineup positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Slot {
    /// All slots in lineup order
    pub const ALL: [Slot; 5] = [Slot::PG, Slot::SG, Slot::SF, Slot::PF, Slot::C];

    /// Position label as shown to players (e.g. "PG")
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::PG => "PG",
            Slot::SG => "SG",
            Slot::SF => "SF",
            Slot::PF => "PF",
            Slot::C => "C",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PG" => Ok(Slot::PG),
            "SG" => Ok(Slot::SG),
            "SF" => Ok(Slot::SF),
            "PF" => Ok(Slot::PF),
            "C" => Ok(Slot::C),
            other => Err(RegistryError::InvalidSlot(other.to_string())),
        }
    }
}

/// Raw category scalars derived by the enrichment pipeline.
///
/// Values are unbounded and may be negative when turnovers dominate; they only
/// become comparable after percentile calibration against the full population.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRaw {
    pub player_accolades: f64,
    pub team_accolades: f64,
    pub stats: f64,
    pub advanced: f64,
}

impl CategoryRaw {
    pub fn new(player_accolades: f64, team_accolades: f64, stats: f64, advanced: f64) -> Self {
        Self { player_accolades, team_accolades, stats, advanced }
    }

    /// True when every scalar is finite
    pub fn is_finite(&self) -> bool {
        self.player_accolades.is_finite()
            && self.team_accolades.is_finite()
            && self.stats.is_finite()
            && self.advanced.is_finite()
    }
}

/// A franchise-scoped all-time roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    /// Display name (e.g. "Dikembe Mutombo")
    pub name: String,

    /// Human readable tenure (e.g. "1991-1996")
    pub years_with_team_label: String,

    /// Seasons spent with this franchise
    pub years_with_team: u32,

    /// Slots the player may be drafted into
    pub eligible_positions: Vec<Slot>,

    /// Total seasons across the whole career
    pub career_years: u32,

    /// Championships won with this franchise
    pub championships: u32,

    pub category_raw: CategoryRaw,
}

impl RosterPlayer {
    /// Tenure ratio clamped to [0.08, 1]
    pub fn tenure_ratio(&self) -> f64 {
        tenure_ratio(self.years_with_team, self.career_years)
    }

    pub fn is_eligible_for(&self, slot: Slot) -> bool {
        self.eligible_positions.contains(&slot)
    }
}

/// Smallest tenure ratio a rostered player can carry
pub const TENURE_RATIO_FLOOR: f64 = 0.08;

/// Multiplier applied at a tenure ratio of zero
pub const TENURE_FLOOR: f64 = 0.52;

/// Years with a franchise divided by career length, clamped to [0.08, 1]
pub fn tenure_ratio(years_with_team: u32, career_years: u32) -> f64 {
    let career = career_years.max(1) as f64;
    (years_with_team as f64 / career).clamp(TENURE_RATIO_FLOOR, 1.0)
}

/// Linear tenure weighting: 0.52 at ratio 0, 1.0 at ratio 1
pub fn tenure_multiplier(ratio: f64) -> f64 {
    TENURE_FLOOR + ratio.clamp(0.0, 1.0) * (1.0 - TENURE_FLOOR)
}

/// Durable roster snapshot written by the pipeline and loaded at process start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    /// Rosters keyed by franchise abbreviation
    pub franchises: BTreeMap<String, Vec<RosterPlayer>>,
}

impl RosterSnapshot {
    pub const VERSION: &'static str = "1";

    pub fn new(franchises: BTreeMap<String, Vec<RosterPlayer>>) -> Self {
        Self { version: Self::VERSION.to_string(), generated_at: Utc::now(), franchises }
    }

    pub fn player_count(&self) -> usize {
        self.franchises.values().map(Vec::len).sum()
    }

    /// Check the snapshot is servable: every franchise in the table present,
    /// no unknown keys, exactly `ROSTER_SIZE` players each, every player
    /// draftable with finite category scalars.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for abbr in self.franchises.keys() {
            if find_franchise(abbr).is_none() {
                return Err(RegistryError::UnknownFranchise(abbr.clone()));
            }
        }

        for franchise in FRANCHISES.iter() {
            let roster = self
                .franchises
                .iter()
                .find(|(abbr, _)| abbr.eq_ignore_ascii_case(franchise.abbreviation))
                .map(|(_, players)| players)
                .ok_or_else(|| RegistryError::MissingFranchise(franchise.abbreviation.to_string()))?;

            if roster.len() != ROSTER_SIZE {
                return Err(RegistryError::IncompleteRoster {
                    franchise: franchise.abbreviation.to_string(),
                    players: roster.len(),
                });
            }

            for player in roster {
                let reason = if player.eligible_positions.is_empty() {
                    Some("no eligible positions")
                } else if !player.category_raw.is_finite() {
                    Some("non-finite category values")
                } else {
                    None
                };
                if let Some(reason) = reason {
                    return Err(RegistryError::InvalidEntry {
                        franchise: franchise.abbreviation.to_string(),
                        name: player.name.clone(),
                        reason: reason.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Errors raised by registry lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown franchise: {0}")]
    UnknownFranchise(String),

    #[error("Player '{name}' not found on {franchise} roster")]
    PlayerNotFound { franchise: String, name: String },

    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    #[error("Snapshot has no roster for {0}")]
    MissingFranchise(String),

    #[error("Roster for {franchise} has {players} players, expected {expected}", expected = ROSTER_SIZE)]
    IncompleteRoster { franchise: String, players: usize },

    #[error("Roster entry '{name}' on {franchise} is invalid: {reason}")]
    InvalidEntry { franchise: String, name: String, reason: String },
}
