use crate::franchise::find_franchise;
use crate::naming::name_key;
use crate::types::{RegistryError, RosterPlayer, RosterSnapshot, Slot};
use std::collections::HashMap;
use tracing::{info, warn};

/// Roster Registry - franchise rosters for the duration of a draft
///
/// Built once from a roster snapshot and never mutated afterwards. A refresh
/// builds a new registry rather than editing this one.
#[derive(Debug, Clone, Default)]
pub struct RosterRegistry {
    /// Rosters keyed by uppercase franchise abbreviation
    rosters: HashMap<String, Vec<RosterPlayer>>,

    /// (abbreviation, name key) -> index into the franchise roster
    name_index: HashMap<(String, String), usize>,
}

impl RosterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a roster snapshot
    pub fn from_snapshot(snapshot: &RosterSnapshot) -> Self {
        let mut registry = Self::new();

        for (abbr, players) in &snapshot.franchises {
            if find_franchise(abbr).is_none() {
                warn!("Skipping roster for unknown franchise {}", abbr);
                continue;
            }
            registry.insert_roster(abbr, players.clone());
        }

        info!(
            "Roster registry built: {} franchises, {} players",
            registry.rosters.len(),
            registry.player_count()
        );
        registry
    }

    fn insert_roster(&mut self, abbr: &str, players: Vec<RosterPlayer>) {
        let abbr = abbr.to_ascii_uppercase();
        for (idx, player) in players.iter().enumerate() {
            self.name_index.entry((abbr.clone(), name_key(&player.name))).or_insert(idx);
        }
        self.rosters.insert(abbr, players);
    }

    /// Full roster for a franchise
    pub fn roster_by_team(&self, abbr: &str) -> Result<&[RosterPlayer], RegistryError> {
        self.rosters
            .get(&abbr.trim().to_ascii_uppercase())
            .map(Vec::as_slice)
            .ok_or_else(|| RegistryError::UnknownFranchise(abbr.to_string()))
    }

    /// Resolve a player on a franchise roster by name
    pub fn find_player(&self, abbr: &str, name: &str) -> Option<&RosterPlayer> {
        let abbr = abbr.trim().to_ascii_uppercase();
        let idx = *self.name_index.get(&(abbr.clone(), name_key(name)))?;
        self.rosters.get(&abbr).and_then(|roster| roster.get(idx))
    }

    /// Slots a rostered player may fill
    pub fn eligible_slots(&self, abbr: &str, name: &str) -> Result<&[Slot], RegistryError> {
        self.roster_by_team(abbr)?;
        self.find_player(abbr, name).map(|p| p.eligible_positions.as_slice()).ok_or_else(|| {
            RegistryError::PlayerNotFound { franchise: abbr.to_string(), name: name.to_string() }
        })
    }

    /// Franchise abbreviations present in the registry
    pub fn franchises(&self) -> impl Iterator<Item = &str> {
        self.rosters.keys().map(String::as_str)
    }

    pub fn player_count(&self) -> usize {
        self.rosters.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rosters.is_empty()
    }

    /// Every rostered player across all franchises
    pub fn players(&self) -> impl Iterator<Item = &RosterPlayer> {
        self.rosters.values().flatten()
    }
}
