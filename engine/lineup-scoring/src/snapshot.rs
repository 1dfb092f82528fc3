//! Immutable roster + calibration snapshot and the handle that swaps it

use crate::calibration::{CalibrationStore, Metric};
use crate::error::Result;
use crate::models::{PlayerStats, StatsLookup};
use franchise_registry::{RosterRegistry, RosterSnapshot, Slot};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Slot used for the baseline when nothing is known about a player
const DEFAULT_BASELINE_SLOT: Slot = Slot::SF;

/// Baseline percentiles for a player that cannot be resolved
pub fn baseline_stats(slot: Slot) -> PlayerStats {
    let (player_accolades, team_accolades, stats, advanced) = match slot {
        Slot::PG => (45.0, 40.0, 48.0, 44.0),
        Slot::SG => (42.0, 40.0, 50.0, 42.0),
        Slot::SF => (44.0, 42.0, 46.0, 45.0),
        Slot::PF => (40.0, 42.0, 45.0, 46.0),
        Slot::C => (42.0, 44.0, 44.0, 48.0),
    };
    PlayerStats { player_accolades, team_accolades, stats, advanced, tenure_ratio: 0.6 }
}

/// Everything the scoring path reads, built once and never mutated
#[derive(Debug, Clone)]
pub struct Snapshot {
    roster: RosterSnapshot,
    registry: RosterRegistry,
    calibration: CalibrationStore,
}

impl Snapshot {
    /// Build registry and calibration from a roster snapshot. The snapshot
    /// must hold exactly `ROSTER_SIZE` draftable players for every franchise.
    pub fn from_roster(roster: RosterSnapshot) -> Result<Self> {
        roster.validate()?;
        Ok(Self::build(roster))
    }

    /// Calibrate against an arbitrary population, skipping the league check
    #[cfg(test)]
    pub(crate) fn from_population(roster: RosterSnapshot) -> Self {
        Self::build(roster)
    }

    /// Calibration covers exactly the players the registry can resolve
    fn build(roster: RosterSnapshot) -> Self {
        let registry = RosterRegistry::from_snapshot(&roster);
        let calibration = CalibrationStore::from_players(registry.players());
        info!(
            "Snapshot built: {} players, generated at {}",
            calibration.population(),
            roster.generated_at
        );
        Self { roster, registry, calibration }
    }

    /// Load a roster snapshot file written by the pipeline
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let roster: RosterSnapshot = serde_json::from_str(&content)?;
        Self::from_roster(roster)
    }

    pub fn registry(&self) -> &RosterRegistry {
        &self.registry
    }

    pub fn calibration(&self) -> &CalibrationStore {
        &self.calibration
    }

    pub fn roster(&self) -> &RosterSnapshot {
        &self.roster
    }

    /// Percentile of a raw value within the whole population
    pub fn normalize_metric_globally(&self, metric: Metric, value: f64) -> f64 {
        self.calibration.normalize(metric, value)
    }

    /// Calibrated stats for a rostered player, or a baseline when unresolved
    pub fn lookup_player_stats(&self, abbr: &str, name: &str) -> StatsLookup {
        self.lookup_with_slot_hint(abbr, name, None)
    }

    /// As `lookup_player_stats`, using `slot_hint` for the baseline of an
    /// unresolved player
    pub fn lookup_with_slot_hint(
        &self,
        abbr: &str,
        name: &str,
        slot_hint: Option<Slot>,
    ) -> StatsLookup {
        match self.registry.find_player(abbr, name) {
            Some(player) => {
                StatsLookup { stats: self.calibration.calibrate(player), used_fallback: false }
            }
            None => {
                let slot = slot_hint.unwrap_or(DEFAULT_BASELINE_SLOT);
                debug!("No roster entry for {} ({}), using {} baseline", name, abbr, slot);
                StatsLookup { stats: baseline_stats(slot), used_fallback: true }
            }
        }
    }
}

/// Shared handle to the active snapshot.
///
/// Readers take a cheap `Arc` clone and keep scoring against it even if a
/// reload swaps in a newer snapshot meanwhile.
#[derive(Debug)]
pub struct SnapshotHandle {
    active: RwLock<Arc<Snapshot>>,
}

impl SnapshotHandle {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { active: RwLock::new(Arc::new(snapshot)) }
    }

    /// Active snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        self.active.read().clone()
    }

    /// Replace the active snapshot, returning the previous one
    pub fn swap(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(snapshot);
        std::mem::replace(&mut *self.active.write(), next)
    }

    /// Load a snapshot file and swap it in; the active snapshot is kept on error
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let snapshot = Snapshot::load(path.as_ref())?;
        self.swap(snapshot);
        info!("Reloaded snapshot from {:?}", path.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use franchise_registry::{CategoryRaw, RegistryError, RosterPlayer, FRANCHISES, ROSTER_SIZE};
    use std::collections::BTreeMap;

    fn roster_player(name: &str, stats: f64) -> RosterPlayer {
        RosterPlayer {
            name: name.to_string(),
            years_with_team_label: "1990-2000".to_string(),
            years_with_team: 10,
            eligible_positions: vec![Slot::PG],
            career_years: 12,
            championships: 0,
            category_raw: CategoryRaw::new(stats / 1000.0, 10.0, stats, 30.0),
        }
    }

    /// Every franchise at 15 players; Atlanta leads with two named guards
    fn roster() -> RosterSnapshot {
        let franchises = FRANCHISES
            .iter()
            .map(|f| {
                let players = (0..ROSTER_SIZE)
                    .map(|i| match (f.abbreviation, i) {
                        ("ATL", 0) => roster_player("Mookie Blaylock", 9000.0),
                        ("ATL", 1) => roster_player("Doc Rivers", 7000.0),
                        _ => roster_player(&format!("{} Reserve {}", f.abbreviation, i), 1000.0 + i as f64 * 100.0),
                    })
                    .collect();
                (f.abbreviation.to_string(), players)
            })
            .collect();
        RosterSnapshot::new(franchises)
    }

    #[test]
    fn test_lookup_resolves_rostered_player() {
        let snapshot = Snapshot::from_roster(roster()).unwrap();
        let lookup = snapshot.lookup_player_stats("ATL", "mookie blaylock");

        assert!(!lookup.used_fallback);
        assert!(lookup.stats.stats > 50.0);
        assert_eq!(snapshot.calibration().population(), 30 * ROSTER_SIZE);
    }

    #[test]
    fn test_lookup_unknown_player_uses_baseline() {
        let snapshot = Snapshot::from_roster(roster()).unwrap();
        let lookup = snapshot.lookup_player_stats("ATL", "Nonexistent Player");

        assert!(lookup.used_fallback);
        let stats = lookup.stats;
        for value in
            [stats.player_accolades, stats.team_accolades, stats.stats, stats.advanced, stats.tenure_ratio]
        {
            assert!(value > 0.0);
        }
    }

    #[test]
    fn test_rejects_player_without_positions() {
        let mut roster = roster();
        roster.franchises.get_mut("ATL").unwrap()[0].eligible_positions.clear();
        assert!(matches!(
            Snapshot::from_roster(roster),
            Err(ScoringError::InvalidSnapshot(RegistryError::InvalidEntry { .. }))
        ));
    }

    #[test]
    fn test_rejects_short_and_missing_rosters() {
        let mut short = roster();
        short.franchises.get_mut("BOS").unwrap().truncate(3);
        assert!(matches!(
            Snapshot::from_roster(short),
            Err(ScoringError::InvalidSnapshot(RegistryError::IncompleteRoster { players: 3, .. }))
        ));

        let mut missing = roster();
        missing.franchises.remove("ATL");
        assert!(matches!(
            Snapshot::from_roster(missing),
            Err(ScoringError::InvalidSnapshot(RegistryError::MissingFranchise(_)))
        ));

        assert!(Snapshot::from_roster(RosterSnapshot::new(BTreeMap::new())).is_err());
    }

    #[test]
    fn test_unknown_franchise_stays_out_of_calibration() {
        let mut roster = roster();
        roster.franchises.insert("XYZ".to_string(), vec![roster_player("Stray Star", 1_000_000.0)]);

        let snapshot = Snapshot::from_population(roster);

        assert_eq!(snapshot.calibration().population(), snapshot.registry().player_count());
        assert_eq!(snapshot.normalize_metric_globally(Metric::Stats, 9000.0), 100.0);
        assert!(snapshot.lookup_player_stats("XYZ", "Stray Star").used_fallback);
    }

    #[test]
    fn test_handle_swap_keeps_old_readers_valid() {
        let handle = SnapshotHandle::new(Snapshot::from_roster(roster()).unwrap());
        let before = handle.current();

        let mut next = roster();
        next.franchises.get_mut("ATL").unwrap()[2] = roster_player("Steve Smith", 8000.0);
        let previous = handle.swap(Snapshot::from_roster(next).unwrap());

        assert!(before.registry().find_player("ATL", "Steve Smith").is_none());
        assert!(previous.registry().find_player("ATL", "Steve Smith").is_none());
        assert!(handle.current().registry().find_player("ATL", "Steve Smith").is_some());
    }

    #[test]
    fn test_reload_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rosters.json");

        let mut next = roster();
        next.franchises.get_mut("ATL").unwrap()[2] = roster_player("Steve Smith", 8000.0);
        std::fs::write(&path, serde_json::to_string(&next).unwrap()).unwrap();

        let handle = SnapshotHandle::new(Snapshot::from_roster(roster()).unwrap());
        handle.reload_from_path(&path).unwrap();
        assert!(handle.current().registry().find_player("ATL", "Steve Smith").is_some());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(handle.reload_from_path(&path).is_err());

        let mut short = roster();
        short.franchises.get_mut("ATL").unwrap().truncate(14);
        std::fs::write(&path, serde_json::to_string(&short).unwrap()).unwrap();
        assert!(handle.reload_from_path(&path).is_err());

        assert!(handle.current().registry().find_player("ATL", "Steve Smith").is_some());
        assert_eq!(handle.current().registry().player_count(), 30 * ROSTER_SIZE);
    }
}
