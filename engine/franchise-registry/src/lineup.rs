use crate::registry::RosterRegistry;
use crate::types::Slot;
use crate::LINEUP_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// One drafted slot assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPick {
    pub slot: Slot,
    pub player_name: String,
    pub franchise_abbr: String,
    pub franchise_name: String,
    /// Auto-filled after the shot clock expired; always scores zero
    #[serde(default)]
    pub is_penalty: bool,
}

impl LineupPick {
    pub fn new(
        slot: Slot,
        player_name: impl Into<String>,
        franchise_abbr: impl Into<String>,
        franchise_name: impl Into<String>,
    ) -> Self {
        Self {
            slot,
            player_name: player_name.into(),
            franchise_abbr: franchise_abbr.into(),
            franchise_name: franchise_name.into(),
            is_penalty: false,
        }
    }

    /// Penalty pick for a slot whose timer ran out
    pub fn penalty(
        slot: Slot,
        player_name: impl Into<String>,
        franchise_abbr: impl Into<String>,
        franchise_name: impl Into<String>,
    ) -> Self {
        Self { is_penalty: true, ..Self::new(slot, player_name, franchise_abbr, franchise_name) }
    }
}

/// Reasons a lineup is not a valid completed draft
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupError {
    #[error("Lineup has {0} picks, expected 5")]
    WrongPickCount(usize),

    #[error("Slot {0} filled more than once")]
    DuplicateSlot(Slot),

    #[error("{player} ({franchise}) is not eligible at {slot}")]
    IneligiblePlayer { player: String, franchise: String, slot: Slot },
}

/// Check that a lineup is a completed draft: five picks, one per slot, every
/// non-penalty pick eligible for its slot.
pub fn validate_complete_lineup(
    picks: &[LineupPick],
    registry: &RosterRegistry,
) -> Result<(), LineupError> {
    if picks.len() != LINEUP_SIZE {
        return Err(LineupError::WrongPickCount(picks.len()));
    }

    let mut seen = HashSet::with_capacity(LINEUP_SIZE);
    for pick in picks {
        if !seen.insert(pick.slot) {
            return Err(LineupError::DuplicateSlot(pick.slot));
        }
        if pick.is_penalty {
            continue;
        }

        let eligible = registry
            .find_player(&pick.franchise_abbr, &pick.player_name)
            .map(|player| player.is_eligible_for(pick.slot))
            .unwrap_or(false);
        if !eligible {
            return Err(LineupError::IneligiblePlayer {
                player: pick.player_name.clone(),
                franchise: pick.franchise_abbr.clone(),
                slot: pick.slot,
            });
        }
    }

    Ok(())
}
