//! Franchise Registry
//!
//! Static franchise table, the roster data model shared by the enrichment
//! pipeline and the scoring engine, and the immutable roster lookup used while
//! a draft is running.

pub mod franchise;
pub mod lineup;
pub mod naming;
pub mod registry;
pub mod types;

pub use franchise::{draw_franchises, find_franchise, Franchise, FRANCHISES};
pub use lineup::{validate_complete_lineup, LineupError, LineupPick};
pub use naming::{name_key, same_player};
pub use registry::RosterRegistry;
pub use types::{
    tenure_multiplier, tenure_ratio, CategoryRaw, RegistryError, RosterPlayer, RosterSnapshot, Slot,
    TENURE_FLOOR, TENURE_RATIO_FLOOR,
};

/// Number of players kept per franchise roster
pub const ROSTER_SIZE: usize = 15;

/// Number of slots in a completed lineup
pub const LINEUP_SIZE: usize = 5;
