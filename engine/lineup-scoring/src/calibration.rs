//! Percentile calibration against the full cross-franchise player population

use crate::models::PlayerStats;
use franchise_registry::RosterPlayer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentile returned when a distribution carries no information
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

/// Calibrated metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    PlayerAccolades,
    TeamAccolades,
    Stats,
    Advanced,
    /// Franchise stats per career season
    StatsPerYear,
    /// Franchise stats over the square root of career seasons; rewards
    /// concentrated excellence over accumulation
    StatsPeak,
    /// Blend of advanced, team and personal accolades plus titles
    WinningImpact,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::PlayerAccolades,
        Metric::TeamAccolades,
        Metric::Stats,
        Metric::Advanced,
        Metric::StatsPerYear,
        Metric::StatsPeak,
        Metric::WinningImpact,
    ];

    fn index(self) -> usize {
        match self {
            Metric::PlayerAccolades => 0,
            Metric::TeamAccolades => 1,
            Metric::Stats => 2,
            Metric::Advanced => 3,
            Metric::StatsPerYear => 4,
            Metric::StatsPeak => 5,
            Metric::WinningImpact => 6,
        }
    }

    /// Raw value of this metric for a roster entry
    pub fn raw_value(self, player: &RosterPlayer) -> f64 {
        let raw = &player.category_raw;
        // Career length, not franchise tenure: a shorter stint must never
        // raise a per-year figure.
        let years = player.career_years.max(1) as f64;
        match self {
            Metric::PlayerAccolades => raw.player_accolades,
            Metric::TeamAccolades => raw.team_accolades,
            Metric::Stats => raw.stats,
            Metric::Advanced => raw.advanced,
            Metric::StatsPerYear => raw.stats / years,
            Metric::StatsPeak => raw.stats / years.sqrt(),
            Metric::WinningImpact => {
                0.45 * raw.advanced
                    + 0.35 * raw.team_accolades
                    + 0.20 * raw.player_accolades
                    + 6.0 * player.championships as f64
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::PlayerAccolades => "playerAccolades",
            Metric::TeamAccolades => "teamAccolades",
            Metric::Stats => "stats",
            Metric::Advanced => "advanced",
            Metric::StatsPerYear => "statsPerYear",
            Metric::StatsPeak => "statsPeak",
            Metric::WinningImpact => "winningImpact",
        };
        f.write_str(name)
    }
}

/// Sorted population of one metric
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    sorted: Vec<f64>,
}

impl Distribution {
    /// Build from unsorted values; non-finite values are dropped
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        Self { sorted }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Percentile rank of `value` in [0, 100].
    ///
    /// Ties take the midpoint between the strictly-below count and the
    /// at-or-below count, divided by `n - 1`. Populations of 0 or 1 values and
    /// non-finite queries return 50.
    pub fn percentile(&self, value: f64) -> f64 {
        let n = self.sorted.len();
        if n <= 1 || !value.is_finite() {
            return NEUTRAL_PERCENTILE;
        }

        let below = self.sorted.partition_point(|v| *v < value);
        let at_or_below = self.sorted.partition_point(|v| *v <= value);
        let midpoint = (below + at_or_below) as f64 / 2.0;

        (midpoint / (n - 1) as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Per-metric populations built once from a roster snapshot
#[derive(Debug, Clone, Default)]
pub struct CalibrationStore {
    distributions: [Distribution; 7],
}

impl CalibrationStore {
    /// Build every distribution from the whole roster population
    pub fn from_players<'a>(players: impl IntoIterator<Item = &'a RosterPlayer>) -> Self {
        let players: Vec<&RosterPlayer> = players.into_iter().collect();
        let distributions = Metric::ALL
            .map(|metric| Distribution::from_values(players.iter().map(|p| metric.raw_value(p))));
        Self { distributions }
    }

    pub fn distribution(&self, metric: Metric) -> &Distribution {
        &self.distributions[metric.index()]
    }

    /// Percentile of a raw value within the population for `metric`
    pub fn normalize(&self, metric: Metric, value: f64) -> f64 {
        self.distribution(metric).percentile(value)
    }

    /// Calibrated category percentiles for a roster entry
    pub fn calibrate(&self, player: &RosterPlayer) -> PlayerStats {
        let pct = |metric: Metric| self.normalize(metric, metric.raw_value(player));

        PlayerStats {
            player_accolades: pct(Metric::PlayerAccolades),
            team_accolades: 0.55 * pct(Metric::TeamAccolades) + 0.45 * pct(Metric::WinningImpact),
            stats: 0.40 * pct(Metric::Stats)
                + 0.25 * pct(Metric::StatsPerYear)
                + 0.35 * pct(Metric::StatsPeak),
            advanced: pct(Metric::Advanced),
            tenure_ratio: player.tenure_ratio(),
        }
    }

    /// Number of players behind each distribution
    pub fn population(&self) -> usize {
        self.distributions[0].len()
    }
}
