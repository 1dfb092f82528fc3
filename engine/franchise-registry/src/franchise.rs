use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// A basketball franchise identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    pub abbreviation: &'static str,
    pub display_name: &'static str,
}

const fn franchise(abbreviation: &'static str, display_name: &'static str) -> Franchise {
    Franchise { abbreviation, display_name }
}

/// The 30 draftable franchises
pub static FRANCHISES: [Franchise; 30] = [
    franchise("ATL", "Atlanta Hawks"),
    franchise("BOS", "Boston Celtics"),
    franchise("BKN", "Brooklyn Nets"),
    franchise("CHA", "Charlotte Hornets"),
    franchise("CHI", "Chicago Bulls"),
    franchise("CLE", "Cleveland Cavaliers"),
    franchise("DAL", "Dallas Mavericks"),
    franchise("DEN", "Denver Nuggets"),
    franchise("DET", "Detroit Pistons"),
    franchise("GSW", "Golden State Warriors"),
    franchise("HOU", "Houston Rockets"),
    franchise("IND", "Indiana Pacers"),
    franchise("LAC", "Los Angeles Clippers"),
    franchise("LAL", "Los Angeles Lakers"),
    franchise("MEM", "Memphis Grizzlies"),
    franchise("MIA", "Miami Heat"),
    franchise("MIL", "Milwaukee Bucks"),
    franchise("MIN", "Minnesota Timberwolves"),
    franchise("NOP", "New Orleans Pelicans"),
    franchise("NYK", "New York Knicks"),
    franchise("OKC", "Oklahoma City Thunder"),
    franchise("ORL", "Orlando Magic"),
    franchise("PHI", "Philadelphia 76ers"),
    franchise("PHX", "Phoenix Suns"),
    franchise("POR", "Portland Trail Blazers"),
    franchise("SAC", "Sacramento Kings"),
    franchise("SAS", "San Antonio Spurs"),
    franchise("TOR", "Toronto Raptors"),
    franchise("UTA", "Utah Jazz"),
    franchise("WAS", "Washington Wizards"),
];

/// Find a franchise by abbreviation, ignoring case
pub fn find_franchise(abbreviation: &str) -> Option<&'static Franchise> {
    let wanted = abbreviation.trim();
    FRANCHISES.iter().find(|f| f.abbreviation.eq_ignore_ascii_case(wanted))
}

/// Draw `count` distinct franchises for a draft.
///
/// The same seed always yields the same franchises in the same order, which is
/// what lets a stored run be replayed or shared as a daily challenge.
pub fn draw_franchises(seed: u64, count: usize) -> Vec<&'static Franchise> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool: Vec<&'static Franchise> = FRANCHISES.iter().collect();
    pool.shuffle(&mut rng);
    pool.truncate(count.min(FRANCHISES.len()));
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_thirty_unique_franchises() {
        let abbrs: HashSet<_> = FRANCHISES.iter().map(|f| f.abbreviation).collect();
        assert_eq!(abbrs.len(), 30);
    }

    #[test]
    fn test_find_franchise_case_insensitive() {
        assert_eq!(find_franchise("atl").unwrap().display_name, "Atlanta Hawks");
        assert!(find_franchise("XYZ").is_none());
    }

    #[test]
    fn test_draw_is_deterministic_and_distinct() {
        let first = draw_franchises(42, 5);
        let second = draw_franchises(42, 5);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);

        let distinct: HashSet<_> = first.iter().map(|f| f.abbreviation).collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_draw_caps_at_table_size() {
        assert_eq!(draw_franchises(7, 100).len(), 30);
    }
}
