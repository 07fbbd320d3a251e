//! Placement strategies
//!
//! A strategy is a pure selection function: given the current segment list
//! and a request size it picks the free segment to carve from, or `None` when
//! nothing fits. Only the search step differs between strategies; the buddy
//! policy additionally constrains split/merge geometry in the arena.

use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placement strategy for satisfying allocation requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// First free segment large enough, in ascending address order
    #[default]
    FirstFit,
    /// Smallest free segment large enough; ties go to the lowest address
    BestFit,
    /// Largest free segment; ties go to the lowest address
    WorstFit,
    /// Power-of-two buddy system: first fit over the rounded request
    Buddy,
}

impl Strategy {
    /// Every strategy, in presentation order
    pub const ALL: [Strategy; 4] = [
        Strategy::FirstFit,
        Strategy::BestFit,
        Strategy::WorstFit,
        Strategy::Buddy,
    ];

    /// Short lowercase name, stable across releases (CSV file names, CLI)
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FirstFit => "first",
            Strategy::BestFit => "best",
            Strategy::WorstFit => "worst",
            Strategy::Buddy => "buddy",
        }
    }

    /// Pick the free segment that should satisfy a request of `request`
    /// units, returning its index
    ///
    /// For [`Strategy::Buddy`] the caller passes the already-rounded request;
    /// the scan itself is plain first-fit. A single left-to-right pass with
    /// strict comparisons keeps the earliest segment among equal candidates
    /// for best- and worst-fit.
    pub fn select(&self, segments: &[Segment], request: u64) -> Option<usize> {
        let mut candidates = segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_free() && s.size >= request);

        match self {
            Strategy::FirstFit | Strategy::Buddy => candidates.next().map(|(i, _)| i),
            Strategy::BestFit => {
                let mut best: Option<(usize, u64)> = None;
                for (i, seg) in candidates {
                    if best.map_or(true, |(_, size)| seg.size < size) {
                        best = Some((i, seg.size));
                    }
                }
                best.map(|(i, _)| i)
            }
            Strategy::WorstFit => {
                let mut worst: Option<(usize, u64)> = None;
                for (i, seg) in candidates {
                    if worst.map_or(true, |(_, size)| seg.size > size) {
                        worst = Some((i, seg.size));
                    }
                }
                worst.map(|(i, _)| i)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" | "firstfit" | "first-fit" => Ok(Strategy::FirstFit),
            "best" | "bestfit" | "best-fit" => Ok(Strategy::BestFit),
            "worst" | "worstfit" | "worst-fit" => Ok(Strategy::WorstFit),
            "buddy" => Ok(Strategy::Buddy),
            _ => Err(format!(
                "Invalid strategy '{}'. Valid options: first, best, worst, buddy",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Segment> {
        // used(100) free(200) used(50) free(120) used(30) free(500)
        vec![
            Segment {
                start: 0,
                size: 100,
                used: true,
                id: 1,
            },
            Segment::free_at(100, 200),
            Segment {
                start: 300,
                size: 50,
                used: true,
                id: 2,
            },
            Segment::free_at(350, 120),
            Segment {
                start: 470,
                size: 30,
                used: true,
                id: 3,
            },
            Segment::free_at(500, 500),
        ]
    }

    #[test]
    fn test_first_fit_takes_earliest() {
        assert_eq!(Strategy::FirstFit.select(&table(), 100), Some(1));
        assert_eq!(Strategy::FirstFit.select(&table(), 300), Some(5));
    }

    #[test]
    fn test_best_fit_takes_smallest() {
        assert_eq!(Strategy::BestFit.select(&table(), 100), Some(3));
        assert_eq!(Strategy::BestFit.select(&table(), 150), Some(1));
    }

    #[test]
    fn test_worst_fit_takes_largest() {
        assert_eq!(Strategy::WorstFit.select(&table(), 100), Some(5));
    }

    #[test]
    fn test_best_fit_tie_break_lowest_start() {
        let segments = vec![
            Segment::free_at(0, 128),
            Segment {
                start: 128,
                size: 64,
                used: true,
                id: 1,
            },
            Segment::free_at(192, 128),
        ];
        assert_eq!(Strategy::BestFit.select(&segments, 64), Some(0));
        assert_eq!(Strategy::WorstFit.select(&segments, 64), Some(0));
    }

    #[test]
    fn test_no_candidate() {
        assert_eq!(Strategy::FirstFit.select(&table(), 501), None);
        assert_eq!(Strategy::BestFit.select(&table(), 501), None);
        assert_eq!(Strategy::WorstFit.select(&table(), 501), None);
    }

    #[test]
    fn test_parse_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("First-Fit".parse::<Strategy>().unwrap(), Strategy::FirstFit);
        assert!("slab".parse::<Strategy>().is_err());
    }
}
