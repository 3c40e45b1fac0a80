//! Quorum arithmetic and read-side vote tallying
//!
//! A quorum is a strict majority of the configured vaults:
//! `majority(n) = n / 2 + 1`. The threshold depends only on the size of the
//! vault set, so it is fixed for the lifetime of a coordinator.

use std::collections::BTreeMap;

/// Reserved value reported to clients when a read reaches no consensus.
/// Counter values are non-negative, so it can never collide with one.
pub const NO_CONSENSUS: i64 = -1;

/// Minimum number of agreeing vaults out of `n` needed for a majority.
///
/// `majority(0) == 1`: an empty vault set can never reach quorum.
pub fn majority(n: usize) -> usize {
    n / 2 + 1
}

/// Does `count` agreeing vaults out of `n` form a majority?
pub fn has_majority(count: usize, n: usize) -> bool {
    count >= majority(n)
}

/// Per-read mapping from an observed counter value to the number of vaults
/// reporting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: BTreeMap<u64, usize>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one vault reporting `value`.
    pub fn record(&mut self, value: u64) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    /// Number of vaults that voted.
    pub fn voters(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Votes recorded for `value`.
    pub fn count(&self, value: u64) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Highest tally across all observed values (0 when nobody voted).
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// The most-voted value, breaking ties towards the numerically largest.
    ///
    /// The counter only ever grows, so among equally popular values the
    /// largest is taken to be the most recent. This is a heuristic and can be
    /// wrong under some partition patterns.
    pub fn leader(&self) -> Option<(u64, usize)> {
        let max = self.max_count();
        // BTreeMap iterates in ascending key order: the last tie is the largest.
        self.counts
            .iter()
            .filter(|&(_, &count)| count == max)
            .next_back()
            .map(|(&value, &count)| (value, count))
    }

    /// The consensus value among `n` configured vaults, if any.
    pub fn consensus(&self, n: usize) -> Option<u64> {
        match self.leader() {
            Some((value, count)) if has_majority(count, n) => Some(value),
            _ => None,
        }
    }
}

impl FromIterator<u64> for VoteTally {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut tally = VoteTally::new();
        for value in iter {
            tally.record(value);
        }
        tally
    }
}

impl std::fmt::Display for VoteTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (value, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", value, count)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority() {
        assert_eq!(majority(0), 1);
        assert_eq!(majority(1), 1);
        assert_eq!(majority(2), 2);
        assert_eq!(majority(3), 2);
        assert_eq!(majority(4), 3);
        assert_eq!(majority(5), 3);
        assert_eq!(majority(7), 4);
    }

    #[test]
    fn test_majority_is_strictly_more_than_half() {
        for n in 0..100 {
            let m = majority(n);
            assert!(2 * m > n, "majority({}) = {} is not > n/2", n, m);
            assert!(m == 1 || 2 * (m - 1) <= n);
        }
    }

    #[test]
    fn test_empty_vault_set_never_has_majority() {
        assert!(!has_majority(0, 0));
    }

    #[test]
    fn test_tie_below_majority_is_no_consensus() {
        let tally: VoteTally = [1, 1, 1, 2, 2, 2, 4].into_iter().collect();
        assert_eq!(tally.count(1), 3);
        assert_eq!(tally.count(2), 3);
        assert_eq!(tally.count(4), 1);
        assert_eq!(tally.max_count(), 3);
        assert_eq!(tally.leader(), Some((2, 3)));
        assert_eq!(tally.consensus(7), None);
    }

    #[test]
    fn test_majority_value_wins() {
        let tally: VoteTally = [1, 1, 1, 1, 2, 2, 3].into_iter().collect();
        assert_eq!(tally.max_count(), 4);
        assert_eq!(tally.consensus(7), Some(1));
    }

    #[test]
    fn test_tie_break_prefers_largest_value() {
        let tally: VoteTally = [5, 9, 5, 9, 7].into_iter().collect();
        assert_eq!(tally.leader(), Some((9, 2)));
        assert_eq!(tally.consensus(5), None);
    }

    #[test]
    fn test_empty_tally() {
        let tally = VoteTally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.voters(), 0);
        assert_eq!(tally.leader(), None);
        assert_eq!(tally.consensus(5), None);
    }

    #[test]
    fn test_display() {
        let tally: VoteTally = [2, 1, 2].into_iter().collect();
        assert_eq!(tally.to_string(), "{1:1, 2:2}");
        assert_eq!(tally.voters(), 3);
    }
}
