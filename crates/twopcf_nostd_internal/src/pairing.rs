//! Describes which index pairs are visited by a two-point calculation.
//!
//! Every rule is expressed as an "outer" index, `i`, that addresses the first
//! point sequence and an "inner" index range (that depends on `i`) addressing
//! the second sequence. Splitting the outer index range into contiguous
//! shards is how the pair loop gets decomposed into independent units of work.

use core::num::NonZeroU32;
use core::ops::Range;

/// The rule used to enumerate index pairs `(i, j)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingRule {
    /// Every unordered pair of a single sequence, each visited once:
    /// `i` in `[0, n - 1)`, `j` in `[i + 1, n)`. Both sequences must be the
    /// same sequence (or at least have the same length).
    Unique,
    /// `i` in `[0, n_a - 1)`, `j` in `[i + 1, n_b)`.
    ///
    /// This is the pairing historically used for data-random counts. It is
    /// *not* the Cartesian product of the two sequences: it only visits the
    /// "upper triangle" of the index grid, so it undercounts relative to the
    /// Cartesian product and is only sensible when `n_a` is close to `n_b`.
    LegacyOffset,
    /// The full Cartesian product: `i` in `[0, n_a)`, `j` in `[0, n_b)`.
    FullCross,
}

impl PairingRule {
    /// The length of the outer index range
    pub fn outer_len(self, n_a: usize, _n_b: usize) -> usize {
        match self {
            PairingRule::Unique | PairingRule::LegacyOffset => n_a.saturating_sub(1),
            PairingRule::FullCross => n_a,
        }
    }

    /// The inner index range paired with outer index `i`
    #[inline(always)]
    pub fn inner_range(self, i: usize, n_b: usize) -> Range<usize> {
        match self {
            PairingRule::Unique | PairingRule::LegacyOffset => (i + 1).min(n_b)..n_b,
            PairingRule::FullCross => 0..n_b,
        }
    }

    /// The number of pairs visited for outer indices in `outer`
    pub fn n_pairs_in(self, outer: Range<usize>, n_b: usize) -> u64 {
        outer.map(|i| self.inner_range(i, n_b).len() as u64).sum()
    }

    /// The total number of pairs visited
    pub fn n_pairs(self, n_a: usize, n_b: usize) -> u64 {
        self.n_pairs_in(0..self.outer_len(n_a, n_b), n_b)
    }

    /// Invoke `f` on every pair whose outer index lies in `outer`, in
    /// lexicographic `(i, j)` order.
    #[inline(always)]
    pub fn for_each_pair(self, outer: Range<usize>, n_b: usize, mut f: impl FnMut(usize, usize)) {
        for i in outer {
            for j in self.inner_range(i, n_b) {
                f(i, j);
            }
        }
    }
}

/// Get the range of outer indices handled by shard `shard_id` when
/// `outer_len` indices are split among `n_shards` contiguous shards.
///
/// The shards are ordered, don't overlap and, together, cover `0..outer_len`.
/// Their lengths differ by at most 1.
pub fn shard_range(outer_len: usize, n_shards: NonZeroU32, shard_id: u32) -> Range<usize> {
    let n_shards = n_shards.get() as usize;
    let shard_id = shard_id as usize;
    assert!(shard_id < n_shards);

    let base = outer_len / n_shards;
    let remainder = outer_len % n_shards;
    let start = shard_id * base + shard_id.min(remainder);
    let len = base + usize::from(shard_id < remainder);
    start..(start + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_pair_count() {
        for n in 0..12 {
            let expected = if n < 2 { 0 } else { (n * (n - 1) / 2) as u64 };
            assert_eq!(PairingRule::Unique.n_pairs(n, n), expected);
        }
    }

    #[test]
    fn unique_visits_each_pair_once() {
        let n = 5;
        let mut seen = [[0u32; 5]; 5];
        PairingRule::Unique.for_each_pair(0..PairingRule::Unique.outer_len(n, n), n, |i, j| {
            seen[i][j] += 1;
        });
        for i in 0..n {
            for j in 0..n {
                let expected = u32::from(i < j);
                assert_eq!(seen[i][j], expected, "pair ({i}, {j})");
            }
        }
    }

    #[test]
    fn legacy_offset_mismatched_lengths() {
        // n_a > n_b: outer indices beyond n_b - 1 contribute nothing
        assert_eq!(PairingRule::LegacyOffset.n_pairs(6, 3), 2 + 1);
        // n_a < n_b: the inner range keeps going to n_b
        assert_eq!(PairingRule::LegacyOffset.n_pairs(3, 6), 5 + 4);
        assert_eq!(PairingRule::LegacyOffset.n_pairs(1, 6), 0);
        assert_eq!(PairingRule::LegacyOffset.n_pairs(0, 6), 0);
    }

    #[test]
    fn full_cross_pair_count() {
        assert_eq!(PairingRule::FullCross.n_pairs(6, 3), 18);
        assert_eq!(PairingRule::FullCross.n_pairs(1, 3), 3);
        assert_eq!(PairingRule::FullCross.n_pairs(0, 3), 0);
    }

    #[test]
    fn shards_cover_outer_range() {
        for outer_len in [0_usize, 1, 2, 7, 16, 33] {
            for n_shards in 1_u32..6 {
                let n_shards = NonZeroU32::new(n_shards).unwrap();
                let mut next_start = 0;
                for shard_id in 0..n_shards.get() {
                    let range = shard_range(outer_len, n_shards, shard_id);
                    assert_eq!(range.start, next_start);
                    next_start = range.end;
                }
                assert_eq!(next_start, outer_len);
            }
        }
    }
}
