use crate::bins::BinEdges;
use crate::pairing::PairingRule;
use crate::state::CountPackViewMut;
use core::ops::Range;

/// Describes a histogram of pair separations.
///
/// The separation itself is supplied as a closure when contributions are
/// collected. This type only knows about indices, bins & counts (that keeps
/// it usable without the standard library, which we need for `sqrt`).
///
/// The pairs are enumerated according to [`PairingRule`], where the outer
/// index `i` addresses the first sequence (of length `n_a`) and the inner
/// index `j` addresses the second sequence (of length `n_b`).
#[derive(Clone, Debug)]
pub struct TwoPointTally<B: BinEdges> {
    bin_edges: B,
    pairing: PairingRule,
    n_a: usize,
    n_b: usize,
}

impl<B: BinEdges> TwoPointTally<B> {
    pub fn new(
        bin_edges: B,
        pairing: PairingRule,
        n_a: usize,
        n_b: usize,
    ) -> Result<Self, &'static str> {
        if pairing == PairingRule::Unique && n_a != n_b {
            Err("unique pairing requires both index sequences to refer to the same points")
        } else {
            Ok(Self {
                bin_edges,
                pairing,
                n_a,
                n_b,
            })
        }
    }

    pub fn bin_edges(&self) -> &B {
        &self.bin_edges
    }

    pub fn pairing(&self) -> PairingRule {
        self.pairing
    }

    pub fn n_bins(&self) -> usize {
        self.bin_edges.n_bins()
    }

    /// the length of the outer index range (this is what gets sharded)
    pub fn outer_len(&self) -> usize {
        self.pairing.outer_len(self.n_a, self.n_b)
    }

    /// the total number of pairs that will be considered
    pub fn n_pairs(&self) -> u64 {
        self.pairing.n_pairs(self.n_a, self.n_b)
    }

    /// Computes contributions to the histogram from every pair whose outer
    /// index lies in `outer`.
    ///
    /// For each pair `(i, j)`:
    /// - the separation is computed by `separation(i, j)`
    /// - the separation is handed to `record` (in visit order)
    /// - the bin is determined by the bin edges. Pairs outside of every bin
    ///   are tallied as dropped
    pub fn collect_shard_contrib(
        &self,
        pack: &mut CountPackViewMut,
        outer: Range<usize>,
        separation: &impl Fn(usize, usize) -> f64,
        record: &mut impl FnMut(f64),
    ) -> Result<(), &'static str> {
        if pack.n_bins() != self.n_bins() {
            return Err("the count pack doesn't have the correct number of bins");
        } else if outer.end > self.outer_len() {
            return Err("the outer index range extends past the last outer index");
        }

        self.pairing.for_each_pair(outer, self.n_b, |i, j| {
            let value = separation(i, j);
            record(value);
            pack.consume(self.bin_edges.bin_index(value));
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::RegularBinEdges;
    use crate::state::required_length;

    #[test]
    fn unique_requires_equal_lengths() {
        let bins = RegularBinEdges::arange(0.0, 4.0, 1.0).unwrap();
        assert!(TwoPointTally::new(bins, PairingRule::Unique, 3, 4).is_err());
        assert!(TwoPointTally::new(bins, PairingRule::LegacyOffset, 3, 4).is_ok());
    }

    #[test]
    fn tally_1d_differences() {
        let coords = [0.0, 1.5, 3.0, 0.5];
        let bins = RegularBinEdges::arange(0.0, 4.0, 1.0).unwrap();
        let tally = TwoPointTally::new(bins, PairingRule::Unique, 4, 4).unwrap();

        let mut buf = [0_u64; required_length(3)];
        let mut pack = CountPackViewMut::from_slice(&mut buf).unwrap();
        let mut n_recorded = 0;
        tally
            .collect_shard_contrib(
                &mut pack,
                0..tally.outer_len(),
                &|i, j| coords[j] - coords[i],
                &mut |_| n_recorded += 1,
            )
            .unwrap();

        // differences: 1.5, 3.0, 0.5, 1.5, -1.0, -2.5
        assert_eq!(n_recorded, 6);
        assert_eq!(pack.counts(), &[1, 2, 1]);
        assert_eq!(pack.n_dropped(), 2);
    }

    #[test]
    fn reject_mismatched_pack() {
        let bins = RegularBinEdges::arange(0.0, 4.0, 1.0).unwrap();
        let tally = TwoPointTally::new(bins, PairingRule::Unique, 4, 4).unwrap();
        let mut buf = [0_u64; required_length(2)];
        let mut pack = CountPackViewMut::from_slice(&mut buf).unwrap();
        let result =
            tally.collect_shard_contrib(&mut pack, 0..tally.outer_len(), &|_, _| 0.0, &mut |_| {});
        assert!(result.is_err());
    }
}
