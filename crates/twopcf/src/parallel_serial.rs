//! Implements the "serial" backend for driving a pair tally.
//!
//! The pair loop is decomposed into shards (contiguous chunks of the outer
//! index). Each shard fills a count pack that is merged into the output as
//! soon as the shard finishes. A multi-threaded backend would hand shards to
//! different workers; here a single thread visits them one after another.
//! Because the consolidation is plain addition, the counts are identical for
//! any number of shards. The number of shards never exceeds the number of
//! outer indices.

use log::trace;
use std::num::NonZeroU32;
use twopcf_nostd_internal::{
    BinEdges, CountPackViewMut, TwoPointTally, required_length, shard_range,
};

use crate::Error;

/// Something that can drive a [`TwoPointTally`] to completion
pub trait Executor {
    /// Fill `out` with the histogram of the values computed by `separation`
    /// for every pair described by `tally`.
    ///
    /// When `separations` is provided, every value is also appended to it in
    /// the order that the pairs are enumerated (regardless of the sharding).
    fn drive_reduce<B: BinEdges>(
        &mut self,
        out: &mut CountPackViewMut,
        tally: &TwoPointTally<B>,
        separation: &impl Fn(usize, usize) -> f64,
        separations: Option<&mut Vec<f64>>,
    ) -> Result<(), Error>;
}

#[derive(Clone, Copy, Debug)]
pub struct SerialExecutor {
    n_shards: NonZeroU32,
}

impl SerialExecutor {
    pub fn new(n_shards: NonZeroU32) -> Self {
        Self { n_shards }
    }
}

impl SerialExecutor {
    /// There is never more than one shard per outer index (an empty pair
    /// loop still gets a single shard)
    fn effective_n_shards(&self, outer_len: usize) -> NonZeroU32 {
        let cap = u32::try_from(outer_len.max(1)).unwrap_or(u32::MAX);
        NonZeroU32::new(self.n_shards.get().min(cap)).unwrap_or(NonZeroU32::MIN)
    }
}

impl Default for SerialExecutor {
    fn default() -> Self {
        Self::new(NonZeroU32::MIN)
    }
}

impl Executor for SerialExecutor {
    fn drive_reduce<B: BinEdges>(
        &mut self,
        out: &mut CountPackViewMut,
        tally: &TwoPointTally<B>,
        separation: &impl Fn(usize, usize) -> f64,
        mut separations: Option<&mut Vec<f64>>,
    ) -> Result<(), Error> {
        let n_bins = tally.n_bins();
        if out.n_bins() != n_bins {
            return Err(Error::internal_legacy_adhoc(
                "the out argument doesn't have the correct number of bins!",
            ));
        }
        let outer_len = tally.outer_len();
        let n_shards = self.effective_n_shards(outer_len);

        // a single scratch pack is reused by every shard
        let mut scratch: Vec<u64> = vec![0; required_length(n_bins)];

        out.reset();
        for shard_id in 0..n_shards.get() {
            let outer = shard_range(outer_len, n_shards, shard_id);
            trace!("shard {shard_id}: outer indices {outer:?}");
            let mut pack =
                CountPackViewMut::from_slice(&mut scratch).map_err(Error::internal_legacy_adhoc)?;
            pack.reset();
            let result = match separations.as_deref_mut() {
                Some(log) => {
                    tally.collect_shard_contrib(&mut pack, outer, separation, &mut |s| log.push(s))
                }
                None => tally.collect_shard_contrib(&mut pack, outer, separation, &mut |_| {}),
            };
            result.map_err(Error::internal_legacy_adhoc)?;

            // consolidate this shard's counts
            out.merge(&pack.as_view());
        }
        Ok(())
    }
}
