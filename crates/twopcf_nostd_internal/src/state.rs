//! Introduces the [`CountPackView`] and [`CountPackViewMut`] types.
//!
//! A count pack is the state that gets accumulated by a histogram of pair
//! separations. It is a flat buffer of `n_bins + 1` counters: the first
//! `n_bins` entries hold the per-bin counts and the final entry tracks the
//! number of pairs that didn't fall into any bin (the "dropped" pairs).
//!
//! Keeping the dropped count alongside the bin counts means that merging two
//! packs is a single elementwise addition and that the invariant
//! `sum(counts) + n_dropped == n_pairs` survives any merge order.

/// The length of the buffer needed to hold a count pack with `n_bins` bins
pub const fn required_length(n_bins: usize) -> usize {
    n_bins + 1
}

fn check_length(len: usize) -> Result<(), &'static str> {
    if len < required_length(1) {
        Err("a count pack must hold at least 1 bin and the dropped counter")
    } else {
        Ok(())
    }
}

/// An immutable view of a count pack
#[derive(Clone, Copy, Debug)]
pub struct CountPackView<'a> {
    data: &'a [u64],
}

impl<'a> CountPackView<'a> {
    pub fn from_slice(data: &'a [u64]) -> Result<Self, &'static str> {
        check_length(data.len())?;
        Ok(Self { data })
    }

    pub fn n_bins(&self) -> usize {
        self.data.len() - 1
    }

    pub fn counts(&self) -> &'a [u64] {
        &self.data[..self.n_bins()]
    }

    pub fn n_dropped(&self) -> u64 {
        self.data[self.n_bins()]
    }
}

/// A mutable view of a count pack
#[derive(Debug)]
pub struct CountPackViewMut<'a> {
    data: &'a mut [u64],
}

impl<'a> CountPackViewMut<'a> {
    pub fn from_slice(data: &'a mut [u64]) -> Result<Self, &'static str> {
        check_length(data.len())?;
        Ok(Self { data })
    }

    pub fn as_view(&self) -> CountPackView<'_> {
        CountPackView { data: self.data }
    }

    pub fn n_bins(&self) -> usize {
        self.data.len() - 1
    }

    pub fn counts(&self) -> &[u64] {
        &self.data[..self.n_bins()]
    }

    pub fn n_dropped(&self) -> u64 {
        self.data[self.n_bins()]
    }

    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// record a single pair that falls into `bin_index` (or that was dropped
    /// when `bin_index` is `None`)
    #[inline(always)]
    pub fn consume(&mut self, bin_index: Option<usize>) {
        let slot = bin_index.unwrap_or(self.data.len() - 1);
        self.data[slot] += 1;
    }

    /// merge the counts tracked by `self` and `other`, and update `self`
    /// accordingly
    pub fn merge(&mut self, other: &CountPackView) {
        assert_eq!(self.data.len(), other.data.len());
        for (mine, theirs) in self.data.iter_mut().zip(other.data.iter()) {
            *mine += *theirs;
        }
    }
}
