//! Implements types to represent "bin edges", used to bin pair separations.
//! The [`BinEdges`] trait provides a common interface that is implemented by
//! [`RegularBinEdges`].

/// Super simple. This can be expanded as needed.
pub trait BinEdges {
    /// Calculate the bin index for a given value. Values which are equal to
    /// interior boundary values are considered part of the higher bin, i.e.
    /// intervals do not include the right edge (the rightmost bin is the
    /// exception, see the implementor's docs).
    fn bin_index(&self, value: f64) -> Option<usize>;

    fn n_bins(&self) -> usize;
}

/// Regular bins with uniform spacing.
///
/// The edges are the arithmetic sequence `start, start + step, ...` that lies
/// strictly below `stop`. In other words, there are `ceil((stop - start) /
/// step)` edges and one fewer bins. The rightmost edge is generally smaller
/// than `stop`.
///
/// Every bin is half-open, except for the rightmost bin, which also includes
/// its right edge. Values outside of `[leftmost_edge, rightmost_edge]` (and
/// `NaN`) don't belong to any bin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegularBinEdges {
    start: f64,
    step: f64,
    n_edges: usize,
}

// we refuse to construct absurdly large histograms. This also keeps the
// float -> usize conversion in `arange` well-defined
const MAX_EDGES: f64 = 4294967296.0;

impl RegularBinEdges {
    /// Note that we initialize with the step (i.e. the bin width) rather than
    /// the number of bins.
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, &'static str> {
        if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
            return Err("start, stop and step must all be finite");
        } else if step <= 0.0 {
            return Err("the bin width must be positive");
        } else if stop <= start {
            return Err("stop must exceed start");
        }

        let ratio = (stop - start) / step;
        if ratio > MAX_EDGES {
            return Err("the bin width is too small for the requested range");
        }
        // ceil without relying on std. ratio is positive, so the cast
        // truncates toward zero
        let mut n_edges = ratio as usize;
        if (n_edges as f64) < ratio {
            n_edges += 1;
        }

        if n_edges < 2 {
            Err("the bin width must be smaller than the range (at least 2 bin edges are required)")
        } else {
            Ok(Self {
                start,
                step,
                n_edges,
            })
        }
    }

    /// The position of the `k`th edge
    #[inline(always)]
    pub fn edge(&self, k: usize) -> f64 {
        self.start + (k as f64) * self.step
    }

    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    pub fn leftmost_edge(&self) -> f64 {
        self.start
    }

    pub fn rightmost_edge(&self) -> f64 {
        self.edge(self.n_edges - 1)
    }
}

impl BinEdges for RegularBinEdges {
    fn bin_index(&self, value: f64) -> Option<usize> {
        let last_bin = self.n_edges - 2;
        // written this way so that NaN is rejected
        if !((value >= self.start) && (value <= self.rightmost_edge())) {
            return None;
        } else if value == self.rightmost_edge() {
            return Some(last_bin);
        }

        // this cast handles the truncation. The guess can be off by one due
        // to rounding, so we compare against the edges themselves
        let mut index = (((value - self.start) / self.step) as usize).min(last_bin);
        while index > 0 && value < self.edge(index) {
            index -= 1;
        }
        while index < last_bin && value >= self.edge(index + 1) {
            index += 1;
        }
        Some(index)
    }

    fn n_bins(&self) -> usize {
        self.n_edges - 1
    }
}
