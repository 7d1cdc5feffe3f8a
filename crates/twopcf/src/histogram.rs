//! Histograms of pair separations.
//!
//! Two flavors of separation are supported:
//! - the Euclidean distance between two points in the plane
//! - the signed difference between two coordinates along a single axis
//!   (used to study anisotropy)
//!
//! In both cases the bin edges are `0, w, 2w, ...` lying strictly below the
//! range limit (see [`RegularBinEdges`]). The range limit is the diagonal of
//! the box for distances and the box side for axis differences. Separations
//! that don't fall in any bin are dropped, but they are still counted:
//! [`PairHistogram::n_binned`] + [`PairHistogram::n_dropped`] always equals
//! [`PairHistogram::n_pairs`].
//!
//! Signed axis differences are *not* folded onto positive values. Negative
//! differences lie below the leftmost edge and are therefore dropped.

use log::debug;
use ndarray::ArrayView1;
use twopcf_nostd_internal::{
    BinEdges, CountPackViewMut, PairingRule, RegularBinEdges, TwoPointTally, required_length,
};

use crate::{Error, Executor, PointSet, SerialExecutor};

/// The outcome of histogramming the separations of a collection of pairs
#[derive(Clone, Debug, PartialEq)]
pub struct PairHistogram {
    bin_edges: RegularBinEdges,
    counts: Vec<u64>,
    n_dropped: u64,
    separations: Vec<f64>,
}

impl PairHistogram {
    /// The number of pairs that landed in each bin
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }

    /// Every separation that was computed, in the order that the pairs were
    /// visited. This is empty when the separations weren't retained (see
    /// [`PairHistogrammer::keep_separations`]).
    pub fn separations(&self) -> &[f64] {
        &self.separations
    }

    pub fn bin_spec(&self) -> &RegularBinEdges {
        &self.bin_edges
    }

    /// All bin edges (there is 1 more edge than there are bins)
    pub fn bin_edges(&self) -> Vec<f64> {
        (0..self.bin_edges.n_edges())
            .map(|k| self.bin_edges.edge(k))
            .collect()
    }

    /// The left edge of every bin
    pub fn left_edges(&self) -> Vec<f64> {
        (0..self.bin_edges.n_bins())
            .map(|k| self.bin_edges.edge(k))
            .collect()
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// The number of pairs that landed in a bin
    pub fn n_binned(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The number of pairs that fell outside of every bin
    pub fn n_dropped(&self) -> u64 {
        self.n_dropped
    }

    /// The number of pairs that were considered
    pub fn n_pairs(&self) -> u64 {
        self.n_binned() + self.n_dropped
    }
}

/// the largest separation between two points of a square box
fn box_diagonal(box_size: f64) -> Result<f64, Error> {
    check_box_size(box_size)?;
    Ok((2.0 * box_size.powi(2)).sqrt())
}

fn check_box_size(box_size: f64) -> Result<(), Error> {
    if box_size.is_finite() && box_size > 0.0 {
        Ok(())
    } else {
        Err(Error::bin_spec("box_size", "must be positive and finite"))
    }
}

/// Configures how pair separations get histogrammed.
///
/// ```
/// use twopcf::{PairHistogrammer, PointSet, SerialExecutor};
///
/// let points = PointSet::from_points(&[[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]]);
/// let hist = PairHistogrammer::new(5.0)?
///     .distances(&points, 10.0, &mut SerialExecutor::default())?;
/// // the edges are 0, 5 & 10 (sqrt(2) * 10 = 14.1 is excluded)
/// assert_eq!(hist.counts(), &[0, 3]);
/// # Ok::<(), twopcf::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairHistogrammer {
    bin_size: f64,
    cross_pairing: PairingRule,
    keep_separations: bool,
}

impl PairHistogrammer {
    /// Create a new instance with bins of width `bin_size`.
    ///
    /// By default, cross histograms use [`PairingRule::LegacyOffset`] and the
    /// separations are retained.
    pub fn new(bin_size: f64) -> Result<Self, Error> {
        if bin_size.is_finite() && bin_size > 0.0 {
            Ok(Self {
                bin_size,
                cross_pairing: PairingRule::LegacyOffset,
                keep_separations: true,
            })
        } else {
            Err(Error::bin_spec("bin_size", "must be positive and finite"))
        }
    }

    /// The rule used to pair the points of 2 different sequences
    pub fn cross_pairing(mut self, rule: PairingRule) -> Self {
        self.cross_pairing = rule;
        self
    }

    /// Whether the individual separations should be retained. The list has
    /// one entry per pair, so it is worth disabling for large catalogs.
    pub fn keep_separations(mut self, keep: bool) -> Self {
        self.keep_separations = keep;
        self
    }

    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    fn bin_edges(&self, range_limit: f64) -> Result<RegularBinEdges, Error> {
        RegularBinEdges::arange(0.0, range_limit, self.bin_size)
            .map_err(|what| Error::bin_spec("the histogram bins", what))
    }

    /// Histogram the distance between every unique pair of `points`
    pub fn distances(
        &self,
        points: &PointSet,
        box_size: f64,
        exec: &mut impl Executor,
    ) -> Result<PairHistogram, Error> {
        let bin_edges = self.bin_edges(box_diagonal(box_size)?)?;
        let view = points.planar_view();
        let n_points = view.n_points();
        let tally = TwoPointTally::new(bin_edges, PairingRule::Unique, n_points, n_points)
            .map_err(Error::internal_legacy_adhoc)?;
        self.run(&tally, &|i, j| view.squared_separation(&view, i, j).sqrt(), exec)
    }

    /// Histogram the distance between points of `points_a` and `points_b`.
    ///
    /// The range limit is the larger of the two box diagonals.
    pub fn cross_distances(
        &self,
        points_a: &PointSet,
        box_size_a: f64,
        points_b: &PointSet,
        box_size_b: f64,
        exec: &mut impl Executor,
    ) -> Result<PairHistogram, Error> {
        let range_limit = box_diagonal(box_size_a)?.max(box_diagonal(box_size_b)?);
        let bin_edges = self.bin_edges(range_limit)?;
        let (view_a, view_b) = (points_a.planar_view(), points_b.planar_view());
        let tally = TwoPointTally::new(
            bin_edges,
            self.cross_pairing,
            view_a.n_points(),
            view_b.n_points(),
        )
        .map_err(Error::internal_legacy_adhoc)?;
        self.run(
            &tally,
            &|i, j| view_a.squared_separation(&view_b, i, j).sqrt(),
            exec,
        )
    }

    /// Histogram the signed difference, `coords[i] - coords[j]`, for every
    /// unique pair `i < j`.
    pub fn axis_differences(
        &self,
        coords: ArrayView1<f64>,
        box_size: f64,
        exec: &mut impl Executor,
    ) -> Result<PairHistogram, Error> {
        check_box_size(box_size)?;
        let bin_edges = self.bin_edges(box_size)?;
        let n_points = coords.len();
        let tally = TwoPointTally::new(bin_edges, PairingRule::Unique, n_points, n_points)
            .map_err(Error::internal_legacy_adhoc)?;
        self.run(&tally, &|i, j| coords[i] - coords[j], exec)
    }

    /// Histogram the signed difference, `coords_a[i] - coords_b[j]`, between
    /// coordinates of 2 sequences.
    ///
    /// The range limit is the larger of the two box sizes.
    pub fn cross_axis_differences(
        &self,
        coords_a: ArrayView1<f64>,
        box_size_a: f64,
        coords_b: ArrayView1<f64>,
        box_size_b: f64,
        exec: &mut impl Executor,
    ) -> Result<PairHistogram, Error> {
        check_box_size(box_size_a)?;
        check_box_size(box_size_b)?;
        let bin_edges = self.bin_edges(box_size_a.max(box_size_b))?;
        let tally = TwoPointTally::new(bin_edges, self.cross_pairing, coords_a.len(), coords_b.len())
            .map_err(Error::internal_legacy_adhoc)?;
        self.run(&tally, &|i, j| coords_a[i] - coords_b[j], exec)
    }

    fn run(
        &self,
        tally: &TwoPointTally<RegularBinEdges>,
        separation: &impl Fn(usize, usize) -> f64,
        exec: &mut impl Executor,
    ) -> Result<PairHistogram, Error> {
        let n_bins = tally.n_bins();
        let n_pairs = tally.n_pairs();
        debug!(
            "histogramming {n_pairs} pairs ({:?}) into {n_bins} bins of width {}",
            tally.pairing(),
            self.bin_size
        );

        let mut buf = vec![0_u64; required_length(n_bins)];
        let mut pack = CountPackViewMut::from_slice(&mut buf).map_err(Error::internal_legacy_adhoc)?;
        let mut separations = Vec::new();
        if self.keep_separations {
            separations.reserve_exact(n_pairs as usize);
        }
        let log = self.keep_separations.then_some(&mut separations);
        exec.drive_reduce(&mut pack, tally, separation, log)?;

        let n_dropped = pack.n_dropped();
        let counts = pack.counts().to_vec();
        debug_assert_eq!(counts.iter().sum::<u64>() + n_dropped, n_pairs);
        if n_dropped > 0 {
            debug!("{n_dropped} of {n_pairs} pairs fell outside of the histogram range");
        }

        Ok(PairHistogram {
            bin_edges: *tally.bin_edges(),
            counts,
            n_dropped,
            separations,
        })
    }
}

/// Histogram the Euclidean distance between every unique pair of `points`.
///
/// The bins have width `bin_size` and extend up to (but not including)
/// `sqrt(2) * box_size`. Every separation is retained.
pub fn distance_histogram(
    points: &PointSet,
    box_size: f64,
    bin_size: f64,
) -> Result<PairHistogram, Error> {
    PairHistogrammer::new(bin_size)?.distances(points, box_size, &mut SerialExecutor::default())
}

/// Histogram the Euclidean distance between the points of two sets using the
/// legacy offset pairing ([`PairingRule::LegacyOffset`]).
pub fn cross_distance_histogram(
    points_a: &PointSet,
    box_size_a: f64,
    points_b: &PointSet,
    box_size_b: f64,
    bin_size: f64,
) -> Result<PairHistogram, Error> {
    PairHistogrammer::new(bin_size)?.cross_distances(
        points_a,
        box_size_a,
        points_b,
        box_size_b,
        &mut SerialExecutor::default(),
    )
}

/// Histogram the signed coordinate differences between every unique pair.
/// The bins extend up to (but not including) `box_size`.
pub fn axis_histogram(
    coords: ArrayView1<f64>,
    box_size: f64,
    bin_size: f64,
) -> Result<PairHistogram, Error> {
    PairHistogrammer::new(bin_size)?.axis_differences(
        coords,
        box_size,
        &mut SerialExecutor::default(),
    )
}

/// Histogram the signed coordinate differences between two sequences using
/// the legacy offset pairing ([`PairingRule::LegacyOffset`]).
pub fn cross_axis_histogram(
    coords_a: ArrayView1<f64>,
    box_size_a: f64,
    coords_b: ArrayView1<f64>,
    box_size_b: f64,
    bin_size: f64,
) -> Result<PairHistogram, Error> {
    PairHistogrammer::new(bin_size)?.cross_axis_differences(
        coords_a,
        box_size_a,
        coords_b,
        box_size_b,
        &mut SerialExecutor::default(),
    )
}
