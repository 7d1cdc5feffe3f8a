//! Drives the full set of pair counts needed by the correlation function
//! estimators.
//!
//! A calculation compares a data catalog against a random catalog that is
//! uniformly distributed in the same box:
//! - RR: separations between pairs of random points
//! - DD: separations between pairs of data points
//! - DR: separations between data points (first) and random points (second)
//!
//! The counts are reconciled by `inv_nest`, which corrects for the different
//! number of pairs in each catalog.

use log::{debug, warn};
use rand::Rng;
use std::num::NonZeroU32;
use twopcf_nostd_internal::PairingRule;

use crate::{
    Error, Estimator, PairHistogram, PairHistogrammer, PlaneAxis, PointSet, SerialExecutor,
    distros,
};

/// The normalization factor `sqrt(nR·(nR − 1) / (nD·(nD − 1)))`.
///
/// This is only meaningful when both catalogs hold at least 2 points.
/// Otherwise, the result is `inf` or `NaN` (see [`inv_nest_checked`]).
pub fn inv_nest(n_random: usize, n_data: usize) -> f64 {
    let (n_random, n_data) = (n_random as f64, n_data as f64);
    (n_random * (n_random - 1.0) / (n_data * (n_data - 1.0))).sqrt()
}

/// Like [`inv_nest`], but fails when either catalog holds fewer than 2
/// points
pub fn inv_nest_checked(n_random: usize, n_data: usize) -> Result<f64, Error> {
    if n_data < 2 {
        Err(Error::insufficient_data("data", n_data))
    } else if n_random < 2 {
        Err(Error::insufficient_data("random", n_random))
    } else {
        Ok(inv_nest(n_random, n_data))
    }
}

/// Aligned RR, DD and DR pair counts (all share the same bins) & the
/// normalization factor.
#[derive(Clone, Debug, PartialEq)]
pub struct PairCounts {
    left_edges: Vec<f64>,
    rr: Vec<u64>,
    dd: Vec<u64>,
    dr: Vec<u64>,
    inv_nest: f64,
}

impl PairCounts {
    /// Assemble pair counts from individual histograms
    pub fn from_histograms(
        rr: PairHistogram,
        dd: PairHistogram,
        dr: PairHistogram,
        inv_nest: f64,
    ) -> Result<Self, Error> {
        if rr.bin_spec() != dd.bin_spec() || rr.bin_spec() != dr.bin_spec() {
            return Err(Error::bin_spec(
                "the pair counts",
                "RR, DD and DR must share identical bins",
            ));
        }
        Ok(Self {
            left_edges: rr.left_edges(),
            rr: rr.into_counts(),
            dd: dd.into_counts(),
            dr: dr.into_counts(),
            inv_nest,
        })
    }

    /// The left edge of every bin
    pub fn left_edges(&self) -> &[f64] {
        &self.left_edges
    }

    pub fn rr(&self) -> &[u64] {
        &self.rr
    }

    pub fn dd(&self) -> &[u64] {
        &self.dd
    }

    pub fn dr(&self) -> &[u64] {
        &self.dr
    }

    pub fn inv_nest(&self) -> f64 {
        self.inv_nest
    }

    pub fn n_bins(&self) -> usize {
        self.rr.len()
    }

    /// shorthand for [`Estimator::evaluate`]
    pub fn estimate(&self, estimator: Estimator) -> Vec<f64> {
        estimator.evaluate(self)
    }
}

/// Pair counts computed separately from the x and the y coordinate
/// differences. Both axes share the bins, the random catalog and `inv_nest`.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisPairCounts {
    x: PairCounts,
    y: PairCounts,
}

impl AxisPairCounts {
    pub fn x(&self) -> &PairCounts {
        &self.x
    }

    pub fn y(&self) -> &PairCounts {
        &self.y
    }

    pub fn axis(&self, axis: PlaneAxis) -> &PairCounts {
        match axis {
            PlaneAxis::X => &self.x,
            PlaneAxis::Y => &self.y,
        }
    }

    /// The left edge of every bin (shared by both axes)
    pub fn left_edges(&self) -> &[f64] {
        self.x.left_edges()
    }

    pub fn inv_nest(&self) -> f64 {
        self.x.inv_nest()
    }
}

/// Configures a [`CorrelationDriver`].
///
/// ```
/// use twopcf::CorrelationBuilder;
///
/// let driver = CorrelationBuilder::new()
///     .box_size(10.0)
///     .bin_size(0.5)
///     .n_random(200)
///     .build()?;
/// # Ok::<(), twopcf::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct CorrelationBuilder {
    box_size: Option<f64>,
    bin_size: Option<f64>,
    n_random: Option<usize>,
    cross_pairing: PairingRule,
    n_shards: NonZeroU32,
    strict: bool,
}

impl Default for CorrelationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrelationBuilder {
    pub fn new() -> Self {
        Self {
            box_size: None,
            bin_size: None,
            n_random: None,
            cross_pairing: PairingRule::LegacyOffset,
            n_shards: NonZeroU32::MIN,
            strict: false,
        }
    }

    /// side length of the (square) box holding the catalogs
    pub fn box_size(mut self, box_size: f64) -> Self {
        self.box_size = Some(box_size);
        self
    }

    /// width of the separation bins
    pub fn bin_size(mut self, bin_size: f64) -> Self {
        self.bin_size = Some(bin_size);
        self
    }

    /// number of points in the generated random catalog
    pub fn n_random(mut self, n_random: usize) -> Self {
        self.n_random = Some(n_random);
        self
    }

    /// the rule used to pair data & random points for DR. Defaults to
    /// [`PairingRule::LegacyOffset`]
    pub fn cross_pairing(mut self, rule: PairingRule) -> Self {
        self.cross_pairing = rule;
        self
    }

    /// number of shards that the pair loops are split into
    pub fn n_shards(mut self, n_shards: NonZeroU32) -> Self {
        self.n_shards = n_shards;
        self
    }

    /// When `true`, catalogs with fewer than 2 points are rejected rather
    /// than producing an `inf`/`NaN` normalization
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(&self) -> Result<CorrelationDriver, Error> {
        let box_size = self.box_size.ok_or(Error::missing_parameter("box_size"))?;
        let bin_size = self.bin_size.ok_or(Error::missing_parameter("bin_size"))?;
        let n_random = self.n_random.ok_or(Error::missing_parameter("n_random"))?;

        if !(box_size.is_finite() && box_size > 0.0) {
            return Err(Error::bin_spec("box_size", "must be positive and finite"));
        }
        if self.cross_pairing == PairingRule::Unique {
            return Err(Error::bin_spec(
                "the cross pairing",
                "unique pairing only applies to a single catalog",
            ));
        }
        if self.strict && n_random < 2 {
            return Err(Error::insufficient_data("random", n_random));
        }

        let histogrammer = PairHistogrammer::new(bin_size)?
            .cross_pairing(self.cross_pairing)
            .keep_separations(false);
        Ok(CorrelationDriver {
            box_size,
            n_random,
            histogrammer,
            executor: SerialExecutor::new(self.n_shards),
            strict: self.strict,
        })
    }
}

/// Computes RR, DD & DR pair counts for a data catalog.
#[derive(Clone, Debug)]
pub struct CorrelationDriver {
    box_size: f64,
    n_random: usize,
    histogrammer: PairHistogrammer,
    executor: SerialExecutor,
    strict: bool,
}

impl CorrelationDriver {
    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    pub fn n_random(&self) -> usize {
        self.n_random
    }

    pub fn bin_size(&self) -> f64 {
        self.histogrammer.bin_size()
    }

    /// Generate a random catalog of [`CorrelationDriver::n_random`] points
    /// that are uniformly distributed in the box
    pub fn random_catalog(&self, rng: &mut impl Rng) -> Result<PointSet, Error> {
        distros::uniform_box(self.box_size, self.n_random, rng)
    }

    fn normalization(&self, n_random: usize, n_data: usize) -> Result<f64, Error> {
        if self.strict {
            inv_nest_checked(n_random, n_data)
        } else {
            if n_data < 2 || n_random < 2 {
                warn!(
                    "computing inv_nest with {n_data} data point(s) and {n_random} random \
                    point(s) produces a non-finite normalization"
                );
            }
            Ok(inv_nest(n_random, n_data))
        }
    }

    /// Compute the pair counts of `data` against a freshly generated random
    /// catalog
    pub fn pair_counts(&self, data: &PointSet, rng: &mut impl Rng) -> Result<PairCounts, Error> {
        let random = self.random_catalog(rng)?;
        self.pair_counts_with_random(data, &random)
    }

    /// Compute the pair counts of `data` against a caller-provided `random`
    /// catalog
    pub fn pair_counts_with_random(
        &self,
        data: &PointSet,
        random: &PointSet,
    ) -> Result<PairCounts, Error> {
        let inv_nest = self.normalization(random.len(), data.len())?;
        debug!(
            "pair counts: {} data points, {} random points, box_size = {}",
            data.len(),
            random.len(),
            self.box_size
        );

        let mut exec = self.executor;
        let hist = &self.histogrammer;
        let rr = hist.distances(random, self.box_size, &mut exec)?;
        let dd = hist.distances(data, self.box_size, &mut exec)?;
        let dr = hist.cross_distances(data, self.box_size, random, self.box_size, &mut exec)?;
        PairCounts::from_histograms(rr, dd, dr, inv_nest)
    }

    /// Compute the pair counts of `data` from x & y coordinate differences,
    /// against a freshly generated random catalog
    pub fn axis_pair_counts(
        &self,
        data: &PointSet,
        rng: &mut impl Rng,
    ) -> Result<AxisPairCounts, Error> {
        let random = self.random_catalog(rng)?;
        self.axis_pair_counts_with_random(data, &random)
    }

    /// Compute the pair counts of `data` from x & y coordinate differences,
    /// against a caller-provided `random` catalog
    pub fn axis_pair_counts_with_random(
        &self,
        data: &PointSet,
        random: &PointSet,
    ) -> Result<AxisPairCounts, Error> {
        let inv_nest = self.normalization(random.len(), data.len())?;
        debug!(
            "axis pair counts: {} data points, {} random points, box_size = {}",
            data.len(),
            random.len(),
            self.box_size
        );

        let mut exec = self.executor;
        let x = self.single_axis_counts(PlaneAxis::X, data, random, inv_nest, &mut exec)?;
        let y = self.single_axis_counts(PlaneAxis::Y, data, random, inv_nest, &mut exec)?;
        Ok(AxisPairCounts { x, y })
    }

    fn single_axis_counts(
        &self,
        axis: PlaneAxis,
        data: &PointSet,
        random: &PointSet,
        inv_nest: f64,
        exec: &mut SerialExecutor,
    ) -> Result<PairCounts, Error> {
        let (data, random) = (data.coords(axis), random.coords(axis));
        let hist = &self.histogrammer;
        let rr = hist.axis_differences(random, self.box_size, exec)?;
        let dd = hist.axis_differences(data, self.box_size, exec)?;
        let dr = hist.cross_axis_differences(data, self.box_size, random, self.box_size, exec)?;
        PairCounts::from_histograms(rr, dd, dr, inv_nest)
    }
}
