/*!
Provides routines for computing the two-point correlation function of 2D
point distributions.

# High-Level: the Two-Point Correlation Function

The [two-point correlation function](https://en.wikipedia.org/wiki/Correlation_function_(astronomy)),
ξ(r), quantifies the excess (or deficit) of pairs of points separated by a
distance r, relative to an unclustered (Poisson) distribution of points.

The calculation consists of:
1. generating a random catalog that is uniformly distributed over the same
   box as the data catalog
2. histogramming the separations of every pair of random points (RR), of
   every pair of data points (DD) and of data-random pairs (DR)
3. combining the histograms, bin by bin, with one of the classical
   estimators (Peebles-Hauser, Davis-Peebles, Hamilton, Landy-Szalay)

The pair loops are brute-force: every pair is visited.

# User Guide

```
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use twopcf::{CorrelationBuilder, Estimator, distros};

let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
let data = distros::ring(300, 2.0, 3.0, 5.0, 5.0, &mut rng)?;

let driver = CorrelationBuilder::new()
    .box_size(10.0)
    .bin_size(0.5)
    .n_random(300)
    .build()?;
let counts = driver.pair_counts(&data, &mut rng)?;
let xi = counts.estimate(Estimator::LandySzalay);
assert_eq!(xi.len(), counts.left_edges().len());
# Ok::<(), twopcf::Error>(())
```

Lower-level histogram builders ([`distance_histogram`],
[`cross_distance_histogram`], [`axis_histogram`], [`cross_axis_histogram`])
and estimator functions ([`peebles_hauser`], [`davis_peebles`], [`hamilton`],
[`landy_szalay`]) are also exposed.

# Developer Guide

The machinery that doesn't depend on the standard library (bin edges,
pairing rules, count packs) lives in `twopcf_nostd_internal`.

*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod driver;
pub mod distros;
mod error;
mod estimators;
mod histogram;
mod parallel_serial;
mod points;

// pull in symbols that visible outside of the package
pub use driver::{
    AxisPairCounts, CorrelationBuilder, CorrelationDriver, PairCounts, inv_nest, inv_nest_checked,
};
pub use error::Error;
pub use estimators::{Estimator, davis_peebles, hamilton, landy_szalay, peebles_hauser};
pub use histogram::{
    PairHistogram, PairHistogrammer, axis_histogram, cross_axis_histogram,
    cross_distance_histogram, distance_histogram,
};
pub use parallel_serial::{Executor, SerialExecutor};
pub use points::{PlaneAxis, PointSet};
pub use twopcf_nostd_internal::{BinEdges, PairingRule, RegularBinEdges};
