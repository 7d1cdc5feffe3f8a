//! Internal machinery of the `twopcf` crate that doesn't need the standard
//! library: bin edges, pairing rules, point views, count packs and the
//! kernel that tallies pair separations into a histogram.
//!
//! Nothing in here computes a square root. The Euclidean norm (and anything
//! else that needs `std`) is supplied by the `twopcf` crate as a closure.
#![no_std]
mod bins;
mod pairing;
mod points;
mod state;
mod twopoint;

pub use bins::{BinEdges, RegularBinEdges};
pub use pairing::{PairingRule, shard_range};
pub use points::PlanarPoints;
pub use state::{CountPackView, CountPackViewMut, required_length};
pub use twopoint::TwoPointTally;
