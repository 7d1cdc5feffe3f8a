//! Estimators of the two-point correlation function, ξ(r).
//!
//! Each estimator combines the data-data (DD), random-random (RR) and
//! data-random (DR) pair counts of a single bin (and the catalog
//! normalization factor, `inv_nest`) into one value. Bins are treated
//! independently.
//!
//! Division by an empty bin is *not* treated as an error: it follows
//! IEEE-754 semantics and produces `inf` or `NaN` for that bin. Use
//! [`Estimator::evaluate_checked`] to reject such bins instead.

use std::str::FromStr;

use crate::{Error, PairCounts};

fn check_lengths(lengths: &[usize]) {
    assert!(
        lengths.windows(2).all(|w| w[0] == w[1]),
        "the pair-count sequences must all have the same length (got {lengths:?})"
    );
}

/// Peebles-Hauser: `ξ = DD·inv_nest² / RR − 1`
///
/// # Panics
/// Panics if `rr` & `dd` have different lengths.
pub fn peebles_hauser(rr: &[u64], dd: &[u64], inv_nest: f64) -> Vec<f64> {
    check_lengths(&[rr.len(), dd.len()]);
    let norm = inv_nest.powi(2);
    rr.iter()
        .zip(dd)
        .map(|(&rr, &dd)| (dd as f64) * norm / (rr as f64) - 1.0)
        .collect()
}

/// Davis-Peebles: `ξ = inv_nest·DD / DR − 1`
///
/// # Panics
/// Panics if `dd` & `dr` have different lengths.
pub fn davis_peebles(dd: &[u64], dr: &[u64], inv_nest: f64) -> Vec<f64> {
    check_lengths(&[dd.len(), dr.len()]);
    dd.iter()
        .zip(dr)
        .map(|(&dd, &dr)| inv_nest * (dd as f64) / (dr as f64) - 1.0)
        .collect()
}

/// Hamilton: `ξ = RR·DD / DR²`
///
/// # Panics
/// Panics if `dd`, `rr` & `dr` don't share a common length.
pub fn hamilton(dd: &[u64], rr: &[u64], dr: &[u64]) -> Vec<f64> {
    check_lengths(&[dd.len(), rr.len(), dr.len()]);
    dd.iter()
        .zip(rr)
        .zip(dr)
        .map(|((&dd, &rr), &dr)| (rr as f64) * (dd as f64) / (dr as f64).powi(2))
        .collect()
}

/// Landy-Szalay: `ξ = inv_nest²·DD/RR + 1 − 2·inv_nest·DR/RR`
///
/// # Panics
/// Panics if `dd`, `rr` & `dr` don't share a common length.
pub fn landy_szalay(dd: &[u64], rr: &[u64], dr: &[u64], inv_nest: f64) -> Vec<f64> {
    check_lengths(&[dd.len(), rr.len(), dr.len()]);
    let norm = inv_nest.powi(2);
    dd.iter()
        .zip(rr)
        .zip(dr)
        .map(|((&dd, &rr), &dr)| {
            let (dd, rr, dr) = (dd as f64, rr as f64, dr as f64);
            norm * dd / rr + 1.0 - 2.0 * inv_nest * dr / rr
        })
        .collect()
}

/// Names one of the supported estimators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Estimator {
    PeeblesHauser,
    DavisPeebles,
    Hamilton,
    LandySzalay,
}

impl Estimator {
    pub const ALL: [Estimator; 4] = [
        Estimator::PeeblesHauser,
        Estimator::DavisPeebles,
        Estimator::Hamilton,
        Estimator::LandySzalay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Estimator::PeeblesHauser => "peebles_hauser",
            Estimator::DavisPeebles => "davis_peebles",
            Estimator::Hamilton => "hamilton",
            Estimator::LandySzalay => "landy_szalay",
        }
    }

    /// Look up an estimator by its name (see [`Estimator::name`])
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|est| est.name() == name)
            .ok_or_else(|| {
                let choices = Self::ALL.iter().map(|est| est.name().to_owned()).collect();
                Error::estimator_name(name.to_owned(), choices)
            })
    }

    /// Evaluate the estimator for every bin of `counts`. Empty denominator
    /// bins produce `inf` or `NaN`.
    pub fn evaluate(self, counts: &PairCounts) -> Vec<f64> {
        let (rr, dd, dr) = (counts.rr(), counts.dd(), counts.dr());
        let inv_nest = counts.inv_nest();
        match self {
            Estimator::PeeblesHauser => peebles_hauser(rr, dd, inv_nest),
            Estimator::DavisPeebles => davis_peebles(dd, dr, inv_nest),
            Estimator::Hamilton => hamilton(dd, rr, dr),
            Estimator::LandySzalay => landy_szalay(dd, rr, dr, inv_nest),
        }
    }

    /// Like [`Estimator::evaluate`], but fails if any denominator bin holds
    /// no pairs
    pub fn evaluate_checked(self, counts: &PairCounts) -> Result<Vec<f64>, Error> {
        let (label, denominator) = match self {
            Estimator::PeeblesHauser | Estimator::LandySzalay => ("RR", counts.rr()),
            Estimator::DavisPeebles | Estimator::Hamilton => ("DR", counts.dr()),
        };
        if let Some(bin_index) = denominator.iter().position(|&count| count == 0) {
            Err(Error::degenerate_bin(self.name(), label, bin_index))
        } else {
            Ok(self.evaluate(counts))
        }
    }
}

impl FromStr for Estimator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl core::fmt::Display for Estimator {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
