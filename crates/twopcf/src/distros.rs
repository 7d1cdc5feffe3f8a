//! Generators of synthetic point distributions that are useful for
//! experimenting with the correlation function.
//!
//! Every generator that involves randomness accepts the random number
//! generator as an argument. There is no global random state: seeding the
//! generator (e.g. with `rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64`)
//! makes the output reproducible.
//!
//! Each random draw, `u`, is uniform in `[0, 1)`.

use rand::Rng;
use std::f64::consts::PI;

use crate::{Error, PointSet};

fn check_positive(generator: &'static str, value: f64, what: &'static str) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::generator_parameter(generator, what))
    }
}

fn check_n_rings(generator: &'static str, n_rings: usize) -> Result<(), Error> {
    if n_rings == 0 {
        Err(Error::generator_parameter(generator, "requires at least 1 ring"))
    } else {
        Ok(())
    }
}

fn check_center(generator: &'static str, x_0: f64, y_0: f64) -> Result<(), Error> {
    if x_0.is_finite() && y_0.is_finite() {
        Ok(())
    } else {
        Err(Error::generator_parameter(generator, "requires a finite center"))
    }
}

/// Accumulates coordinates before they get packed into a [`PointSet`]
struct PointBuf {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PointBuf {
    fn with_capacity(n_points: usize) -> Self {
        Self {
            x: Vec::with_capacity(n_points),
            y: Vec::with_capacity(n_points),
        }
    }

    fn push_polar(&mut self, x_0: f64, y_0: f64, r: f64, theta: f64) {
        self.x.push(x_0 + r * theta.cos());
        self.y.push(y_0 + r * theta.sin());
    }

    fn finish(self) -> Result<PointSet, Error> {
        PointSet::from_xy(self.x, self.y)
    }
}

/// Points on a square lattice with the given spacing.
///
/// Coordinates take the values `k * spacing` for `k = 0, 1, ...` up to and
/// including `floor(box_size / spacing)`. Points are ordered row by row
/// (x varies fastest).
pub fn square_grid(box_size: f64, spacing: f64) -> Result<PointSet, Error> {
    check_positive("square_grid", box_size, "requires a positive, finite box_size")?;
    check_positive("square_grid", spacing, "requires a positive, finite spacing")?;
    let ratio = box_size / spacing;
    if ratio > 1.0e6 {
        return Err(Error::generator_parameter(
            "square_grid",
            "would produce more than 1e6 points per side",
        ));
    }
    let n_side = (ratio.floor() as usize) + 1;

    let mut buf = PointBuf::with_capacity(n_side * n_side);
    for j in 0..n_side {
        let y = (j as f64) * spacing;
        for i in 0..n_side {
            buf.x.push((i as f64) * spacing);
            buf.y.push(y);
        }
    }
    buf.finish()
}

/// Points on a disc, with a radius drawn uniformly from `[0, radius)`.
///
/// This is *not* uniform in area: the density increases toward the center.
pub fn disc(
    n_points: usize,
    radius: f64,
    x_0: f64,
    y_0: f64,
    rng: &mut impl Rng,
) -> Result<PointSet, Error> {
    check_positive("disc", radius, "requires a positive, finite radius")?;
    check_center("disc", x_0, y_0)?;

    let mut buf = PointBuf::with_capacity(n_points);
    for _ in 0..n_points {
        let theta = 2.0 * PI * rng.random::<f64>();
        let r = radius * rng.random::<f64>();
        buf.push_polar(x_0, y_0, r, theta);
    }
    buf.finish()
}

/// Points distributed uniformly (in area) over a disc.
pub fn uniform_disc(
    n_points: usize,
    radius: f64,
    x_0: f64,
    y_0: f64,
    rng: &mut impl Rng,
) -> Result<PointSet, Error> {
    check_positive("uniform_disc", radius, "requires a positive, finite radius")?;
    check_center("uniform_disc", x_0, y_0)?;

    let mut buf = PointBuf::with_capacity(n_points);
    for _ in 0..n_points {
        let theta = 2.0 * PI * rng.random::<f64>();
        let r = radius * rng.random::<f64>().sqrt();
        buf.push_polar(x_0, y_0, r, theta);
    }
    buf.finish()
}

/// Points on an annulus, with a radius drawn uniformly from
/// `[r_int, r_ext)`.
pub fn ring(
    n_points: usize,
    r_int: f64,
    r_ext: f64,
    x_0: f64,
    y_0: f64,
    rng: &mut impl Rng,
) -> Result<PointSet, Error> {
    if !(r_int.is_finite() && r_int >= 0.0) {
        return Err(Error::generator_parameter(
            "ring",
            "requires a non-negative, finite inner radius",
        ));
    } else if !(r_ext.is_finite() && r_ext >= r_int) {
        return Err(Error::generator_parameter(
            "ring",
            "requires a finite outer radius no smaller than the inner radius",
        ));
    }
    check_center("ring", x_0, y_0)?;

    let mut buf = PointBuf::with_capacity(n_points);
    for _ in 0..n_points {
        let theta = 2.0 * PI * rng.random::<f64>();
        let r = r_int + (r_ext - r_int) * rng.random::<f64>();
        buf.push_polar(x_0, y_0, r, theta);
    }
    buf.finish()
}

/// `n_points` points evenly spaced (in angle) around a single circle,
/// starting at angle 0.
pub fn circle(x_0: f64, y_0: f64, radius: f64, n_points: usize) -> Result<PointSet, Error> {
    check_center("circle", x_0, y_0)?;
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(Error::generator_parameter(
            "circle",
            "requires a non-negative, finite radius",
        ));
    }
    let mut buf = PointBuf::with_capacity(n_points);
    push_circle(&mut buf, x_0, y_0, radius, n_points);
    buf.finish()
}

fn push_circle(buf: &mut PointBuf, x_0: f64, y_0: f64, radius: f64, n_points: usize) {
    let delta = 2.0 * PI / (n_points as f64);
    for i in 0..n_points {
        buf.push_polar(x_0, y_0, radius, (i as f64) * delta);
    }
}

/// `n_rings` (at least 1) circles with random radii (drawn from `[0, box_size / 2)`) and
/// random centers. Every circle lies entirely inside the box.
pub fn random_circles(
    box_size: f64,
    n_rings: usize,
    n_points_per_ring: usize,
    rng: &mut impl Rng,
) -> Result<PointSet, Error> {
    check_positive("random_circles", box_size, "requires a positive, finite box_size")?;
    check_n_rings("random_circles", n_rings)?;

    let mut buf = PointBuf::with_capacity(n_rings * n_points_per_ring);
    for _ in 0..n_rings {
        let radius = box_size * rng.random::<f64>() / 2.0;
        let x_0 = radius + (box_size - 2.0 * radius) * rng.random::<f64>();
        let y_0 = radius + (box_size - 2.0 * radius) * rng.random::<f64>();
        push_circle(&mut buf, x_0, y_0, radius, n_points_per_ring);
    }
    buf.finish()
}

/// `n_rings` (at least 1) circles sharing a common radius, with random centers. Every
/// circle lies entirely inside the box.
pub fn uniform_circles(
    box_size: f64,
    n_rings: usize,
    n_points_per_ring: usize,
    radius: f64,
    rng: &mut impl Rng,
) -> Result<PointSet, Error> {
    check_positive("uniform_circles", box_size, "requires a positive, finite box_size")?;
    check_n_rings("uniform_circles", n_rings)?;
    if !(radius.is_finite() && radius >= 0.0 && 2.0 * radius <= box_size) {
        return Err(Error::generator_parameter(
            "uniform_circles",
            "requires a non-negative radius that is no larger than half the box_size",
        ));
    }

    let mut buf = PointBuf::with_capacity(n_rings * n_points_per_ring);
    for _ in 0..n_rings {
        let x_0 = radius + (box_size - 2.0 * radius) * rng.random::<f64>();
        let y_0 = radius + (box_size - 2.0 * radius) * rng.random::<f64>();
        push_circle(&mut buf, x_0, y_0, radius, n_points_per_ring);
    }
    buf.finish()
}

/// Points uniformly distributed in the square `[0, box_size)²`.
///
/// This is the distribution of a random catalog.
pub fn uniform_box(box_size: f64, n_points: usize, rng: &mut impl Rng) -> Result<PointSet, Error> {
    check_positive("uniform_box", box_size, "requires a positive, finite box_size")?;

    let mut buf = PointBuf::with_capacity(n_points);
    for _ in 0..n_points {
        buf.x.push(box_size * rng.random::<f64>());
        buf.y.push(box_size * rng.random::<f64>());
    }
    buf.finish()
}
