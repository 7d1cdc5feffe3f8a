use ndarray::{Array2, ArrayView1, Axis};
use twopcf_nostd_internal::PlanarPoints;

use crate::Error;

/// Names a coordinate axis of the plane
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneAxis {
    X,
    Y,
}

impl PlaneAxis {
    fn index(self) -> usize {
        match self {
            PlaneAxis::X => 0,
            PlaneAxis::Y => 1,
        }
    }
}

/// An ordered collection of points in the plane.
///
/// The points are stored in a `(2, n_points)` array (x in row 0, y in row
/// 1). Point `i` is `(x[i], y[i])`; points have no identity beyond their
/// position in the sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    positions: Array2<f64>,
}

impl PointSet {
    /// Build a point set from separate x & y coordinate sequences that are
    /// paired by index.
    pub fn from_xy(x: Vec<f64>, y: Vec<f64>) -> Result<PointSet, Error> {
        let (n_x, n_y) = (x.len(), y.len());
        if n_x != n_y {
            return Err(Error::coordinate_length(n_x, n_y));
        }
        let mut buf = x;
        buf.extend(y);
        let positions = Array2::from_shape_vec((2, n_x), buf)
            .map_err(|_| Error::coordinate_length(n_x, n_y))?;
        Ok(PointSet { positions })
    }

    /// Build a point set from a list of `[x, y]` pairs
    pub fn from_points(points: &[[f64; 2]]) -> PointSet {
        let mut positions = Array2::zeros((2, points.len()));
        for (i, [x, y]) in points.iter().enumerate() {
            positions[[0, i]] = *x;
            positions[[1, i]] = *y;
        }
        PointSet { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len_of(Axis(1))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.coords(PlaneAxis::X)
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.coords(PlaneAxis::Y)
    }

    /// The coordinates of every point along `axis`
    pub fn coords(&self, axis: PlaneAxis) -> ArrayView1<'_, f64> {
        self.positions.index_axis(Axis(0), axis.index())
    }

    /// The `i`th point
    pub fn point(&self, i: usize) -> [f64; 2] {
        [self.positions[[0, i]], self.positions[[1, i]]]
    }

    pub fn iter(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        (0..self.len()).map(|i| self.point(i))
    }

    /// Get the view consumed by the pair-counting machinery
    pub fn planar_view(&self) -> PlanarPoints<'_> {
        PlanarPoints::new(self.positions.view()).expect(
            "There must be a bug: a PointSet is constructed with exactly 2 \
            components",
        )
    }
}
