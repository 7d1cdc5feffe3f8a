use ndarray::ArrayView2;

/// A view of a collection of points in the plane.
///
/// We place the following constraints on the wrapped array:
/// - axis 0 is the slow axis and it corresponds to the coordinate component.
///   Index 0 holds x and index 1 holds y.
/// - axis 1 is the fast axis. The length along this axis coincides with the
///   number of points.
/// - In other words the shape of the array is `(2, n_points)`
#[derive(Clone, Debug)]
pub struct PlanarPoints<'a> {
    positions: ArrayView2<'a, f64>,
    n_points: usize,
}

impl<'a> PlanarPoints<'a> {
    /// create a new instance
    pub fn new(positions: ArrayView2<'a, f64>) -> Result<PlanarPoints<'a>, &'static str> {
        if positions.shape()[0] != 2 {
            Err("positions must hold exactly 2 components (x and y)")
        } else {
            Ok(Self {
                n_points: positions.shape()[1],
                positions,
            })
        }
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// calculate the squared norm of the displacement between point `i` of
    /// `self` and point `j` of `other`
    #[inline(always)]
    pub fn squared_separation(&self, other: &PlanarPoints, i: usize, j: usize) -> f64 {
        let dx = self.positions[[0, i]] - other.positions[[0, j]];
        let dy = self.positions[[1, i]] - other.positions[[1, j]];
        // NOTE: .powi can't be used in no_std crates
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_wrong_component_count() {
        let positions = [0.0; 6];
        assert!(PlanarPoints::new(ArrayView2::from_shape((3, 2), &positions).unwrap()).is_err());
        assert!(PlanarPoints::new(ArrayView2::from_shape((2, 3), &positions).unwrap()).is_ok());
    }

    #[test]
    fn squared_separation() {
        #[rustfmt::skip]
        let positions_a = [
            0.0, 1.0,
            0.0, 0.0,
        ];
        #[rustfmt::skip]
        let positions_b = [
            3.0, 2.0,
            4.0, 1.0,
        ];
        let a = PlanarPoints::new(ArrayView2::from_shape((2, 2), &positions_a).unwrap()).unwrap();
        let b = PlanarPoints::new(ArrayView2::from_shape((2, 2), &positions_b).unwrap()).unwrap();
        assert_eq!(a.squared_separation(&b, 0, 0), 25.0);
        assert_eq!(a.squared_separation(&b, 1, 1), 2.0);
        assert_eq!(a.squared_separation(&a, 0, 1), 1.0);
    }
}
