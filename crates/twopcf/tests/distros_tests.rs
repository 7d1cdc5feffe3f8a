mod common;

use common::{assert_allclose, seeded_rng};
use twopcf::{PointSet, distros};

fn radii(points: &PointSet, x_0: f64, y_0: f64) -> Vec<f64> {
    points
        .iter()
        .map(|[x, y]| ((x - x_0).powi(2) + (y - y_0).powi(2)).sqrt())
        .collect()
}

fn fraction_below(values: &[f64], threshold: f64) -> f64 {
    (values.iter().filter(|&&v| v < threshold).count() as f64) / (values.len() as f64)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn square_grid_layout() {
        let grid = distros::square_grid(10.0, 1.0).unwrap();
        assert_eq!(grid.len(), 121);
        assert_eq!(grid.point(0), [0.0, 0.0]);
        assert_eq!(grid.point(1), [1.0, 0.0]);
        assert_eq!(grid.point(11), [0.0, 1.0]);
        assert_eq!(grid.point(120), [10.0, 10.0]);

        // the last coordinate, 9, lies below the box size
        let grid = distros::square_grid(10.0, 3.0).unwrap();
        assert_eq!(grid.len(), 16);
        assert!(grid.iter().all(|[x, y]| x <= 9.0 && y <= 9.0));
    }

    #[test]
    fn circle_points() {
        let points = distros::circle(0.0, 0.0, 1.0, 4).unwrap();
        let expected = [[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]];
        for (actual, expected) in points.iter().zip(expected) {
            assert_allclose(&actual, &expected, 0.0, 1e-12);
        }
        assert!(distros::circle(0.0, 0.0, 1.0, 0).unwrap().is_empty());
    }

    #[test]
    fn ring_bounds() {
        let mut rng = seeded_rng(3);
        let points = distros::ring(500, 2.0, 3.0, 5.0, 5.0, &mut rng).unwrap();
        assert_eq!(points.len(), 500);
        assert!(
            radii(&points, 5.0, 5.0)
                .iter()
                .all(|&r| (2.0 - 1e-12..=3.0 + 1e-12).contains(&r))
        );
    }

    #[test]
    fn uniform_box_bounds() {
        let mut rng = seeded_rng(4);
        let points = distros::uniform_box(7.5, 1000, &mut rng).unwrap();
        assert_eq!(points.len(), 1000);
        assert!(
            points
                .iter()
                .all(|[x, y]| (0.0..7.5).contains(&x) && (0.0..7.5).contains(&y))
        );
    }

    #[test]
    fn circles_fit_inside_box() {
        let mut rng = seeded_rng(6);
        let inside = |points: &PointSet| {
            points.iter().all(|[x, y]| {
                (-1e-9..=10.0 + 1e-9).contains(&x) && (-1e-9..=10.0 + 1e-9).contains(&y)
            })
        };

        let points = distros::random_circles(10.0, 5, 20, &mut rng).unwrap();
        assert_eq!(points.len(), 100);
        assert!(inside(&points));

        let points = distros::uniform_circles(10.0, 4, 12, 2.5, &mut rng).unwrap();
        assert_eq!(points.len(), 48);
        assert!(inside(&points));
        // each ring shares the common radius
        for ring in 0..4 {
            let offset = ring * 12;
            let [x_first, y_first] = points.point(offset);
            let [x_opposite, y_opposite] = points.point(offset + 6);
            let (x_0, y_0) = ((x_first + x_opposite) / 2.0, (y_first + y_opposite) / 2.0);
            let r = radii(&points, x_0, y_0)[offset..offset + 12].to_vec();
            assert_allclose(&r, &[2.5; 12], 0.0, 1e-9);
        }
    }

    #[test]
    fn disc_versus_uniform_disc() {
        let mut rng = seeded_rng(2525365464);
        let disc = distros::disc(4000, 1.0, 0.0, 0.0, &mut rng).unwrap();
        let uniform = distros::uniform_disc(4000, 1.0, 0.0, 0.0, &mut rng).unwrap();

        let disc_radii = radii(&disc, 0.0, 0.0);
        let uniform_radii = radii(&uniform, 0.0, 0.0);
        assert!(disc_radii.iter().all(|&r| r < 1.0 + 1e-12));
        assert!(uniform_radii.iter().all(|&r| r < 1.0 + 1e-12));

        // half of the disc points lie within r/2, compared to a quarter of
        // the area-uniform points
        assert!((fraction_below(&disc_radii, 0.5) - 0.5).abs() < 0.05);
        assert!((fraction_below(&uniform_radii, 0.5) - 0.25).abs() < 0.05);
    }

    #[test]
    fn seeded_generators_repeat() {
        let first = distros::ring(50, 1.0, 2.0, 0.0, 0.0, &mut seeded_rng(10)).unwrap();
        let second = distros::ring(50, 1.0, 2.0, 0.0, 0.0, &mut seeded_rng(10)).unwrap();
        assert_eq!(first, second);

        let third = distros::ring(50, 1.0, 2.0, 0.0, 0.0, &mut seeded_rng(11)).unwrap();
        assert_ne!(first, third);
    }

    #[test]
    fn invalid_parameters() {
        let mut rng = seeded_rng(0);
        assert!(distros::square_grid(10.0, 0.0).is_err());
        assert!(distros::square_grid(-1.0, 1.0).is_err());
        assert!(distros::square_grid(1e9, 1.0).is_err());
        assert!(distros::disc(10, -1.0, 0.0, 0.0, &mut rng).is_err());
        assert!(distros::uniform_disc(10, 1.0, f64::NAN, 0.0, &mut rng).is_err());
        assert!(distros::ring(10, 3.0, 2.0, 0.0, 0.0, &mut rng).is_err());
        assert!(distros::ring(10, -1.0, 2.0, 0.0, 0.0, &mut rng).is_err());
        assert!(distros::uniform_box(0.0, 10, &mut rng).is_err());
        assert!(distros::random_circles(f64::INFINITY, 2, 2, &mut rng).is_err());
        assert!(distros::uniform_circles(10.0, 2, 2, 6.0, &mut rng).is_err());
        assert!(distros::random_circles(10.0, 0, 5, &mut rng).is_err());
        assert!(distros::uniform_circles(10.0, 0, 5, 1.0, &mut rng).is_err());
        assert!(distros::circle(f64::NAN, 0.0, 1.0, 8).is_err());
        assert!(distros::circle(0.0, f64::INFINITY, 1.0, 8).is_err());
        assert!(distros::circle(0.0, 0.0, -1.0, 8).is_err());
        assert!(distros::circle(0.0, 0.0, f64::NAN, 8).is_err());
    }
}
