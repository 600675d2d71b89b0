//! Circles and circumcircles.

use nalgebra::Point2;

use super::Line2;
use crate::error::{MeshError, Result};

/// A circle given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle2 {
    /// Center of the circle.
    pub center: Point2<f64>,
    /// Radius of the circle.
    pub radius: f64,
}

impl Circle2 {
    /// Creates a circle from center and radius.
    #[inline]
    pub fn new(center: Point2<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The circle through three points.
    ///
    /// The center is the intersection of the perpendicular bisectors of
    /// `(a, b)` and `(b, c)`. Fails with [`MeshError::CollinearPoints`] when
    /// those bisectors are parallel and with [`MeshError::DegenerateLine`]
    /// when two of the points coincide.
    ///
    /// # Example
    ///
    /// ```
    /// use swingmesh::geometry::Circle2;
    /// use nalgebra::Point2;
    ///
    /// let c = Circle2::circumcircle(
    ///     &Point2::new(1.0, 0.0),
    ///     &Point2::new(0.0, 2.0),
    ///     &Point2::new(0.0, 0.0),
    /// )
    /// .unwrap();
    /// assert!((c.center - Point2::new(0.5, 1.0)).norm() < 1e-12);
    /// ```
    pub fn circumcircle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Result<Self> {
        let first = Line2::new(*a, *b).bisector()?;
        let second = Line2::new(*b, *c).bisector()?;
        let center = first.intersect_line(&second).map_err(|err| match err {
            MeshError::ParallelLines => MeshError::CollinearPoints,
            other => other,
        })?;
        Ok(Self::new(center, (a - center).norm()))
    }

    /// Whether `p` is inside the circle by more than `tolerance`.
    #[inline]
    pub fn contains_strict(&self, p: &Point2<f64>, tolerance: f64) -> bool {
        (p - self.center).norm() < self.radius - tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circumcircle_right_triangle() {
        let c = Circle2::circumcircle(
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(0.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(c.center, Point2::new(0.5, 1.0), epsilon = 1e-12);
        assert_relative_eq!(c.radius, 1.25_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_circumcircle_passes_through_points() {
        let pts = [
            Point2::new(3.0, -1.0),
            Point2::new(7.5, 2.0),
            Point2::new(-2.0, 4.0),
        ];
        let c = Circle2::circumcircle(&pts[0], &pts[1], &pts[2]).unwrap();
        for p in &pts {
            assert_relative_eq!((p - c.center).norm(), c.radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_circumcircle_degenerate() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(2.0, 2.0);
        assert_eq!(Circle2::circumcircle(&a, &b, &c), Err(MeshError::CollinearPoints));
        assert_eq!(Circle2::circumcircle(&a, &a, &c), Err(MeshError::DegenerateLine));
    }

    #[test]
    fn test_contains_strict() {
        let c = Circle2::new(Point2::new(0.0, 0.0), 1.0);
        assert!(c.contains_strict(&Point2::new(0.5, 0.0), 1e-6));
        assert!(!c.contains_strict(&Point2::new(1.0, 0.0), 1e-6));
        assert!(!c.contains_strict(&Point2::new(2.0, 0.0), 1e-6));
    }
}
