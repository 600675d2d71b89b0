//! Directed lines through two points.

use nalgebra::{Point2, Vector2};

use super::{Circle2, Side, VectorExt, PARALLEL_EPSILON};
use crate::error::{MeshError, Result};

/// A directed line through `a` towards `b`.
///
/// Depending on the operation the line is treated as infinite (side tests,
/// intersections) or as the segment `a..b` (overlap tests, parameters).
///
/// # Example
///
/// ```
/// use swingmesh::geometry::Line2;
/// use nalgebra::Point2;
///
/// let l1 = Line2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
/// let l2 = Line2::new(Point2::new(2.0, 0.0), Point2::new(-1.0, 3.0));
/// let p = l1.intersect_line(&l2).unwrap();
/// assert!((p - Point2::new(1.0, 1.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    /// Start point.
    pub a: Point2<f64>,
    /// End point.
    pub b: Point2<f64>,
}

impl Line2 {
    /// Creates a line from `a` to `b`.
    #[inline]
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self { a, b }
    }

    /// Creates a line from the origin to `b`.
    #[inline]
    pub fn from_origin(b: Point2<f64>) -> Self {
        Self::new(Point2::origin(), b)
    }

    /// Creates a line through `a` along `direction`.
    #[inline]
    pub fn from_point_direction(a: Point2<f64>, direction: Vector2<f64>) -> Self {
        Self::new(a, a + direction)
    }

    /// The vector from `a` to `b`.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.b - self.a
    }

    /// Distance between the endpoints.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Polar angle of the direction.
    pub fn angle(&self) -> Result<f64> {
        self.direction().polar_angle()
    }

    /// The midpoint of `a` and `b`.
    #[inline]
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.a, &self.b)
    }

    /// The point `a + t * (b - a)`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        self.a + self.direction() * t
    }

    /// Parameter of the orthogonal projection of `p` onto the line.
    ///
    /// Returns 0 for a zero-length line.
    pub fn parameter_of(&self, p: &Point2<f64>) -> f64 {
        let d = self.direction();
        let len_sq = d.norm_squared();
        if len_sq == 0.0 {
            return 0.0;
        }
        (p - self.a).dot(&d) / len_sq
    }

    /// The same line shifted by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vector2<f64>) -> Self {
        Self::new(self.a + offset, self.b + offset)
    }

    /// Which side of the line `p` is on.
    ///
    /// Left when `(p - a) x (b - a) > 0`, right otherwise. There is no
    /// tolerance band: points exactly on the line are reported as right.
    #[inline]
    pub fn side(&self, p: &Point2<f64>) -> Side {
        if (p - self.a).perp_dot(&self.direction()) > 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Like [`Line2::side`] but `None` when `p` is exactly on the line.
    pub fn strict_side(&self, p: &Point2<f64>) -> Option<Side> {
        let c = (p - self.a).perp_dot(&self.direction());
        if c > 0.0 {
            Some(Side::Left)
        } else if c < 0.0 {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// The perpendicular bisector: through the midpoint, turned a quarter
    /// turn from this line's direction.
    pub fn bisector(&self) -> Result<Line2> {
        let d = self.direction();
        let len = d.norm();
        if len == 0.0 {
            return Err(MeshError::DegenerateLine);
        }
        Ok(Line2::from_point_direction(self.midpoint(), (d / len).rot90()))
    }

    /// Intersection point of the two infinite lines.
    ///
    /// Fails with [`MeshError::ParallelLines`] when the lines are parallel
    /// within a relative tolerance, or when either has zero length.
    pub fn intersect_line(&self, other: &Line2) -> Result<Point2<f64>> {
        let (s, _) = self.crossing_parameters(other)?;
        Ok(self.point_at(s))
    }

    /// Crossing point of the two segments, with the parameter along each,
    /// when the crossing is strictly inside both segments.
    pub fn segment_intersection(&self, other: &Line2) -> Option<(Point2<f64>, f64, f64)> {
        let (s, u) = self.crossing_parameters(other).ok()?;
        if s > 0.0 && s < 1.0 && u > 0.0 && u < 1.0 {
            Some((self.point_at(s), s, u))
        } else {
            None
        }
    }

    /// Whether the two segments cross: each one's endpoints lie on
    /// different sides of the other.
    pub fn overlaps(&self, other: &Line2) -> bool {
        self.side(&other.a) != self.side(&other.b) && other.side(&self.a) != other.side(&self.b)
    }

    fn crossing_parameters(&self, other: &Line2) -> Result<(f64, f64)> {
        let r = self.direction();
        let q = other.direction();
        let denom = r.perp(&q);
        if denom.abs() <= PARALLEL_EPSILON * r.norm() * q.norm() {
            return Err(MeshError::ParallelLines);
        }
        let ac = other.a - self.a;
        Ok((ac.perp(&q) / denom, ac.perp(&r) / denom))
    }

    /// Intersection points of the infinite line with a circle.
    ///
    /// Returns no points when the line misses, one when it is tangent
    /// (discriminant within tolerance of zero) and two otherwise.
    pub fn intersect_circle(&self, circle: &Circle2) -> Result<Vec<Point2<f64>>> {
        let d = self.direction();
        let f = self.a - circle.center;

        let qa = d.norm_squared();
        if qa == 0.0 {
            return Err(MeshError::DegenerateLine);
        }
        let qb = 2.0 * f.dot(&d);
        let qc = f.norm_squared() - circle.radius * circle.radius;

        let discriminant = qb * qb - 4.0 * qa * qc;
        let scale = (qb * qb).max((4.0 * qa * qc).abs());
        if discriminant.abs() <= PARALLEL_EPSILON * scale {
            return Ok(vec![self.point_at(-qb / (2.0 * qa))]);
        }
        if discriminant < 0.0 {
            return Ok(Vec::new());
        }

        let root = discriminant.sqrt();
        Ok(vec![
            self.point_at((-qb - root) / (2.0 * qa)),
            self.point_at((-qb + root) / (2.0 * qa)),
        ])
    }

    /// Signed "outwardness" of `p` relative to this segment.
    ///
    /// The radius of the circle through `a`, `b` and `p`, negated when `p`
    /// and the circle's center are on different sides of the line. On a
    /// fixed side it grows monotonically with the distance of `p` from the
    /// line, so the smallest bulge picks the Delaunay neighbour.
    pub fn bulge(&self, p: &Point2<f64>) -> Result<f64> {
        let circle = Circle2::circumcircle(&self.a, &self.b, p)?;
        Ok(circle.radius * self.side(p).sign() * self.side(&circle.center).sign())
    }
}
