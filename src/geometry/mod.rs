//! Planar geometry primitives.
//!
//! Positions are [`nalgebra::Point2<f64>`] and displacements are
//! [`nalgebra::Vector2<f64>`]. On top of those this module provides:
//!
//! - [`VectorExt`]: polar angle, 2D perp-dot product and quarter turn
//! - [`Side`]: which side of a directed line a point falls on
//! - [`Line2`]: directed lines through two points, with side tests,
//!   intersections, bisectors and the Delaunay *bulge* measure
//! - [`Circle2`]: circles and circumcircles
//! - [`convex_hull`]: gift-wrapping hull used to seed mesh construction
//!
//! All fallible operations return [`crate::Result`] rather than NaN.
//!
//! # Example
//!
//! ```
//! use swingmesh::geometry::{Line2, Side};
//! use nalgebra::Point2;
//!
//! let line = Line2::from_origin(Point2::new(0.0, 1.0));
//! assert_eq!(line.side(&Point2::new(1.0, 1.0)), Side::Right);
//! assert_eq!(line.side(&Point2::new(-1.0, 1.0)), Side::Left);
//! ```

mod circle2;
mod hull;
mod line2;

pub use circle2::Circle2;
pub use hull::convex_hull;
pub use line2::Line2;

use std::f64::consts::TAU;

use nalgebra::Vector2;

use crate::error::{MeshError, Result};

/// Relative tolerance below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// Tolerance used when comparing polar angles.
pub const ANGLE_EPSILON: f64 = 1e-12;

/// The side of a directed line a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Positive cross product `(p - a) x (b - a)`.
    Left,
    /// Everything else, including points exactly on the line.
    Right,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Numeric sign of the side: `-1` for left, `+1` for right.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Planar helpers on [`Vector2<f64>`].
pub trait VectorExt {
    /// Polar angle in `(-pi, pi]`.
    ///
    /// Fails with [`MeshError::UndefinedAngle`] for the zero vector.
    fn polar_angle(&self) -> Result<f64>;

    /// Cross product `self . rot90(other)`.
    fn perp_dot(&self, other: &Self) -> f64;

    /// The vector rotated a quarter turn: `(x, y) -> (-y, x)`.
    fn rot90(&self) -> Self;
}

impl VectorExt for Vector2<f64> {
    fn polar_angle(&self) -> Result<f64> {
        if self.x == 0.0 && self.y == 0.0 {
            return Err(MeshError::UndefinedAngle);
        }
        Ok(self.y.atan2(self.x))
    }

    #[inline]
    fn perp_dot(&self, other: &Self) -> f64 {
        self.dot(&other.rot90())
    }

    #[inline]
    fn rot90(&self) -> Self {
        Vector2::new(-self.y, self.x)
    }
}

/// Wrap an angle into `[0, 2pi)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
