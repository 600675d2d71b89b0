//! Error types for swingmesh.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during geometry and mesh operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Too few input points to form a triangle.
    #[error("at least 3 points are required to build a mesh, got {count}")]
    InsufficientPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// The angle of the zero vector was requested.
    #[error("the angle of the zero vector is undefined")]
    UndefinedAngle,

    /// Two lines are parallel (or one of them has no direction).
    #[error("lines are parallel or ill-defined")]
    ParallelLines,

    /// Three points are collinear, so no circle passes through them.
    #[error("points are collinear; no circumcircle exists")]
    CollinearPoints,

    /// A line was defined by two identical points.
    #[error("line has zero length")]
    DegenerateLine,

    /// Two input points share the same position.
    #[error("point {index} duplicates point {duplicate_of}")]
    DuplicatePoint {
        /// Index of the repeated point.
        index: usize,
        /// Index of the first point at that position.
        duplicate_of: usize,
    },

    /// The cutting line meets the edge's supporting line outside the edge.
    #[error("cutting line crosses the edge outside its endpoints (t = {t})")]
    CutOutsideEdge {
        /// Parameter of the crossing along the edge, 0 at the first endpoint.
        t: f64,
    },

    /// Delaunay construction produced more triangles than a planar
    /// triangulation of the input can hold.
    #[error("Delaunay construction did not terminate after {triangles} triangles")]
    ConstructionFailed {
        /// Number of triangles created before giving up.
        triangles: usize,
    },

    /// Invalid mesh state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
