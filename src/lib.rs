//! # Swingmesh
//!
//! Planar Delaunay meshes that can be torn apart and relaxed.
//!
//! Swingmesh builds a Delaunay triangulation from scattered points and keeps
//! it as a corner-ring structure: every vertex can walk the triangles around
//! it, across the mesh boundary and across cuts. On top of that structure it
//! offers local edits and a spring physics step.
//!
//! ## Features
//!
//! - **Delaunay construction**: hull-seeded advancing front with
//!   smallest-bulge apex selection
//! - **Corner rings**: boundary-aware swing links with generational handles
//! - **Edits**: triangle and edge removal, edge cutting along drag gestures,
//!   automatic splitting of non-manifold vertices
//! - **Physics**: seeded spring relaxation with pinned and free vertices
//!
//! ## Quick Start
//!
//! ```
//! use swingmesh::prelude::*;
//! use nalgebra::Point2;
//!
//! let points = [
//!     (Point2::new(0.0, 0.0), Physics::Pinned),
//!     (Point2::new(4.0, 0.0), Physics::Pinned),
//!     (Point2::new(4.0, 3.0), Physics::Free),
//!     (Point2::new(0.0, 3.2), Physics::Free),
//!     (Point2::new(1.7, 1.4), Physics::Free),
//! ];
//! let mut mesh = Mesh::build(&points).unwrap();
//! assert_eq!(mesh.num_triangles(), 4);
//!
//! // Drag a cut across the mesh, then let it settle
//! let motion = Line2::new(Point2::new(-1.0, 2.0), Point2::new(5.0, 2.1));
//! mesh.cut_along(&motion).unwrap();
//! mesh.stop_cutting();
//! mesh.physics(30.0).unwrap();
//! assert!(mesh.validate().is_ok());
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use swingmesh::prelude::*;
//! use nalgebra::Point2;
//!
//! # let points = [
//! #     (Point2::new(0.0, 0.0), Physics::Free),
//! #     (Point2::new(2.0, 0.0), Physics::Free),
//! #     (Point2::new(1.0, 2.0), Physics::Free),
//! #     (Point2::new(1.0, 0.6), Physics::Free),
//! # ];
//! # let mesh = Mesh::build(&points).unwrap();
//! let center = mesh.triangle_containing(&Point2::new(1.0, 0.5)).unwrap();
//! for v in mesh.triangle_vertices(center).unwrap() {
//!     // Corners around each vertex, following swing links
//!     let fan = mesh.ring(v).count();
//!     println!("vertex {} touches {} triangles", mesh.vertex(v).unwrap().id(), fan);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod mesh;

pub use algo::physics::PhysicsOptions;
pub use error::{MeshError, Result};
pub use mesh::{Mesh, MeshOptions, Physics};

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use swingmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::physics::PhysicsOptions;
    pub use crate::error::{MeshError, Result};
    pub use crate::geometry::{Circle2, Line2, Side, VectorExt};
    pub use crate::mesh::{
        CornerKey, Edge, Mesh, MeshOptions, Physics, Swing, TriangleKey, VertexId, VertexKey,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
