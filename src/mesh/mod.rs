//! Core mesh data structures and operations.
//!
//! # Overview
//!
//! The primary type is [`Mesh`], a planar triangle mesh in which every
//! vertex keeps a *ring* of its corners linked by swing links. Rings that
//! do not close geometrically (at the boundary, or along a cut) are closed
//! with a [`Swing::Boundary`] link, so every ring can be walked without
//! special cases.
//!
//! # Handle Types
//!
//! Mesh elements live in generational arenas:
//! - [`VertexKey`] - Identifies a vertex
//! - [`CornerKey`] - Identifies a corner
//! - [`TriangleKey`] - Identifies a triangle
//!
//! A handle to a removed element resolves to `None`, and edits given one
//! do nothing. [`Edge`] is a derived key for a vertex pair.
//!
//! # Construction
//!
//! ```
//! use swingmesh::mesh::{Mesh, Physics};
//! use nalgebra::Point2;
//!
//! let points = [
//!     (Point2::new(0.0, 0.0), Physics::Pinned),
//!     (Point2::new(1.0, 0.0), Physics::Free),
//!     (Point2::new(0.0, 1.0), Physics::Free),
//!     (Point2::new(1.0, 1.1), Physics::Free),
//! ];
//!
//! let mesh = Mesh::build(&points).unwrap();
//! assert_eq!(mesh.num_triangles(), 2);
//! assert_eq!(mesh.num_edges(), 5);
//! ```

mod builder;
mod edit;
mod index;
mod topology;
mod validate;

pub use builder::build_delaunay;
pub use index::{CornerKey, Edge, TriangleId, TriangleKey, VertexId, VertexKey};
pub use topology::{Corner, Mesh, MeshOptions, Physics, RingIter, Swing, Triangle, Vertex};
