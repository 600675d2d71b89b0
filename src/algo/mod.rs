//! Algorithms that run over a whole mesh.
//!
//! - **Physics**: spring relaxation of free vertices under gravity
//!
//! Structural edits (removal, cutting, repair) are methods on
//! [`crate::mesh::Mesh`] since they work on the rings directly.

pub mod physics;

pub use physics::{step, PhysicsOptions};
