//! Handle and id types for mesh elements.
//!
//! Vertices, corners and triangles live in generational arenas. Their
//! handles ([`VertexKey`], [`CornerKey`], [`TriangleKey`]) stay unique even
//! after the element is removed, so a stale handle simply resolves to
//! nothing. Vertices and triangles additionally carry a monotonically
//! increasing per-mesh id that is stable, ordered and cheap to display.

use std::fmt;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a vertex in a [`super::Mesh`].
    pub struct VertexKey;

    /// Handle to a corner (a vertex/triangle incidence) in a [`super::Mesh`].
    pub struct CornerKey;

    /// Handle to a triangle in a [`super::Mesh`].
    pub struct TriangleKey;
}

/// Per-mesh vertex id, assigned in creation order starting at 1.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(pub(crate) u64);

/// Per-mesh triangle id, assigned in creation order starting at 1.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TriangleId(pub(crate) u64);

macro_rules! impl_id_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// The raw id value.
            #[inline]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_id_type!(VertexId, "V");
impl_id_type!(TriangleId, "T");

/// An unordered pair of vertices.
///
/// Edges are not stored by the mesh; they are lookup keys derived from
/// triangles. The endpoints are kept ordered by [`VertexId`], so the same
/// pair always produces the same `Edge` regardless of argument order. Build
/// one with [`super::Mesh::edge`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Edge {
    pub(crate) a: VertexKey,
    pub(crate) b: VertexKey,
}

impl Edge {
    /// Endpoint with the smaller id.
    #[inline]
    pub fn a(&self) -> VertexKey {
        self.a
    }

    /// Endpoint with the larger id.
    #[inline]
    pub fn b(&self) -> VertexKey {
        self.b
    }

    /// Both endpoints, smaller id first.
    #[inline]
    pub fn vertices(&self) -> [VertexKey; 2] {
        [self.a, self.b]
    }

    /// Whether `v` is one of the endpoints.
    #[inline]
    pub fn contains(&self, v: VertexKey) -> bool {
        self.a == v || self.b == v
    }

    /// The endpoint that is not `v`, if `v` is an endpoint.
    pub fn other(&self, v: VertexKey) -> Option<VertexKey> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{:?}", VertexId(7)), "V(7)");
        assert_eq!(format!("{}", TriangleId(3)), "3");
        assert!(VertexId(1) < VertexId(2));
    }

    #[test]
    fn test_stale_key_resolves_to_nothing() {
        let mut arena: SlotMap<VertexKey, u32> = SlotMap::with_key();
        let k = arena.insert(1);
        arena.remove(k);
        let reused = arena.insert(2);
        assert_ne!(k, reused);
        assert!(arena.get(k).is_none());
    }

    #[test]
    fn test_edge_other() {
        let mut arena: SlotMap<VertexKey, ()> = SlotMap::with_key();
        let u = arena.insert(());
        let w = arena.insert(());
        let x = arena.insert(());
        let e = Edge { a: u, b: w };
        assert!(e.contains(w));
        assert_eq!(e.other(u), Some(w));
        assert_eq!(e.other(x), None);
        assert_eq!(e.vertices(), [u, w]);
    }
}
