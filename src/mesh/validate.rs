//! Consistency checks for the corner-ring structure.
//!
//! [`Mesh::validate`] is public so tests and callers can assert on a mesh.
//! Editing operations run it themselves in debug builds (or with the
//! `validate` feature) and panic on failure, since a broken ring means a
//! defect in the operation rather than a recoverable condition.

use std::collections::HashMap;

use super::index::{CornerKey, VertexKey};
use super::topology::{Mesh, Swing};
use crate::error::{MeshError, Result};

impl Mesh {
    /// Check that all connectivity is consistent.
    ///
    /// Verifies that:
    /// - every key stored in a record refers to a live record
    /// - every triangle's corners point back at it, at distinct vertices
    /// - swing links are reciprocal, stay on one vertex, and real links join
    ///   triangles that share an edge
    /// - each vertex's ring visits exactly its corners and closes
    /// - no ring has more than one boundary link (no bowtie vertices)
    pub fn validate(&self) -> Result<()> {
        let mut corner_counts: HashMap<VertexKey, usize> = HashMap::new();

        for (t, triangle) in self.triangles.iter() {
            for (slot, &c) in triangle.corners.iter().enumerate() {
                let corner = self
                    .corners
                    .get(c)
                    .ok_or_else(|| invalid(format!("triangle {} has a dead corner", triangle.id)))?;
                if corner.triangle != t || corner.slot != slot {
                    return Err(invalid(format!(
                        "corner in slot {} of triangle {} does not point back",
                        slot, triangle.id
                    )));
                }
            }
            let [v0, v1, v2] = triangle.corners.map(|c| self.corners[c].vertex);
            if v0 == v1 || v1 == v2 || v0 == v2 {
                return Err(invalid(format!("triangle {} repeats a vertex", triangle.id)));
            }
        }

        for (c, corner) in self.corners.iter() {
            if !self.triangles.contains_key(corner.triangle) {
                return Err(invalid("corner belongs to a dead triangle".to_string()));
            }
            if !self.vertices.contains_key(corner.vertex) {
                return Err(invalid("corner belongs to a dead vertex".to_string()));
            }
            *corner_counts.entry(corner.vertex).or_insert(0) += 1;

            self.check_link(c, corner.swing_next, true)?;
            self.check_link(c, corner.swing_prev, false)?;
        }

        for (v, vertex) in self.vertices.iter() {
            let expected = corner_counts.get(&v).copied().unwrap_or(0);
            if expected == 0 {
                return Err(invalid(format!("vertex {} has no corners", vertex.id)));
            }
            match self.corners.get(vertex.corner) {
                Some(corner) if corner.vertex == v => {}
                _ => {
                    return Err(invalid(format!(
                        "vertex {} has a foreign entry corner",
                        vertex.id
                    )))
                }
            }

            let mut visited = 0;
            let mut boundary_links = 0;
            let mut current = vertex.corner;
            loop {
                visited += 1;
                if visited > expected {
                    return Err(invalid(format!(
                        "ring of vertex {} does not close after {} corners",
                        vertex.id, expected
                    )));
                }
                let link = self.corners[current].swing_next;
                if link.is_boundary() {
                    boundary_links += 1;
                }
                current = link.corner();
                if current == vertex.corner {
                    break;
                }
            }
            if visited != expected {
                return Err(invalid(format!(
                    "ring of vertex {} visits {} of {} corners",
                    vertex.id, visited, expected
                )));
            }
            if boundary_links > 1 {
                return Err(MeshError::InvalidState(format!(
                    "vertex {} is non-manifold ({} boundary links)",
                    vertex.id, boundary_links
                )));
            }
        }

        Ok(())
    }

    fn check_link(&self, c: CornerKey, link: Swing, forward: bool) -> Result<()> {
        let target = link.corner();
        let other = self
            .corners
            .get(target)
            .ok_or_else(|| invalid("swing link to a dead corner".to_string()))?;
        if other.vertex != self.corners[c].vertex {
            return Err(invalid("swing link leaves its vertex".to_string()));
        }

        let back = if forward { other.swing_prev } else { other.swing_next };
        if back != link.retarget(c) {
            return Err(invalid("swing links are not reciprocal".to_string()));
        }

        if let Swing::Real(j) = link {
            let shared = if forward {
                self.corner_next_vertex(c) == self.corner_prev_vertex(j)
            } else {
                self.corner_prev_vertex(c) == self.corner_next_vertex(j)
            };
            if !shared || j == c {
                return Err(invalid("real swing link between non-adjacent triangles".to_string()));
            }
        }
        Ok(())
    }

    /// Run [`Mesh::validate`] after an edit when checks are compiled in.
    pub(crate) fn debug_validate(&self, operation: &str) {
        if cfg!(any(debug_assertions, feature = "validate")) {
            if let Err(err) = self.validate() {
                panic!("{operation} left the mesh inconsistent: {err}");
            }
        }
    }
}

fn invalid(details: String) -> MeshError {
    MeshError::InvalidState(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Physics;
    use nalgebra::Point2;

    fn square() -> Mesh {
        let points = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.1)]
            .map(|(x, y)| (Point2::new(x, y), Physics::Free));
        Mesh::build(&points).unwrap()
    }

    #[test]
    fn test_built_mesh_is_valid() {
        assert!(square().validate().is_ok());
    }

    #[test]
    fn test_detects_broken_reciprocity() {
        let mut mesh = square();
        let (c, other) = mesh
            .corners
            .keys()
            .find_map(|c| {
                let other = mesh.corners[c].swing_next.corner();
                (other != c).then_some((c, other))
            })
            .unwrap();
        mesh.corners[c].swing_next = Swing::Real(other);
        mesh.corners[c].swing_prev = Swing::Real(other);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_detects_vertex_without_corners() {
        let mut mesh = square();
        mesh.insert_vertex(Point2::new(5.0, 5.0), Physics::Free);
        assert!(matches!(mesh.validate(), Err(MeshError::InvalidState(_))));
    }

    #[test]
    fn test_detects_bowtie() {
        let mut mesh = square();
        // Turn every real link into a boundary link: vertices with two
        // corners now have two open fans.
        let keys: Vec<CornerKey> = mesh.corners.keys().collect();
        for c in keys {
            let next = mesh.corners[c].swing_next;
            mesh.corners[c].swing_next = Swing::Boundary(next.corner());
            let prev = mesh.corners[c].swing_prev;
            mesh.corners[c].swing_prev = Swing::Boundary(prev.corner());
        }
        let err = mesh.validate().unwrap_err();
        assert!(err.to_string().contains("non-manifold"));
    }
}
