//! Local edits: removal, cutting and manifold repair.
//!
//! Every edit leaves the corner rings consistent. When an edit pinches a
//! vertex into two or more separate fans, the vertex is split so that each
//! fan gets its own vertex; a vertex left with no triangles is deleted.
//!
//! # Cutting gestures
//!
//! A drag is a sequence of [`Mesh::cut`] calls. Each cut inserts a vertex
//! on the crossed edge and splits the edge's triangles. The cut vertex of
//! the previous call is remembered, and when it shares an edge with the new
//! one, the triangles on either side of that edge are severed. A single cut
//! therefore only subdivides; consecutive cuts open a channel.
//! [`Mesh::stop_cutting`] ends the gesture.

use std::collections::{HashMap, HashSet};

use slotmap::Key;

use super::index::{CornerKey, Edge, TriangleKey, VertexKey};
use super::topology::{Mesh, Physics, Swing};
use crate::error::{MeshError, Result};
use crate::geometry::Line2;

impl Mesh {
    // ==================== Removal ====================

    /// Remove a triangle.
    ///
    /// Its corners are unlinked from their rings, each ring being bridged
    /// across the gap with a boundary link. Vertices left without triangles
    /// are deleted; vertices left with several fans are split.
    ///
    /// Returns `false` if the triangle no longer exists.
    pub fn remove_triangle(&mut self, t: TriangleKey) -> bool {
        if !self.unlink_triangle(t) {
            return false;
        }
        self.prune_rest_lengths();
        self.debug_validate("remove_triangle");
        true
    }

    /// Remove the 1 or 2 triangles adjacent to an edge.
    ///
    /// Returns the number of triangles removed (0 for a stale edge).
    pub fn remove_edge(&mut self, edge: Edge) -> usize {
        let triangles = self.adjacent_triangles(edge);
        let removed = triangles
            .into_iter()
            .filter(|&t| self.unlink_triangle(t))
            .count();
        if removed > 0 {
            self.prune_rest_lengths();
            self.debug_validate("remove_edge");
        }
        removed
    }

    /// Remove every triangle adjacent to an edge crossed by `motion`.
    ///
    /// This is the drag-to-delete gesture. Returns the number of triangles
    /// removed.
    pub fn remove_along(&mut self, motion: &Line2) -> usize {
        let mut seen = HashSet::new();
        let mut triangles = Vec::new();
        for edge in self.edges() {
            let crossed = self
                .edge_line(edge)
                .is_some_and(|line| line.overlaps(motion));
            if !crossed {
                continue;
            }
            for t in self.adjacent_triangles(edge) {
                if seen.insert(t) {
                    triangles.push(t);
                }
            }
        }

        let removed = triangles
            .into_iter()
            .filter(|&t| self.unlink_triangle(t))
            .count();
        if removed > 0 {
            log::debug!("drag removed {} triangles", removed);
            self.prune_rest_lengths();
            self.debug_validate("remove_along");
        }
        removed
    }

    fn unlink_triangle(&mut self, t: TriangleKey) -> bool {
        let Some(triangle) = self.triangles.remove(t) else {
            return false;
        };
        log::trace!("removing triangle {}", triangle.id);

        let mut touched = Vec::with_capacity(3);
        for c in triangle.corners {
            let Some(corner) = self.corners.remove(c) else {
                continue;
            };
            let v = corner.vertex;
            let next = corner.swing_next.corner();
            let prev = corner.swing_prev.corner();

            if next == c {
                if let Some(vertex) = self.vertices.get_mut(v) {
                    vertex.corner = CornerKey::null();
                }
            } else {
                self.corners[prev].swing_next = Swing::Boundary(next);
                self.corners[next].swing_prev = Swing::Boundary(prev);
                if let Some(vertex) = self.vertices.get_mut(v) {
                    if vertex.corner == c {
                        vertex.corner = next;
                    }
                }
            }
            touched.push(v);
        }

        for v in touched {
            let orphaned = self
                .vertices
                .get(v)
                .is_some_and(|vertex| vertex.corner.is_null());
            if orphaned {
                if let Some(vertex) = self.vertices.remove(v) {
                    log::debug!("vertex {} lost its last triangle", vertex.id);
                }
                if self.cutting == Some(v) {
                    self.cutting = None;
                }
            } else {
                self.repair_manifold(v);
            }
        }
        true
    }

    // ==================== Manifold Repair ====================

    /// Split a vertex whose ring has more than one boundary link.
    ///
    /// The ring is divided into sections at its boundary links. The first
    /// section stays on `v`; every other section moves to a clone of `v`
    /// with the same position, velocity and physics kind. Each section's
    /// ring is closed onto itself. Returns the clones.
    pub(crate) fn repair_manifold(&mut self, v: VertexKey) -> Vec<VertexKey> {
        let mut ring: Vec<CornerKey> = self.ring(v).collect();
        let Some(start) = ring
            .iter()
            .position(|&c| self.corners[c].swing_prev.is_boundary())
        else {
            return Vec::new();
        };
        ring.rotate_left(start);

        let mut sections: Vec<Vec<CornerKey>> = Vec::new();
        for c in ring {
            if self.corners[c].swing_prev.is_boundary() {
                sections.push(Vec::new());
            }
            if let Some(section) = sections.last_mut() {
                section.push(c);
            }
        }
        if sections.len() < 2 {
            return Vec::new();
        }

        for section in &sections {
            let (Some(&first), Some(&last)) = (section.first(), section.last()) else {
                continue;
            };
            self.corners[last].swing_next = Swing::Boundary(first);
            self.corners[first].swing_prev = Swing::Boundary(last);
        }
        self.vertices[v].corner = sections[0][0];

        let mut clones = Vec::with_capacity(sections.len() - 1);
        for section in &sections[1..] {
            let clone = self.clone_vertex(v);
            for &c in section {
                self.corners[c].vertex = clone;
            }
            self.vertices[clone].corner = section[0];

            for &c in section {
                for w in [self.corner_next_vertex(c), self.corner_prev_vertex(c)] {
                    let (Some(old), Some(new)) = (self.edge(v, w), self.edge(clone, w)) else {
                        continue;
                    };
                    if let Some(&length) = self.rest_lengths.get(&old) {
                        self.rest_lengths.entry(new).or_insert(length);
                    }
                }
            }
            clones.push(clone);
        }

        log::debug!(
            "split non-manifold vertex {} into {} fans",
            self.vertices[v].id,
            sections.len()
        );
        clones
    }

    /// Turn the real links across edge `u`-`w` into boundary links.
    pub(crate) fn sever(&mut self, u: VertexKey, w: VertexKey) {
        for (from, to) in [(u, w), (w, u)] {
            let ring: Vec<CornerKey> = self.ring(from).collect();
            for c in ring {
                if self.corner_next_vertex(c) != to {
                    continue;
                }
                if let Swing::Real(j) = self.corners[c].swing_next {
                    self.corners[c].swing_next = Swing::Boundary(j);
                    self.corners[j].swing_prev = Swing::Boundary(c);
                }
            }
        }
    }

    // ==================== Cutting ====================

    /// Cut an edge where `cutting` crosses it.
    ///
    /// A new free vertex is inserted at the intersection and each triangle
    /// adjacent to the edge is split in two by joining the new vertex to
    /// the triangle's third corner. The halves of the edge get rest lengths
    /// proportional to the split position. If the vertex of the previous
    /// cut in this gesture shares an edge with the new vertex, the
    /// triangles across that edge are severed and both vertices repaired.
    ///
    /// Returns `Ok(None)` when the edge no longer exists.
    ///
    /// # Errors
    ///
    /// - [`MeshError::ParallelLines`] if the lines do not meet
    /// - [`MeshError::CutOutsideEdge`] if they meet outside the open edge
    pub fn cut(&mut self, edge: Edge, cutting: &Line2) -> Result<Option<VertexKey>> {
        let triangles = self.adjacent_triangles(edge);
        let Some(line) = self.edge_line(edge) else {
            return Ok(None);
        };
        if triangles.is_empty() {
            return Ok(None);
        }

        let point = line.intersect_line(cutting)?;
        let t = line.parameter_of(&point);
        if !(t > 0.0 && t < 1.0) {
            return Err(MeshError::CutOutsideEdge { t });
        }

        let severed_wall = triangles.len() == 2 && !self.is_linked(edge);
        let rest = self.rest_length_or_distance(edge);
        let velocity =
            self.vertices[edge.a].velocity * (1.0 - t) + self.vertices[edge.b].velocity * t;

        let n = self.insert_vertex(point, Physics::Free);
        self.vertices[n].velocity = velocity;

        // old corner -> new corner on the edge endpoints
        let mut replaced: HashMap<CornerKey, CornerKey> = HashMap::new();
        // old apex corner -> (half keeping its swing_next, half keeping its swing_prev)
        let mut apexes: HashMap<CornerKey, (CornerKey, CornerKey)> = HashMap::new();
        let mut fan = Vec::with_capacity(4);
        let mut apex_vertices = Vec::with_capacity(2);
        let mut old_corners = Vec::with_capacity(6);

        for &old in &triangles {
            let corners = self.triangles[old].corners;
            let Some(k) = (0..3).find(|&k| {
                edge.contains(self.corners[corners[k]].vertex)
                    && edge.contains(self.corners[corners[(k + 1) % 3]].vertex)
            }) else {
                continue;
            };
            let (cx, cy, co) = (corners[k], corners[(k + 1) % 3], corners[(k + 2) % 3]);
            let [x, y, o] = [cx, cy, co].map(|c| self.corners[c].vertex);

            let first = self.insert_ordered_triangle([x, n, o]);
            let second = self.insert_ordered_triangle([n, y, o]);
            let [c1x, c1n, c1o] = self.triangles[first].corners;
            let [c2n, c2y, c2o] = self.triangles[second].corners;

            replaced.insert(cx, c1x);
            replaced.insert(cy, c2y);
            apexes.insert(co, (c1o, c2o));
            fan.extend([c1n, c2n]);
            apex_vertices.push(o);
            old_corners.extend([cx, cy, co]);
        }

        let remap = |target: CornerKey, forward: bool| -> CornerKey {
            if let Some(&c) = replaced.get(&target) {
                c
            } else if let Some(&(first, second)) = apexes.get(&target) {
                if forward {
                    second
                } else {
                    first
                }
            } else {
                target
            }
        };

        // (corner, swing_next, swing_prev)
        let mut links: Vec<(CornerKey, Swing, Swing)> = Vec::with_capacity(8);
        for (&old, &new) in &replaced {
            let corner = self.corners[old];
            links.push((
                new,
                corner.swing_next.retarget(remap(corner.swing_next.corner(), true)),
                corner.swing_prev.retarget(remap(corner.swing_prev.corner(), false)),
            ));
        }
        for (&old, &(first, second)) in &apexes {
            let corner = self.corners[old];
            links.push((
                first,
                corner.swing_next.retarget(remap(corner.swing_next.corner(), true)),
                Swing::Real(second),
            ));
            links.push((
                second,
                Swing::Real(first),
                corner.swing_prev.retarget(remap(corner.swing_prev.corner(), false)),
            ));
        }

        for &(c, next, prev) in &links {
            self.corners[c].swing_next = next;
            self.corners[c].swing_prev = prev;
        }
        for &(c, next, prev) in &links {
            self.corners[next.corner()].swing_prev = next.retarget(c);
            self.corners[prev.corner()].swing_next = prev.retarget(c);
        }
        self.link_fan(&fan);

        for &old in &old_corners {
            let v = self.corners[old].vertex;
            if self.vertices[v].corner != old {
                continue;
            }
            let new = replaced
                .get(&old)
                .copied()
                .or_else(|| apexes.get(&old).map(|&(first, _)| first));
            if let Some(new) = new {
                self.vertices[v].corner = new;
            }
        }
        for &old in &triangles {
            self.triangles.remove(old);
        }
        for &old in &old_corners {
            self.corners.remove(old);
        }

        self.rest_lengths.remove(&edge);
        if let Some(half) = self.edge(edge.a, n) {
            self.rest_lengths.insert(half, rest * t);
        }
        if let Some(half) = self.edge(n, edge.b) {
            self.rest_lengths.insert(half, rest * (1.0 - t));
        }
        for &o in &apex_vertices {
            self.capture_rest_length(n, o);
        }

        log::debug!(
            "cut edge {}-{} at t = {:.3}: vertex {}, {} triangles split",
            self.vertices[edge.a].id,
            self.vertices[edge.b].id,
            t,
            self.vertices[n].id,
            triangles.len()
        );

        if severed_wall {
            self.sever(n, edge.a);
            self.sever(n, edge.b);
            self.repair_manifold(n);
        }

        let previous = self.cutting.filter(|&p| p != n);
        if let Some(previous) = previous {
            let adjacent = self
                .edge(previous, n)
                .is_some_and(|link| !self.adjacent_triangles(link).is_empty());
            if adjacent {
                log::debug!(
                    "severing channel between vertices {} and {}",
                    self.vertices[previous].id,
                    self.vertices[n].id
                );
                self.sever(previous, n);
                self.repair_manifold(previous);
                self.repair_manifold(n);
            }
        }
        self.cutting = Some(n);

        self.prune_rest_lengths();
        self.debug_validate("cut");
        Ok(Some(n))
    }

    /// Cut every edge crossed by `motion`, in order along the motion.
    ///
    /// This is the drag-to-cut gesture: the cuts continue the current
    /// gesture, so the crossed edges open into a channel. Returns the new
    /// vertices (before any splitting) in the order they were created.
    pub fn cut_along(&mut self, motion: &Line2) -> Result<Vec<VertexKey>> {
        let mut crossings: Vec<(f64, Edge)> = self
            .edges()
            .into_iter()
            .filter_map(|edge| {
                let line = self.edge_line(edge)?;
                let (_, _, u) = line.segment_intersection(motion)?;
                Some((u, edge))
            })
            .collect();
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut created = Vec::with_capacity(crossings.len());
        for (_, edge) in crossings {
            if let Some(v) = self.cut(edge, motion)? {
                created.push(v);
            }
        }
        Ok(created)
    }

    /// End the current cutting gesture.
    ///
    /// The next cut starts a new channel instead of continuing the last.
    pub fn stop_cutting(&mut self) {
        if self.cutting.take().is_some() {
            log::trace!("cutting gesture ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::VectorExt;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    /// A jittered 4x4 grid, so no four points are cocircular.
    fn grid() -> Mesh {
        let mut points = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                let x = i as f64 + 0.03 * ((i * 7 + j * 3) % 5) as f64;
                let y = j as f64 + 0.02 * ((i * 5 + j * 11) % 7) as f64;
                points.push((Point2::new(x, y), Physics::Free));
            }
        }
        Mesh::build(&points).unwrap()
    }

    fn interior_vertex(mesh: &Mesh) -> VertexKey {
        mesh.vertex_keys()
            .find(|&v| !mesh.is_boundary_vertex(v) && mesh.ring(v).count() >= 4)
            .unwrap()
    }

    fn interior_edge(mesh: &Mesh) -> Edge {
        mesh.edges()
            .into_iter()
            .find(|&e| mesh.adjacent_triangles(e).len() == 2)
            .unwrap()
    }

    /// Number of groups of triangles connected through shared edges.
    fn components(mesh: &Mesh) -> usize {
        let mut seen = HashSet::new();
        let mut count = 0;
        for start in mesh.triangle_keys() {
            if !seen.insert(start) {
                continue;
            }
            count += 1;
            let mut stack = vec![start];
            while let Some(t) = stack.pop() {
                let [a, b, c] = mesh.triangle_vertices(t).unwrap();
                for (u, w) in [(a, b), (b, c), (c, a)] {
                    let edge = mesh.edge(u, w).unwrap();
                    for s in mesh.adjacent_triangles(edge) {
                        if seen.insert(s) {
                            stack.push(s);
                        }
                    }
                }
            }
        }
        count
    }

    fn crossing_line(mesh: &Mesh, edge: Edge, t: f64) -> Line2 {
        let line = mesh.edge_line(edge).unwrap();
        Line2::from_point_direction(line.point_at(t), line.direction().rot90())
    }

    #[test]
    fn test_remove_triangle() {
        let mut mesh = grid();
        let before = mesh.num_triangles();
        let t = mesh.triangle_keys().next().unwrap();

        assert!(mesh.remove_triangle(t));
        assert_eq!(mesh.num_triangles(), before - 1);
        assert_eq!(mesh.num_corners(), 3 * (before - 1));
        assert!(mesh.triangle(t).is_none());
        assert!(mesh.validate().is_ok());

        // Stale handle
        assert!(!mesh.remove_triangle(t));
    }

    #[test]
    fn test_removing_fan_deletes_vertex() {
        let mut mesh = grid();
        let v = interior_vertex(&mesh);
        let fan: Vec<TriangleKey> = mesh.ring(v).map(|c| mesh.corners[c].triangle).collect();
        let vertices = mesh.num_vertices();

        for t in fan {
            assert!(mesh.remove_triangle(t));
        }
        assert!(mesh.vertex(v).is_none());
        assert_eq!(mesh.num_vertices(), vertices - 1);
        assert!(mesh.validate().is_ok());
        assert!(mesh.rest_lengths.keys().all(|e| !e.contains(v)));
    }

    #[test]
    fn test_removed_hull_vertex_leaves_hull() {
        let mut mesh = grid();
        let hull = mesh.hull();
        let v = hull[0];
        let fan: Vec<TriangleKey> = mesh.ring(v).map(|c| mesh.corners[c].triangle).collect();

        for t in fan {
            mesh.remove_triangle(t);
        }
        assert!(mesh.vertex(v).is_none());
        let remaining = mesh.hull();
        assert!(!remaining.contains(&v));
        assert!(remaining.len() < hull.len());
        assert!(remaining.iter().all(|&w| mesh.vertex(w).is_some()));
    }

    #[test]
    fn test_bowtie_is_split() {
        let mut mesh = grid();
        let v = interior_vertex(&mesh);
        let position = mesh.position(v).unwrap();
        let fan: Vec<TriangleKey> = mesh.ring(v).map(|c| mesh.corners[c].triangle).collect();

        mesh.remove_triangle(fan[0]);
        assert!(mesh.is_boundary_vertex(v));
        mesh.remove_triangle(fan[2]);

        assert!(mesh.validate().is_ok());
        let at_position = mesh
            .vertices()
            .filter(|(_, vertex)| vertex.position() == position)
            .count();
        assert_eq!(at_position, 2);
    }

    #[test]
    fn test_remove_edge() {
        let mut mesh = grid();
        let edge = interior_edge(&mesh);
        let before = mesh.num_triangles();

        assert_eq!(mesh.remove_edge(edge), 2);
        assert_eq!(mesh.num_triangles(), before - 2);
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.remove_edge(edge), 0);
    }

    #[test]
    fn test_remove_along() {
        let mut mesh = grid();
        let before = mesh.num_triangles();
        let motion = Line2::new(Point2::new(-0.5, 1.5), Point2::new(1.5, 1.5));

        let removed = mesh.remove_along(&motion);
        assert!(removed > 0);
        assert_eq!(mesh.num_triangles(), before - removed);
        assert!(mesh.validate().is_ok());

        let far = Line2::new(Point2::new(10.0, 10.0), Point2::new(11.0, 10.0));
        assert_eq!(mesh.remove_along(&far), 0);
    }

    #[test]
    fn test_cut_interior_edge() {
        let mut mesh = grid();
        let edge = interior_edge(&mesh);
        let old = mesh.adjacent_triangles(edge);
        let (triangles, vertices) = (mesh.num_triangles(), mesh.num_vertices());
        let midpoint = mesh.edge_line(edge).unwrap().midpoint();
        let cutting = mesh.edge_line(edge).unwrap().bisector().unwrap();

        let n = mesh.cut(edge, &cutting).unwrap().unwrap();

        assert_eq!(mesh.num_triangles(), triangles + 2);
        assert_eq!(mesh.num_vertices(), vertices + 1);
        assert!(old.iter().all(|&t| mesh.triangle(t).is_none()));
        assert!(mesh.adjacent_triangles(edge).is_empty());

        let vertex = mesh.vertex(n).unwrap();
        assert_eq!(vertex.physics(), Physics::Free);
        assert_relative_eq!(vertex.position(), midpoint, epsilon = 1e-12);
        assert_eq!(mesh.ring(n).count(), 4);
        assert!(!mesh.is_boundary_vertex(n));

        // A single cut only subdivides
        assert_eq!(components(&mesh), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cut_boundary_edge() {
        let mut mesh = grid();
        let edge = mesh
            .edges()
            .into_iter()
            .find(|&e| mesh.adjacent_triangles(e).len() == 1)
            .unwrap();
        let triangles = mesh.num_triangles();

        let n = mesh.cut(edge, &crossing_line(&mesh, edge, 0.3)).unwrap().unwrap();
        assert_eq!(mesh.num_triangles(), triangles + 1);
        assert_eq!(mesh.ring(n).count(), 2);
        assert!(mesh.is_boundary_vertex(n));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cut_interpolates_rest_lengths() {
        let mut mesh = grid();
        let edge = interior_edge(&mesh);
        let rest = mesh.rest_length(edge).unwrap();

        let n = mesh.cut(edge, &crossing_line(&mesh, edge, 0.25)).unwrap().unwrap();

        assert!(mesh.rest_length(edge).is_none());
        let near = mesh.rest_length(mesh.edge(edge.a(), n).unwrap()).unwrap();
        let far = mesh.rest_length(mesh.edge(n, edge.b()).unwrap()).unwrap();
        assert_relative_eq!(near, rest * 0.25, epsilon = 1e-12);
        assert_relative_eq!(far, rest * 0.75, epsilon = 1e-12);
        for w in mesh.neighbors(n) {
            assert!(mesh.rest_length(mesh.edge(n, w).unwrap()).is_some());
        }
    }

    #[test]
    fn test_cut_errors() {
        let mut mesh = grid();
        let edge = interior_edge(&mesh);
        let line = mesh.edge_line(edge).unwrap();
        let vertices = mesh.num_vertices();

        let parallel = line.translated(line.direction().rot90());
        assert_eq!(mesh.cut(edge, &parallel), Err(MeshError::ParallelLines));

        let outside = crossing_line(&mesh, edge, 2.0);
        assert!(matches!(
            mesh.cut(edge, &outside),
            Err(MeshError::CutOutsideEdge { .. })
        ));

        assert_eq!(mesh.num_vertices(), vertices);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cut_stale_edge() {
        let mut mesh = grid();
        let edge = interior_edge(&mesh);
        let cutting = mesh.edge_line(edge).unwrap().bisector().unwrap();
        mesh.cut(edge, &cutting).unwrap();
        assert_eq!(mesh.cut(edge, &cutting), Ok(None));
    }

    #[test]
    fn test_consecutive_cuts_sever() {
        for stop in [false, true] {
            let mut mesh = grid();
            let edge = interior_edge(&mesh);
            let cutting = mesh.edge_line(edge).unwrap().bisector().unwrap();
            let n = mesh.cut(edge, &cutting).unwrap().unwrap();
            assert_eq!(mesh.cutting_vertex(), Some(n));
            if stop {
                mesh.stop_cutting();
                assert_eq!(mesh.cutting_vertex(), None);
            }

            // The edge of one of n's triangles facing n
            let c = mesh.ring(n).next().unwrap();
            let (u, w) = (mesh.corner_next_vertex(c), mesh.corner_prev_vertex(c));
            let facing = mesh.edge(u, w).unwrap();
            let cutting = mesh.edge_line(facing).unwrap().bisector().unwrap();
            let m = mesh.cut(facing, &cutting).unwrap().unwrap();

            let link = mesh.edge(n, m).unwrap();
            assert!(!mesh.adjacent_triangles(link).is_empty());
            assert_eq!(mesh.is_boundary_edge(link), !stop);
            assert!(mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_cut_along_opens_channel() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut mesh = grid();
        let motion = Line2::new(Point2::new(-0.5, 1.5), Point2::new(3.7, 1.5));

        let created = mesh.cut_along(&motion).unwrap();
        mesh.stop_cutting();

        assert!(created.len() >= 3);
        assert!(mesh.validate().is_ok());
        assert_eq!(components(&mesh), 2);

        // No triangle straddles the motion
        for t in mesh.triangle_keys() {
            let offsets: Vec<f64> = mesh
                .triangle_positions(t)
                .unwrap()
                .iter()
                .map(|p| p.y - 1.5)
                .filter(|d| d.abs() > 1e-9)
                .collect();
            assert!(offsets.iter().all(|d| d.signum() == offsets[0].signum()));
        }
    }

    #[test]
    fn test_cut_severed_wall_splits_new_vertex() {
        let mut mesh = grid();
        let edge = mesh
            .edges()
            .into_iter()
            .find(|&e| {
                mesh.adjacent_triangles(e).len() == 2
                    && !mesh.is_boundary_vertex(e.a())
                    && !mesh.is_boundary_vertex(e.b())
            })
            .unwrap();
        mesh.sever(edge.a(), edge.b());
        assert!(mesh.validate().is_ok());
        let vertices = mesh.num_vertices();

        let cutting = mesh.edge_line(edge).unwrap().bisector().unwrap();
        let n = mesh.cut(edge, &cutting).unwrap().unwrap();

        assert_eq!(mesh.num_vertices(), vertices + 2);
        assert_eq!(mesh.ring(n).count(), 2);
        assert!(mesh.validate().is_ok());
    }
}
