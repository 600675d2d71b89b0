//! Corner-ring mesh data structure.
//!
//! A triangle mesh in the plane, represented by three kinds of records:
//!
//! - **Vertices** carry a position, velocity, [`Physics`] kind and one entry
//!   corner into their ring.
//! - **Corners** are vertex/triangle incidences. Within a triangle the
//!   corners form a fixed 3-cycle (`next`/`prev`); around a vertex they form
//!   the *ring*, linked by `swing_next`/`swing_prev`.
//! - **Triangles** own exactly three corners, stored in increasing polar
//!   angle about the circumcenter.
//!
//! # Swing links
//!
//! Corner `i` swings to corner `j` when `i.next.vertex == j.prev.vertex`:
//! the two triangles share the edge from their common vertex to that
//! vertex. Where the fan of triangles around a vertex does not close (the
//! mesh boundary, or a cut), the ring is closed with a [`Swing::Boundary`]
//! link instead of a [`Swing::Real`] one. Walking `swing_next` from a
//! vertex's entry corner always visits all of its corners and returns to
//! the start. A ring with two or more boundary links would describe a
//! non-manifold "bowtie" vertex; editing operations split such vertices
//! before returning.

use std::collections::{HashMap, HashSet};

use nalgebra::{Point2, Vector2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::{Key, SlotMap};

use super::index::{CornerKey, Edge, TriangleId, TriangleKey, VertexId, VertexKey};
use crate::algo::physics::{self, PhysicsOptions};
use crate::error::Result;
use crate::geometry::{Circle2, Line2, Side, VectorExt};

/// How a vertex takes part in the physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Physics {
    /// Never moves.
    Pinned,
    /// Moved by springs and gravity.
    #[default]
    Free,
}

/// A vertex of the mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) position: Point2<f64>,
    pub(crate) velocity: Vector2<f64>,
    pub(crate) physics: Physics,
    /// Entry corner of the ring. For a vertex on the boundary this is the
    /// first corner after the boundary link.
    pub(crate) corner: CornerKey,
}

impl Vertex {
    /// The vertex id.
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    /// Velocity committed by the last physics step.
    #[inline]
    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    /// Physics kind.
    #[inline]
    pub fn physics(&self) -> Physics {
        self.physics
    }

    /// The ring's entry corner.
    #[inline]
    pub fn corner(&self) -> CornerKey {
        self.corner
    }
}

/// A swing link between two corners of the same vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swing {
    /// The two corners' triangles share an edge.
    Real(CornerKey),
    /// Synthetic link closing an open fan; the triangles are not adjacent.
    Boundary(CornerKey),
}

impl Swing {
    /// The corner this link points to.
    #[inline]
    pub fn corner(self) -> CornerKey {
        match self {
            Swing::Real(c) | Swing::Boundary(c) => c,
        }
    }

    /// Whether this is a synthetic boundary link.
    #[inline]
    pub fn is_boundary(self) -> bool {
        matches!(self, Swing::Boundary(_))
    }

    /// The target corner, only for real links.
    #[inline]
    pub fn real(self) -> Option<CornerKey> {
        match self {
            Swing::Real(c) => Some(c),
            Swing::Boundary(_) => None,
        }
    }

    /// The same kind of link pointing at `corner`.
    #[inline]
    pub(crate) fn retarget(self, corner: CornerKey) -> Swing {
        match self {
            Swing::Real(_) => Swing::Real(corner),
            Swing::Boundary(_) => Swing::Boundary(corner),
        }
    }
}

/// A vertex/triangle incidence.
#[derive(Debug, Clone, Copy)]
pub struct Corner {
    pub(crate) vertex: VertexKey,
    pub(crate) triangle: TriangleKey,
    /// Position within the triangle's corner array.
    pub(crate) slot: usize,
    pub(crate) swing_next: Swing,
    pub(crate) swing_prev: Swing,
}

impl Corner {
    /// The vertex at this corner.
    #[inline]
    pub fn vertex(&self) -> VertexKey {
        self.vertex
    }

    /// The triangle owning this corner.
    #[inline]
    pub fn triangle(&self) -> TriangleKey {
        self.triangle
    }

    /// Link to the next corner around the vertex.
    #[inline]
    pub fn swing_next(&self) -> Swing {
        self.swing_next
    }

    /// Link to the previous corner around the vertex.
    #[inline]
    pub fn swing_prev(&self) -> Swing {
        self.swing_prev
    }
}

/// A triangle: three corners in rotation order about the circumcenter.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub(crate) id: TriangleId,
    pub(crate) corners: [CornerKey; 3],
}

impl Triangle {
    /// The triangle id.
    #[inline]
    pub fn id(&self) -> TriangleId {
        self.id
    }

    /// The three corners in rotation order.
    #[inline]
    pub fn corners(&self) -> [CornerKey; 3] {
        self.corners
    }
}

/// Options fixed when a mesh is built.
#[derive(Debug, Clone)]
pub struct MeshOptions {
    /// Seed of the generator that orders vertices in the physics step.
    pub seed: u64,

    /// Parameters used by [`Mesh::physics`].
    pub physics: PhysicsOptions,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            physics: PhysicsOptions::default(),
        }
    }
}

impl MeshOptions {
    /// Create options with the specified seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create options with the specified physics parameters.
    pub fn with_physics(mut self, physics: PhysicsOptions) -> Self {
        self.physics = physics;
        self
    }
}

/// A planar triangle mesh with boundary-aware corner rings.
///
/// Build one from points with [`Mesh::build`]; edit it with the removal and
/// cutting operations; relax it with [`Mesh::physics`].
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) vertices: SlotMap<VertexKey, Vertex>,
    pub(crate) corners: SlotMap<CornerKey, Corner>,
    pub(crate) triangles: SlotMap<TriangleKey, Triangle>,

    /// Spring rest length per edge, captured when the edge is created.
    pub(crate) rest_lengths: HashMap<Edge, f64>,

    /// Hull vertices in wrapping order, as computed at construction.
    pub(crate) hull: Vec<VertexKey>,

    /// Vertex created by the last cut of the current drag gesture.
    pub(crate) cutting: Option<VertexKey>,

    pub(crate) options: MeshOptions,
    pub(crate) rng: StdRng,

    next_vertex_id: u64,
    next_triangle_id: u64,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Create an empty mesh with default options.
    pub fn new() -> Self {
        Self::with_options(MeshOptions::default())
    }

    /// Create an empty mesh with the given options.
    pub fn with_options(options: MeshOptions) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            corners: SlotMap::with_key(),
            triangles: SlotMap::with_key(),
            rest_lengths: HashMap::new(),
            hull: Vec::new(),
            cutting: None,
            rng: StdRng::seed_from_u64(options.seed),
            options,
            next_vertex_id: 0,
            next_triangle_id: 0,
        }
    }

    // ==================== Accessors ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of corners (always three per triangle).
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.corners.len()
    }

    /// Number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.edges().len()
    }

    /// Get a vertex, or `None` for a stale key.
    #[inline]
    pub fn vertex(&self, v: VertexKey) -> Option<&Vertex> {
        self.vertices.get(v)
    }

    /// Get a corner, or `None` for a stale key.
    #[inline]
    pub fn corner(&self, c: CornerKey) -> Option<&Corner> {
        self.corners.get(c)
    }

    /// Get a triangle, or `None` for a stale key.
    #[inline]
    pub fn triangle(&self, t: TriangleKey) -> Option<&Triangle> {
        self.triangles.get(t)
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexKey) -> Option<Point2<f64>> {
        self.vertices.get(v).map(|vertex| vertex.position)
    }

    /// Move a vertex. Returns `false` for a stale key.
    pub fn set_position(&mut self, v: VertexKey, position: Point2<f64>) -> bool {
        match self.vertices.get_mut(v) {
            Some(vertex) => {
                vertex.position = position;
                true
            }
            None => false,
        }
    }

    /// Options the mesh was built with.
    #[inline]
    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    /// Replace the parameters used by [`Mesh::physics`].
    pub fn set_physics_options(&mut self, physics: PhysicsOptions) {
        self.options.physics = physics;
    }

    /// Hull vertices recorded at construction that are still alive, in
    /// wrapping order.
    ///
    /// This is a construction-time snapshot: vertices removed by edits are
    /// skipped, and clones made by later splits or cuts never appear.
    pub fn hull(&self) -> Vec<VertexKey> {
        self.hull
            .iter()
            .copied()
            .filter(|&v| self.vertices.contains_key(v))
            .collect()
    }

    /// Spring rest length of an edge.
    #[inline]
    pub fn rest_length(&self, edge: Edge) -> Option<f64> {
        self.rest_lengths.get(&edge).copied()
    }

    /// The vertex created by the last cut of the ongoing drag gesture.
    #[inline]
    pub fn cutting_vertex(&self) -> Option<VertexKey> {
        self.cutting
    }

    // ==================== Iteration ====================

    /// Iterate over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, &Vertex)> + '_ {
        self.vertices.iter()
    }

    /// Iterate over all vertex keys.
    pub fn vertex_keys(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.vertices.keys()
    }

    /// Iterate over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleKey, &Triangle)> + '_ {
        self.triangles.iter()
    }

    /// Iterate over all triangle keys.
    pub fn triangle_keys(&self) -> impl Iterator<Item = TriangleKey> + '_ {
        self.triangles.keys()
    }

    /// All distinct edges, ordered by endpoint ids.
    pub fn edges(&self) -> Vec<Edge> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for triangle in self.triangles.values() {
            for k in 0..3 {
                let u = self.corners[triangle.corners[k]].vertex;
                let w = self.corners[triangle.corners[(k + 1) % 3]].vertex;
                if let Some(edge) = self.edge(u, w) {
                    if seen.insert(edge) {
                        edges.push(edge);
                    }
                }
            }
        }
        edges.sort_by_key(|e| (self.vertices[e.a].id, self.vertices[e.b].id));
        edges
    }

    /// Iterate over the corners around a vertex, following `swing_next`.
    pub fn ring(&self, v: VertexKey) -> RingIter<'_> {
        RingIter::new(self, v)
    }

    /// Distinct vertices sharing a triangle edge with `v`.
    pub fn neighbors(&self, v: VertexKey) -> Vec<VertexKey> {
        let mut result = Vec::new();
        for c in self.ring(v) {
            for w in [self.corner_next_vertex(c), self.corner_prev_vertex(c)] {
                if !result.contains(&w) {
                    result.push(w);
                }
            }
        }
        result
    }

    // ==================== Topology Queries ====================

    /// The next corner within the same triangle.
    pub fn next_corner(&self, c: CornerKey) -> Option<CornerKey> {
        let corner = self.corners.get(c)?;
        let triangle = self.triangles.get(corner.triangle)?;
        Some(triangle.corners[(corner.slot + 1) % 3])
    }

    /// The previous corner within the same triangle.
    pub fn prev_corner(&self, c: CornerKey) -> Option<CornerKey> {
        let corner = self.corners.get(c)?;
        let triangle = self.triangles.get(corner.triangle)?;
        Some(triangle.corners[(corner.slot + 2) % 3])
    }

    /// The link to the next corner around the corner's vertex.
    pub fn swing_next(&self, c: CornerKey) -> Option<Swing> {
        self.corners.get(c).map(|corner| corner.swing_next)
    }

    /// The link to the previous corner around the corner's vertex.
    pub fn swing_prev(&self, c: CornerKey) -> Option<Swing> {
        self.corners.get(c).map(|corner| corner.swing_prev)
    }

    /// The three vertices of a triangle in rotation order.
    pub fn triangle_vertices(&self, t: TriangleKey) -> Option<[VertexKey; 3]> {
        let triangle = self.triangles.get(t)?;
        Some(triangle.corners.map(|c| self.corners[c].vertex))
    }

    /// The three corner positions of a triangle in rotation order.
    pub fn triangle_positions(&self, t: TriangleKey) -> Option<[Point2<f64>; 3]> {
        let vertices = self.triangle_vertices(t)?;
        Some(vertices.map(|v| self.vertices[v].position))
    }

    /// Whether `p` is strictly on the left of all three directed edges.
    pub fn triangle_contains(&self, t: TriangleKey, p: &Point2<f64>) -> bool {
        let Some([p0, p1, p2]) = self.triangle_positions(t) else {
            return false;
        };
        [(p0, p1), (p1, p2), (p2, p0)]
            .iter()
            .all(|&(a, b)| Line2::new(a, b).side(p) == Side::Left)
    }

    /// The triangle containing `p`, if any.
    pub fn triangle_containing(&self, p: &Point2<f64>) -> Option<TriangleKey> {
        self.triangles.keys().find(|&t| self.triangle_contains(t, p))
    }

    /// The corner nearest to `p` within the triangle containing it.
    pub fn nearest_corner(&self, p: &Point2<f64>) -> Option<CornerKey> {
        let t = self.triangle_containing(p)?;
        self.triangles[t].corners.iter().copied().min_by(|&c1, &c2| {
            let d1 = (self.vertices[self.corners[c1].vertex].position - p).norm_squared();
            let d2 = (self.vertices[self.corners[c2].vertex].position - p).norm_squared();
            d1.total_cmp(&d2)
        })
    }

    /// The edge between two distinct live vertices.
    ///
    /// The vertices need not be adjacent; use [`Mesh::adjacent_triangles`]
    /// to test adjacency.
    pub fn edge(&self, u: VertexKey, w: VertexKey) -> Option<Edge> {
        if u == w {
            return None;
        }
        let iu = self.vertices.get(u)?.id;
        let iw = self.vertices.get(w)?.id;
        Some(if iu < iw {
            Edge { a: u, b: w }
        } else {
            Edge { a: w, b: u }
        })
    }

    /// The segment between an edge's endpoints, smaller id first.
    pub fn edge_line(&self, edge: Edge) -> Option<Line2> {
        Some(Line2::new(self.position(edge.a)?, self.position(edge.b)?))
    }

    /// Triangles having both endpoints of `edge` as corners (0, 1 or 2).
    pub fn adjacent_triangles(&self, edge: Edge) -> Vec<TriangleKey> {
        if !self.vertices.contains_key(edge.a) || !self.vertices.contains_key(edge.b) {
            return Vec::new();
        }
        self.ring(edge.a)
            .filter(|&c| {
                self.corner_next_vertex(c) == edge.b || self.corner_prev_vertex(c) == edge.b
            })
            .map(|c| self.corners[c].triangle)
            .collect()
    }

    /// Whether the edge's triangles are joined by a real swing link.
    pub fn is_linked(&self, edge: Edge) -> bool {
        if !self.vertices.contains_key(edge.a) {
            return false;
        }
        self.ring(edge.a).any(|c| {
            let corner = &self.corners[c];
            (self.corner_next_vertex(c) == edge.b && !corner.swing_next.is_boundary())
                || (self.corner_prev_vertex(c) == edge.b && !corner.swing_prev.is_boundary())
        })
    }

    /// Whether an existing edge has triangles on one side only (or its two
    /// triangles have been severed from each other).
    pub fn is_boundary_edge(&self, edge: Edge) -> bool {
        !self.adjacent_triangles(edge).is_empty() && !self.is_linked(edge)
    }

    /// Whether the vertex's ring contains a boundary link.
    pub fn is_boundary_vertex(&self, v: VertexKey) -> bool {
        self.ring(v).any(|c| self.corners[c].swing_next.is_boundary())
    }

    /// Runs one physics step of length `dt` with the mesh's options.
    ///
    /// See [`crate::algo::physics::step`].
    pub fn physics(&mut self, dt: f64) -> Result<()> {
        let options = self.options.physics.clone();
        physics::step(self, dt, &options)
    }

    // ==================== Construction ====================

    /// Add a vertex that no triangle references yet.
    pub(crate) fn insert_vertex(&mut self, position: Point2<f64>, physics: Physics) -> VertexKey {
        self.next_vertex_id += 1;
        self.vertices.insert(Vertex {
            id: VertexId(self.next_vertex_id),
            position,
            velocity: Vector2::zeros(),
            physics,
            corner: CornerKey::null(),
        })
    }

    /// Copy of `v` under a new id, with no corners yet.
    pub(crate) fn clone_vertex(&mut self, v: VertexKey) -> VertexKey {
        let source = self.vertices[v].clone();
        let clone = self.insert_vertex(source.position, source.physics);
        self.vertices[clone].velocity = source.velocity;
        clone
    }

    /// Add a triangle over three vertices, sorting its corners into
    /// rotation order about the circumcenter. The new corners' swing links
    /// point at themselves until the caller links them.
    pub(crate) fn insert_triangle(&mut self, vertices: [VertexKey; 3]) -> Result<TriangleKey> {
        let positions = vertices.map(|v| self.vertices[v].position);
        let circle = Circle2::circumcircle(&positions[0], &positions[1], &positions[2])?;

        let mut ordered = Vec::with_capacity(3);
        for (&v, p) in vertices.iter().zip(&positions) {
            ordered.push(((p - circle.center).polar_angle()?, v));
        }
        ordered.sort_by(|x, y| x.0.total_cmp(&y.0));

        let [(_, v0), (_, v1), (_, v2)] = [ordered[0], ordered[1], ordered[2]];
        Ok(self.insert_ordered_triangle([v0, v1, v2]))
    }

    /// Add a triangle whose corners are already in rotation order.
    pub(crate) fn insert_ordered_triangle(&mut self, vertices: [VertexKey; 3]) -> TriangleKey {
        self.next_triangle_id += 1;
        let t = self.triangles.insert(Triangle {
            id: TriangleId(self.next_triangle_id),
            corners: [CornerKey::null(); 3],
        });

        let mut corners = [CornerKey::null(); 3];
        for (slot, &v) in vertices.iter().enumerate() {
            let c = self.corners.insert_with_key(|c| Corner {
                vertex: v,
                triangle: t,
                slot,
                swing_next: Swing::Boundary(c),
                swing_prev: Swing::Boundary(c),
            });
            corners[slot] = c;
            if let Some(vertex) = self.vertices.get_mut(v) {
                if vertex.corner.is_null() {
                    vertex.corner = c;
                }
            }
        }
        self.triangles[t].corners = corners;
        t
    }

    /// Link the corners of one vertex into a ring from scratch.
    ///
    /// Corners whose triangles share an edge get real links. Each maximal
    /// arc of real links is then joined to the next arc with a boundary
    /// link, and the vertex's entry corner becomes the start of the first
    /// arc.
    pub(crate) fn link_fan(&mut self, fan: &[CornerKey]) {
        let n = fan.len();
        if n == 0 {
            return;
        }

        let next_vertices: Vec<VertexKey> =
            fan.iter().map(|&c| self.corner_next_vertex(c)).collect();
        let prev_vertices: Vec<VertexKey> =
            fan.iter().map(|&c| self.corner_prev_vertex(c)).collect();

        let mut successor: Vec<Option<usize>> = vec![None; n];
        let mut has_prev = vec![false; n];
        for i in 0..n {
            for j in 0..n {
                if i != j
                    && successor[i].is_none()
                    && !has_prev[j]
                    && next_vertices[i] == prev_vertices[j]
                {
                    self.corners[fan[i]].swing_next = Swing::Real(fan[j]);
                    self.corners[fan[j]].swing_prev = Swing::Real(fan[i]);
                    successor[i] = Some(j);
                    has_prev[j] = true;
                }
            }
        }

        // (first, last) of each arc
        let mut arcs = Vec::new();
        for first in (0..n).filter(|&i| !has_prev[i]) {
            let mut last = first;
            let mut steps = 0;
            while let Some(j) = successor[last] {
                if steps == n {
                    break;
                }
                last = j;
                steps += 1;
            }
            arcs.push((first, last));
        }

        for k in 0..arcs.len() {
            let (_, last) = arcs[k];
            let (first, _) = arcs[(k + 1) % arcs.len()];
            self.corners[fan[last]].swing_next = Swing::Boundary(fan[first]);
            self.corners[fan[first]].swing_prev = Swing::Boundary(fan[last]);
        }

        let entry = arcs.first().map_or(fan[0], |&(first, _)| fan[first]);
        let v = self.corners[entry].vertex;
        if let Some(vertex) = self.vertices.get_mut(v) {
            vertex.corner = entry;
        }
    }

    // ==================== Internal Navigation ====================

    /// Vertex of the next corner in the triangle. `c` must be live.
    #[inline]
    pub(crate) fn corner_next_vertex(&self, c: CornerKey) -> VertexKey {
        let corner = &self.corners[c];
        let next = self.triangles[corner.triangle].corners[(corner.slot + 1) % 3];
        self.corners[next].vertex
    }

    /// Vertex of the previous corner in the triangle. `c` must be live.
    #[inline]
    pub(crate) fn corner_prev_vertex(&self, c: CornerKey) -> VertexKey {
        let corner = &self.corners[c];
        let prev = self.triangles[corner.triangle].corners[(corner.slot + 2) % 3];
        self.corners[prev].vertex
    }

    /// The corner of triangle `t` at vertex `v`.
    pub fn corner_at(&self, t: TriangleKey, v: VertexKey) -> Option<CornerKey> {
        let triangle = self.triangles.get(t)?;
        triangle
            .corners
            .iter()
            .copied()
            .find(|&c| self.corners[c].vertex == v)
    }

    /// Rest length of an edge, falling back to the current distance.
    pub(crate) fn rest_length_or_distance(&self, edge: Edge) -> f64 {
        self.rest_lengths.get(&edge).copied().unwrap_or_else(|| {
            (self.vertices[edge.a].position - self.vertices[edge.b].position).norm()
        })
    }

    /// Record the current distance as the rest length of `u`-`w`.
    pub(crate) fn capture_rest_length(&mut self, u: VertexKey, w: VertexKey) {
        if let Some(edge) = self.edge(u, w) {
            let length = (self.vertices[u].position - self.vertices[w].position).norm();
            self.rest_lengths.insert(edge, length);
        }
    }

    /// Drop rest lengths of edges that no longer exist.
    pub(crate) fn prune_rest_lengths(&mut self) {
        let live: HashSet<Edge> = self.edges().into_iter().collect();
        self.rest_lengths.retain(|edge, _| live.contains(edge));
    }
}

/// Iterator over the corners around a vertex.
pub struct RingIter<'a> {
    mesh: &'a Mesh,
    start: CornerKey,
    current: CornerKey,
    remaining: usize,
    done: bool,
}

impl<'a> RingIter<'a> {
    fn new(mesh: &'a Mesh, v: VertexKey) -> Self {
        let start = mesh.vertices.get(v).map_or(CornerKey::null(), |vertex| vertex.corner);
        Self {
            mesh,
            start,
            current: start,
            remaining: mesh.corners.len(),
            done: !mesh.corners.contains_key(start),
        }
    }
}

impl<'a> Iterator for RingIter<'a> {
    type Item = CornerKey;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        match self.mesh.corners.get(self.current) {
            Some(corner) => self.current = corner.swing_next.corner(),
            None => {
                self.done = true;
                return None;
            }
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.current == self.start || self.remaining == 0 {
            self.done = true;
        }

        Some(result)
    }
}
