//! Delaunay mesh construction.
//!
//! Meshes are grown outward from the convex hull one triangle at a time:
//!
//! 1. Wrap the hull ([`crate::geometry::convex_hull`]).
//! 2. Seed a worklist of *open* edges with the hull edges.
//! 3. Pop an open edge and build the triangle on its open side from the
//!    vertex of smallest [`Line2::bulge`]; the triangle's other two edges
//!    are opened, or closed if they were already open.
//! 4. When the worklist runs dry, link every vertex's corners into a ring.
//!
//! Each step scans all vertices, which suits interactive point counts
//! (tens to low hundreds).

use std::collections::{BTreeMap, HashMap, HashSet};

use nalgebra::Point2;

use super::index::{CornerKey, Edge, VertexId, VertexKey};
use super::topology::{Mesh, MeshOptions, Physics};
use crate::error::{MeshError, Result};
use crate::geometry::{convex_hull, Line2};

/// An open edge waiting for the triangle on its unbuilt side, with the
/// apex of the triangle already built on the other side (none for hull
/// edges).
struct OpenEdge {
    edge: Edge,
    previous: Option<VertexKey>,
}

/// Build a Delaunay mesh from tagged points with default options.
///
/// # Errors
///
/// - [`MeshError::InsufficientPoints`] for fewer than 3 points
/// - [`MeshError::DuplicatePoint`] when two points coincide
/// - [`MeshError::CollinearPoints`] when all points lie on one line
/// - [`MeshError::ConstructionFailed`] if the worklist does not settle
///
/// # Example
///
/// ```
/// use swingmesh::mesh::{build_delaunay, Physics};
/// use swingmesh::MeshOptions;
/// use nalgebra::Point2;
///
/// let points = [
///     (Point2::new(0.0, 0.0), Physics::Pinned),
///     (Point2::new(4.0, 0.0), Physics::Pinned),
///     (Point2::new(1.0, 3.0), Physics::Free),
///     (Point2::new(2.0, 1.0), Physics::Free),
/// ];
/// let mesh = build_delaunay(&points, MeshOptions::default()).unwrap();
/// assert_eq!(mesh.num_triangles(), 3);
/// assert_eq!(mesh.num_edges(), 6);
/// ```
pub fn build_delaunay(points: &[(Point2<f64>, Physics)], options: MeshOptions) -> Result<Mesh> {
    if points.len() < 3 {
        return Err(MeshError::InsufficientPoints {
            count: points.len(),
        });
    }

    let positions: Vec<Point2<f64>> = points.iter().map(|&(p, _)| p).collect();
    check_distinct(&positions)?;
    check_not_collinear(&positions)?;
    let hull = convex_hull(&positions)?;

    let mut mesh = Mesh::with_options(options);
    let keys: Vec<VertexKey> = points
        .iter()
        .map(|&(p, physics)| mesh.insert_vertex(p, physics))
        .collect();
    mesh.hull = hull.iter().map(|&i| keys[i]).collect();

    let mut hull_edges = HashSet::new();
    let mut open: BTreeMap<(VertexId, VertexId), OpenEdge> = BTreeMap::new();
    for (k, &i) in hull.iter().enumerate() {
        let j = hull[(k + 1) % hull.len()];
        let edge = mesh.edge(keys[i], keys[j]).ok_or_else(|| {
            MeshError::InvalidState("hull edge between dead vertices".to_string())
        })?;
        hull_edges.insert(edge);
        open.insert(edge_ids(&mesh, edge), OpenEdge { edge, previous: None });
    }

    log::debug!(
        "building Delaunay mesh: {} points, {} on the hull",
        points.len(),
        hull.len()
    );

    // A planar triangulation of n points has at most 2n - 5 triangles.
    let max_triangles = 2 * points.len();

    while let Some((_, OpenEdge { edge, previous })) = open.pop_first() {
        if previous.is_some() && hull_edges.contains(&edge) {
            continue;
        }

        let Some(apex) = select_apex(&mesh, &keys, edge, previous)? else {
            log::trace!("open edge {:?} has no candidate", edge);
            continue;
        };
        log::trace!("edge {:?} closes with apex {:?}", edge, apex);

        mesh.insert_triangle([edge.a, edge.b, apex])?;
        if mesh.num_triangles() > max_triangles {
            return Err(MeshError::ConstructionFailed {
                triangles: mesh.num_triangles(),
            });
        }

        for (u, w) in [(edge.a, edge.b), (edge.b, edge.a)] {
            let Some(side) = mesh.edge(u, apex) else {
                continue;
            };
            let ids = edge_ids(&mesh, side);
            if open.remove(&ids).is_none() {
                open.insert(
                    ids,
                    OpenEdge {
                        edge: side,
                        previous: Some(w),
                    },
                );
            }
        }
    }

    link_all(&mut mesh);
    for edge in mesh.edges() {
        mesh.capture_rest_length(edge.a, edge.b);
    }

    if let Some((_, vertex)) = mesh.vertices().find(|(_, v)| !mesh.corners.contains_key(v.corner)) {
        return Err(MeshError::InvalidState(format!(
            "vertex {} was left out of the triangulation",
            vertex.id()
        )));
    }

    log::debug!(
        "built Delaunay mesh: {} vertices, {} triangles, {} edges",
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.rest_lengths.len()
    );
    mesh.debug_validate("build");
    Ok(mesh)
}

impl Mesh {
    /// Build a Delaunay mesh from tagged points with default options.
    ///
    /// See [`build_delaunay`].
    pub fn build(points: &[(Point2<f64>, Physics)]) -> Result<Mesh> {
        build_delaunay(points, MeshOptions::default())
    }

    /// Build a Delaunay mesh from tagged points.
    ///
    /// See [`build_delaunay`].
    pub fn build_with_options(
        points: &[(Point2<f64>, Physics)],
        options: MeshOptions,
    ) -> Result<Mesh> {
        build_delaunay(points, options)
    }
}

/// The vertex of smallest bulge on the open side of `edge`.
///
/// Without a previous apex (a hull edge) every vertex off the edge's line
/// is a candidate; otherwise only vertices strictly on the side opposite
/// the previous apex are. Ties keep the earliest vertex in input order.
fn select_apex(
    mesh: &Mesh,
    keys: &[VertexKey],
    edge: Edge,
    previous: Option<VertexKey>,
) -> Result<Option<VertexKey>> {
    let Some(line) = mesh.edge_line(edge) else {
        return Ok(None);
    };
    let required = previous
        .and_then(|p| mesh.position(p))
        .map(|p| line.side(&p).opposite());

    let mut best: Option<(VertexKey, f64)> = None;
    for &k in keys {
        if edge.contains(k) {
            continue;
        }
        let p = mesh.vertices[k].position;
        let Some(side) = line.strict_side(&p) else {
            continue;
        };
        if required.is_some_and(|r| r != side) {
            continue;
        }
        let bulge = line.bulge(&p)?;
        if best.map_or(true, |(_, b)| bulge < b) {
            best = Some((k, bulge));
        }
    }
    Ok(best.map(|(k, _)| k))
}

/// Link the corners of every vertex into rings.
fn link_all(mesh: &mut Mesh) {
    let mut fans: HashMap<VertexKey, Vec<CornerKey>> = HashMap::new();
    for (c, corner) in mesh.corners.iter() {
        fans.entry(corner.vertex).or_default().push(c);
    }
    let vertices: Vec<VertexKey> = mesh.vertex_keys().collect();
    for v in vertices {
        if let Some(fan) = fans.get(&v) {
            mesh.link_fan(fan);
        }
    }
}

fn edge_ids(mesh: &Mesh, edge: Edge) -> (VertexId, VertexId) {
    (mesh.vertices[edge.a].id, mesh.vertices[edge.b].id)
}

fn check_distinct(positions: &[Point2<f64>]) -> Result<()> {
    let mut seen: HashMap<(u64, u64), usize> = HashMap::new();
    for (index, p) in positions.iter().enumerate() {
        // +0.0 and -0.0 are the same position
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        if let Some(&duplicate_of) = seen.get(&key) {
            return Err(MeshError::DuplicatePoint {
                index,
                duplicate_of,
            });
        }
        seen.insert(key, index);
    }
    Ok(())
}

fn check_not_collinear(positions: &[Point2<f64>]) -> Result<()> {
    let a = positions[0];
    let b = positions[1];
    let line = Line2::new(a, b);
    if positions[2..].iter().any(|p| line.strict_side(p).is_some()) {
        Ok(())
    } else {
        Err(MeshError::CollinearPoints)
    }
}
