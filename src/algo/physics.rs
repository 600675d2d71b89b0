//! Spring relaxation.
//!
//! Every edge of the mesh is a spring whose rest length was captured when
//! the edge was created. One call to [`step`] runs a fixed number of
//! sub-iterations over the free vertices in a shuffled order, using
//! look-ahead positions (`position + velocity * dt`) for every spring
//! length. Stored positions and velocities are committed together once the
//! last sub-iteration finishes.
//!
//! # Example
//!
//! ```
//! use swingmesh::prelude::*;
//! use swingmesh::algo::physics::{step, PhysicsOptions};
//! use nalgebra::{Point2, Vector2};
//!
//! let points = [
//!     (Point2::new(0.0, 0.0), Physics::Pinned),
//!     (Point2::new(2.0, 0.0), Physics::Pinned),
//!     (Point2::new(1.0, 2.0), Physics::Free),
//! ];
//! let mut mesh = Mesh::build(&points).unwrap();
//!
//! let options = PhysicsOptions::default().with_gravity(Vector2::new(0.0, -0.001));
//! step(&mut mesh, 30.0, &options).unwrap();
//! ```

use std::collections::HashMap;

use nalgebra::{Point2, Vector2};
use rand::seq::SliceRandom;

use crate::error::{MeshError, Result};
use crate::mesh::{Mesh, Physics, VertexKey};

/// Options for the physics step.
#[derive(Debug, Clone)]
pub struct PhysicsOptions {
    /// Number of relaxation passes per step.
    pub sub_iterations: usize,

    /// Constant acceleration applied to every free vertex.
    pub gravity: Vector2<f64>,

    /// Acceleration per unit of spring extension.
    pub spring_constant: f64,

    /// Weight of the previous pass's velocity when blending in a new one.
    pub inertia: f64,

    /// Speed removed from each free vertex after every pass.
    pub damping: f64,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self {
            sub_iterations: 20,
            gravity: Vector2::new(0.0, -0.0002),
            spring_constant: 0.0005,
            inertia: 4.0,
            damping: 0.001,
        }
    }
}

impl PhysicsOptions {
    /// Create options with the specified number of sub-iterations.
    pub fn with_sub_iterations(mut self, sub_iterations: usize) -> Self {
        self.sub_iterations = sub_iterations;
        self
    }

    /// Create options with the specified gravity.
    pub fn with_gravity(mut self, gravity: Vector2<f64>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Create options without gravity.
    pub fn weightless(mut self) -> Self {
        self.gravity = Vector2::zeros();
        self
    }

    /// Create options with the specified spring constant.
    pub fn with_spring_constant(mut self, spring_constant: f64) -> Self {
        self.spring_constant = spring_constant;
        self
    }

    /// Create options with the specified inertia.
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Create options with the specified damping.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Check that every parameter is finite and the scalars non-negative.
    pub fn validate(&self) -> Result<()> {
        if !(self.gravity.x.is_finite() && self.gravity.y.is_finite()) {
            return Err(MeshError::invalid_param(
                "gravity",
                format!("({}, {})", self.gravity.x, self.gravity.y),
                "must be finite",
            ));
        }
        for (name, value) in [
            ("spring_constant", self.spring_constant),
            ("inertia", self.inertia),
            ("damping", self.damping),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MeshError::invalid_param(
                    name,
                    value,
                    "must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// Runs one physics step of length `dt`.
///
/// # Algorithm
///
/// For each of `options.sub_iterations` passes, free vertices are visited
/// in an order shuffled by the mesh's seeded generator. For each vertex:
/// 1. Sum gravity and, per neighbor, `(length - rest) * spring_constant`
///    along the edge, with lengths taken between look-ahead positions
/// 2. `candidate = start_velocity + acceleration * dt`
/// 3. `velocity = (inertia * velocity + candidate) / (inertia + 1)`
/// 4. Shrink the speed by `damping`, stopping at zero
///
/// Pinned vertices keep their position and velocity.
///
/// # Errors
///
/// [`MeshError::InvalidParameter`] if `dt` is negative or not finite, or
/// if the options fail [`PhysicsOptions::validate`]. A zero `dt` does
/// nothing.
pub fn step(mesh: &mut Mesh, dt: f64, options: &PhysicsOptions) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(MeshError::invalid_param(
            "dt",
            dt,
            "must be finite and non-negative",
        ));
    }
    options.validate()?;
    if dt == 0.0 || options.sub_iterations == 0 {
        return Ok(());
    }

    let keys: Vec<VertexKey> = mesh.vertex_keys().collect();
    let index: HashMap<VertexKey, usize> = keys.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let positions: Vec<Point2<f64>> = keys.iter().map(|&v| mesh.vertices[v].position).collect();
    let start: Vec<Vector2<f64>> = keys.iter().map(|&v| mesh.vertices[v].velocity).collect();
    let mut velocities = start.clone();

    // (neighbor index, rest length) per vertex
    let springs: Vec<Vec<(usize, f64)>> = keys
        .iter()
        .map(|&v| {
            mesh.neighbors(v)
                .into_iter()
                .filter_map(|w| {
                    let edge = mesh.edge(v, w)?;
                    Some((*index.get(&w)?, mesh.rest_length_or_distance(edge)))
                })
                .collect()
        })
        .collect();

    let mut order: Vec<usize> = (0..keys.len())
        .filter(|&i| mesh.vertices[keys[i]].physics == Physics::Free)
        .collect();

    for _ in 0..options.sub_iterations {
        order.shuffle(&mut mesh.rng);
        for &i in &order {
            let here = positions[i] + velocities[i] * dt;

            let mut acceleration = options.gravity;
            for &(j, rest) in &springs[i] {
                let d = (positions[j] + velocities[j] * dt) - here;
                let length = d.norm();
                if length > 0.0 {
                    acceleration += d * ((length - rest) * options.spring_constant / length);
                }
            }

            let candidate = start[i] + acceleration * dt;
            let blended = (velocities[i] * options.inertia + candidate) / (options.inertia + 1.0);
            let speed = blended.norm();
            velocities[i] = if speed > options.damping {
                blended * ((speed - options.damping) / speed)
            } else {
                Vector2::zeros()
            };
        }
    }

    for &i in &order {
        let vertex = &mut mesh.vertices[keys[i]];
        vertex.position = positions[i] + velocities[i] * dt;
        vertex.velocity = velocities[i];
    }

    log::trace!(
        "physics step dt = {}: {} free of {} vertices, {} passes",
        dt,
        order.len(),
        keys.len(),
        options.sub_iterations
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshOptions;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sheet(seed: u64) -> Mesh {
        let mut rng = StdRng::seed_from_u64(7);
        let mut points = vec![
            (Point2::new(0.0, 10.0), Physics::Pinned),
            (Point2::new(10.0, 10.0), Physics::Pinned),
        ];
        for _ in 0..30 {
            let p = Point2::new(rng.gen_range(0.5..9.5), rng.gen_range(0.5..9.5));
            points.push((p, Physics::Free));
        }
        Mesh::build_with_options(&points, MeshOptions::default().with_seed(seed)).unwrap()
    }

    fn snapshot(mesh: &Mesh) -> Vec<(VertexKey, Point2<f64>)> {
        mesh.vertices().map(|(v, vertex)| (v, vertex.position())).collect()
    }

    #[test]
    fn test_default_options() {
        let options = PhysicsOptions::default();
        assert_eq!(options.sub_iterations, 20);
        assert!(options.validate().is_ok());
        assert!(options.with_damping(-1.0).validate().is_err());
        assert!(PhysicsOptions::default()
            .with_inertia(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_invalid_dt() {
        let mut mesh = sheet(0);
        assert!(matches!(
            mesh.physics(-1.0),
            Err(MeshError::InvalidParameter { name: "dt", .. })
        ));
        assert!(mesh.physics(f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut mesh = sheet(0);
        let before = snapshot(&mesh);
        mesh.physics(0.0).unwrap();
        assert_eq!(snapshot(&mesh), before);
    }

    #[test]
    fn test_relaxed_mesh_stays_put() {
        let mut mesh = sheet(0);
        let before = snapshot(&mesh);
        step(&mut mesh, 30.0, &PhysicsOptions::default().weightless()).unwrap();
        assert_eq!(snapshot(&mesh), before);
    }

    #[test]
    fn test_gravity_pulls_free_vertices_down() {
        let mut mesh = sheet(0);
        let options = PhysicsOptions::default()
            .with_gravity(Vector2::new(0.0, -0.001))
            .with_spring_constant(0.0001)
            .with_damping(0.0);
        let before: HashMap<VertexKey, Point2<f64>> = snapshot(&mesh).into_iter().collect();

        step(&mut mesh, 30.0, &options).unwrap();

        for (v, vertex) in mesh.vertices() {
            let old = before[&v];
            match vertex.physics() {
                Physics::Pinned => {
                    assert_eq!(vertex.position(), old);
                    assert_eq!(vertex.velocity(), Vector2::zeros());
                }
                Physics::Free => {
                    assert!(vertex.position().y < old.y);
                    assert!(vertex.velocity().y < 0.0);
                }
            }
        }
    }

    #[test]
    fn test_velocity_commits_with_position() {
        let mut mesh = sheet(0);
        let before: HashMap<VertexKey, Point2<f64>> = snapshot(&mesh).into_iter().collect();
        let dt = 30.0;
        mesh.physics(dt).unwrap();

        for (v, vertex) in mesh.vertices() {
            let moved = vertex.position() - before[&v];
            assert_relative_eq!(moved, vertex.velocity() * dt, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut a = sheet(42);
        let mut b = sheet(42);
        for _ in 0..3 {
            a.physics(30.0).unwrap();
            b.physics(30.0).unwrap();
        }
        let positions = |mesh: &Mesh| -> Vec<Point2<f64>> {
            let mut vertices: Vec<_> = mesh.vertices().map(|(_, v)| (v.id(), v.position())).collect();
            vertices.sort_by_key(|&(id, _)| id);
            vertices.into_iter().map(|(_, p)| p).collect()
        };
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_rest_lengths_survive_motion() {
        let mut mesh = sheet(0);
        let edge = mesh.edges()[0];
        let rest = mesh.rest_length(edge).unwrap();
        for _ in 0..5 {
            mesh.physics(30.0).unwrap();
        }
        assert_eq!(mesh.rest_length(edge), Some(rest));
    }

    /// Two pinned base vertices and one free apex.
    fn apex_mesh() -> (Mesh, VertexKey) {
        let points = [
            (Point2::new(0.0, 0.0), Physics::Pinned),
            (Point2::new(2.0, 0.0), Physics::Pinned),
            (Point2::new(1.0, 2.0), Physics::Free),
        ];
        let mesh = Mesh::build(&points).unwrap();
        let apex = mesh
            .vertices()
            .find(|(_, v)| v.physics() == Physics::Free)
            .map(|(k, _)| k)
            .unwrap();
        (mesh, apex)
    }

    #[test]
    fn test_stretched_springs_pull_back() {
        let (mut mesh, apex) = apex_mesh();
        let rest = 5.0_f64.sqrt();
        let options = PhysicsOptions::default().weightless().with_damping(0.0);

        mesh.set_position(apex, Point2::new(1.0, 3.0));
        let stretched = (mesh.position(apex).unwrap() - Point2::origin()).norm() - rest;
        step(&mut mesh, 30.0, &options).unwrap();

        let vertex = mesh.vertex(apex).unwrap();
        // Symmetric springs cancel sideways and pull straight down
        assert_relative_eq!(vertex.position().x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(vertex.velocity().x, 0.0, epsilon = 1e-12);
        assert!(vertex.velocity().y < 0.0);
        assert!(vertex.position().y < 3.0);

        let remaining = (vertex.position() - Point2::origin()).norm() - rest;
        assert!(remaining.abs() < stretched);
    }

    #[test]
    fn test_compressed_springs_push_out() {
        let (mut mesh, apex) = apex_mesh();
        let options = PhysicsOptions::default().weightless().with_damping(0.0);

        mesh.set_position(apex, Point2::new(1.0, 1.5));
        step(&mut mesh, 30.0, &options).unwrap();

        let vertex = mesh.vertex(apex).unwrap();
        assert!(vertex.velocity().y > 0.0);
        assert!(vertex.position().y > 1.5);
    }

    #[test]
    fn test_damping_never_reverses() {
        let (mut mesh, apex) = apex_mesh();
        let initial = Vector2::new(0.0, 0.01);

        for damping in [0.0001, 0.001, 0.05] {
            let (mut mesh, apex) = (mesh.clone(), apex);
            mesh.vertices[apex].velocity = initial;
            let options = PhysicsOptions::default()
                .weightless()
                .with_spring_constant(0.0)
                .with_damping(damping);
            step(&mut mesh, 30.0, &options).unwrap();

            let velocity = mesh.vertex(apex).unwrap().velocity();
            assert_eq!(velocity.x, 0.0);
            assert!(velocity.y >= 0.0, "damping {damping} reversed the vertex");
            assert!(velocity.y < initial.y);
        }

        // Without damping the speed is kept
        mesh.vertices[apex].velocity = initial;
        let options = PhysicsOptions::default()
            .weightless()
            .with_spring_constant(0.0)
            .with_damping(0.0);
        step(&mut mesh, 30.0, &options).unwrap();
        assert_relative_eq!(mesh.vertex(apex).unwrap().velocity(), initial, epsilon = 1e-15);
    }

    #[test]
    fn test_damping_stops_slow_vertices() {
        let mut mesh = sheet(0);
        let options = PhysicsOptions::default()
            .with_gravity(Vector2::new(0.0, -1e-6))
            .with_damping(1.0);
        let before = snapshot(&mesh);
        step(&mut mesh, 30.0, &options).unwrap();
        assert_eq!(snapshot(&mesh), before);
        assert!(mesh.vertices().all(|(_, v)| v.velocity() == Vector2::zeros()));
    }
}
