//! Gift-wrapping convex hull.

use nalgebra::Point2;

use super::{normalize_angle, VectorExt, ANGLE_EPSILON};
use crate::error::{MeshError, Result};

/// Computes the convex hull of a point set by gift wrapping.
///
/// Returns indices into `points`, starting at the lowest point (smallest
/// `y`, then smallest `x`) and winding with increasing polar angle, which is
/// counter-clockwise in y-up coordinates. From each hull vertex the next one
/// is the candidate whose polar angle, measured from the current wrapping
/// heading, is smallest. Candidates at the same angle resolve to the
/// nearest, so points lying on a hull edge become hull vertices.
///
/// # Errors
///
/// - [`MeshError::InsufficientPoints`] for fewer than 3 points
/// - [`MeshError::UndefinedAngle`] when two points coincide on the hull
/// - [`MeshError::InvalidState`] if wrapping does not close
///
/// # Example
///
/// ```
/// use swingmesh::geometry::convex_hull;
/// use nalgebra::Point2;
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.4, 0.3), // interior
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// assert_eq!(convex_hull(&points).unwrap(), vec![0, 1, 3, 4]);
/// ```
pub fn convex_hull(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    if points.len() < 3 {
        return Err(MeshError::InsufficientPoints {
            count: points.len(),
        });
    }

    let start = points
        .iter()
        .enumerate()
        .min_by(|(_, p), (_, q)| p.y.total_cmp(&q.y).then(p.x.total_cmp(&q.x)))
        .map(|(i, _)| i)
        .ok_or(MeshError::InsufficientPoints { count: 0 })?;

    let mut hull = vec![start];
    let mut current = start;
    let mut heading = 0.0;

    loop {
        // (index, turn, distance)
        let mut best: Option<(usize, f64, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            if i == current {
                continue;
            }
            let d = p - points[current];
            let mut turn = normalize_angle(d.polar_angle()? - heading);
            if turn > std::f64::consts::TAU - ANGLE_EPSILON {
                turn = 0.0;
            }
            let dist = d.norm();

            let better = match best {
                None => true,
                Some((_, best_turn, best_dist)) => {
                    turn < best_turn - ANGLE_EPSILON
                        || ((turn - best_turn).abs() <= ANGLE_EPSILON && dist < best_dist)
                }
            };
            if better {
                best = Some((i, turn, dist));
            }
        }

        let Some((next, turn, _)) = best else {
            break;
        };
        if next == start {
            break;
        }
        if hull.len() >= points.len() {
            return Err(MeshError::InvalidState(
                "convex hull wrapping did not close".to_string(),
            ));
        }

        heading = normalize_angle(heading + turn);
        hull.push(next);
        current = next;
    }

    Ok(hull)
}
