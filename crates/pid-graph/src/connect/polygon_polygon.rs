//! Polygon-Polygon connector (spec.md §4.2). No level 3: the 1-D overlap
//! rule is Box-Box only.

use nalgebra::Vector2;

use crate::geom::{axis_score, polygon_edges, Shape};
use crate::tolerance::Tolerances;

use super::centroid_perp;
use super::info::{AxisLock, ConnectionInfo, Kind};
use super::wall_to_wall::best_wall_to_wall;

/// `a` and `b` are both polygons (vertex lists, CCW or CW, spec.md §3).
pub fn connect(
    a: &[Vector2<f64>],
    b: &[Vector2<f64>],
    tol: Tolerances,
    axis_lock: AxisLock,
) -> (Vector2<f64>, Vector2<f64>, ConnectionInfo) {
    let shape_a = Shape::Polygon(a.to_vec());
    let shape_b = Shape::Polygon(b.to_vec());
    let bbox_a = shape_a.bbox();
    let bbox_b = shape_b.bbox();
    let edges_a = polygon_edges(a);
    let edges_b = polygon_edges(b);
    let centroid_a = shape_a.centroid();
    let centroid_b = shape_b.centroid();

    // Level 1: perpendicular from A's centroid.
    if let Some((ca, cb, axis)) =
        centroid_perp::best(centroid_a, &edges_a, bbox_a, &edges_b, bbox_b, tol, axis_lock)
    {
        return (ca, cb, ConnectionInfo::new(axis, 1.0, Kind::CentroidPerpA));
    }

    // Level 2: perpendicular from B's centroid.
    if let Some((cb, ca, axis)) =
        centroid_perp::best(centroid_b, &edges_b, bbox_b, &edges_a, bbox_a, tol, axis_lock)
    {
        return (ca, cb, ConnectionInfo::new(axis, 1.0, Kind::CentroidPerpB));
    }

    // Level 4: minimum-diagonality wall-to-wall.
    if let Some((ca, cb, info)) = best_wall_to_wall(&edges_a, &edges_b, tol, axis_lock) {
        return (ca, cb, info);
    }

    let (score, axis) = axis_score(centroid_b - centroid_a);
    (centroid_a, centroid_b, ConnectionInfo::fallback(axis, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_shaped_polygons_match_box_box_scenario_1() {
        let tol = Tolerances::default();
        let a = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(0.0, 10.0),
        ];
        let b = vec![
            Vector2::new(3.0, 40.0),
            Vector2::new(8.0, 40.0),
            Vector2::new(8.0, 50.0),
            Vector2::new(3.0, 50.0),
        ];
        let (ca, cb, info) = connect(&a, &b, tol, None);
        assert_eq!(ca, Vector2::new(5.0, 10.0));
        assert_eq!(cb, Vector2::new(5.0, 40.0));
        assert_eq!(info.axis, crate::geom::Axis::Vertical);
        assert_eq!(info.kind, Kind::CentroidPerpA);
    }

    #[test]
    fn diagonal_polygons_fall_to_wall_to_wall() {
        let tol = Tolerances::default();
        let a = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(0.0, 10.0),
        ];
        let b = vec![
            Vector2::new(40.0, 40.0),
            Vector2::new(50.0, 40.0),
            Vector2::new(50.0, 50.0),
            Vector2::new(40.0, 50.0),
        ];
        let (ca, cb, info) = connect(&a, &b, tol, None);
        assert_eq!(ca, Vector2::new(10.0, 10.0));
        assert_eq!(cb, Vector2::new(40.0, 40.0));
        assert_eq!(info.kind, Kind::WallToWall);
        assert!(info.score < crate::geom::GOOD_EDGE_THRESHOLD);
    }
}
