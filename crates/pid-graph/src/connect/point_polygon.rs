//! Point-Polygon connector (spec.md §4.2, "Point-Shape connectors" and
//! "Polygon-shape connectors"; scenario 3 in spec.md §8).

use nalgebra::Vector2;

use crate::geom::{axis_score, polygon_edges};
use crate::tolerance::Tolerances;

use super::info::{axis_allowed, AxisLock, ConnectionInfo, Kind};
use super::lines::{nearest_to, vertical_intersections, horizontal_intersections};
use super::wall_to_wall::best_point_to_edges;

/// `point` connects to `polygon`. Levels 1-2: does the vertical/horizontal
/// line through `point` cross a polygon edge? Among crossings, pick the one
/// closest to `point`. Level 3 skipped. Level 4 enumerates polygon edges.
pub fn connect(
    point: Vector2<f64>,
    polygon: &[Vector2<f64>],
    tol: Tolerances,
    axis_lock: AxisLock,
) -> (Vector2<f64>, Vector2<f64>, ConnectionInfo) {
    let edges = polygon_edges(polygon);

    let mut candidates: Vec<(Vector2<f64>, f64)> = Vec::new();
    let verticals = vertical_intersections(&edges, point.x, tol);
    if let Some((_, y)) = nearest_to(&verticals, point.y) {
        let contact = Vector2::new(point.x, y);
        candidates.push((contact, (contact - point).norm()));
    }
    let horizontals = horizontal_intersections(&edges, point.y, tol);
    if let Some((_, x)) = nearest_to(&horizontals, point.x) {
        let contact = Vector2::new(x, point.y);
        candidates.push((contact, (contact - point).norm()));
    }

    let best = candidates
        .into_iter()
        .filter(|(contact, _)| axis_allowed(axis_score(contact - point).1, axis_lock))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((contact, _)) = best {
        let (score, axis) = axis_score(contact - point);
        return (point, contact, ConnectionInfo::new(axis, score, Kind::CentroidPerpA));
    }

    if let Some((contact, info)) = best_point_to_edges(point, &edges, tol, axis_lock) {
        return (point, contact, info);
    }

    let sum: Vector2<f64> = polygon.iter().fold(Vector2::zeros(), |acc, v| acc + v);
    let centroid = sum / polygon.len() as f64;
    let (score, axis) = axis_score(centroid - point);
    (point, centroid, ConnectionInfo::fallback(axis, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_above_box_polygon_connects_vertically() {
        let tol = Tolerances::default();
        let poly = vec![
            Vector2::new(20.0, 30.0),
            Vector2::new(30.0, 30.0),
            Vector2::new(30.0, 40.0),
            Vector2::new(20.0, 40.0),
        ];
        let (cp, cpoly, info) = connect(Vector2::new(25.0, 5.0), &poly, tol, None);
        assert_eq!(cp, Vector2::new(25.0, 5.0));
        assert!((cpoly - Vector2::new(25.0, 30.0)).norm() < 1e-9);
        assert_eq!(info.axis, crate::geom::Axis::Vertical);
        assert_eq!(info.score, 1.0);
    }
}
