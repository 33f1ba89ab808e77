//! Point-Box connector (spec.md §4.2, "Point-Shape connectors").

use nalgebra::Vector2;

use crate::geom::{axis_score, Shape};
use crate::tolerance::Tolerances;

use super::info::{axis_allowed, AxisLock, ConnectionInfo, Kind};
use super::wall_to_wall::best_point_to_edges;

/// `point` connects to box `[min, max]`. Levels 1-2 collapse to: does the
/// vertical/horizontal line through `point` intersect the box boundary?
/// Level 3 is skipped. Level 4 enumerates the box's 4 sides.
pub fn connect(
    point: Vector2<f64>,
    min: Vector2<f64>,
    max: Vector2<f64>,
    tol: Tolerances,
    axis_lock: AxisLock,
) -> (Vector2<f64>, Vector2<f64>, ConnectionInfo) {
    let mut candidates: Vec<(Vector2<f64>, f64)> = Vec::new();

    if point.x >= min.x - tol.eps_len && point.x <= max.x + tol.eps_len {
        let y = if point.y <= min.y {
            min.y
        } else if point.y >= max.y {
            max.y
        } else if (point.y - min.y).abs() <= (max.y - point.y).abs() {
            min.y
        } else {
            max.y
        };
        candidates.push((Vector2::new(point.x, y), (y - point.y).abs()));
    }
    if point.y >= min.y - tol.eps_len && point.y <= max.y + tol.eps_len {
        let x = if point.x <= min.x {
            min.x
        } else if point.x >= max.x {
            max.x
        } else if (point.x - min.x).abs() <= (max.x - point.x).abs() {
            min.x
        } else {
            max.x
        };
        candidates.push((Vector2::new(x, point.y), (x - point.x).abs()));
    }

    let best = candidates
        .into_iter()
        .filter(|(contact, _)| axis_allowed(axis_score(contact - point).1, axis_lock))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((contact, _)) = best {
        let (score, axis) = axis_score(contact - point);
        return (point, contact, ConnectionInfo::new(axis, score, Kind::CentroidPerpA));
    }

    let edges = Shape::box_sides(min, max);
    if let Some((contact, info)) = best_point_to_edges(point, &edges, tol, axis_lock) {
        return (point, contact, info);
    }

    let centroid = (min + max) * 0.5;
    let (score, axis) = axis_score(centroid - point);
    (point, centroid, ConnectionInfo::fallback(axis, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_left_of_box_connects_horizontally() {
        let tol = Tolerances::default();
        let (cp, cb, info) = connect(
            Vector2::new(-10.0, 5.0),
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            tol,
            None,
        );
        assert_eq!(cp, Vector2::new(-10.0, 5.0));
        assert!((cb - Vector2::new(0.0, 5.0)).norm() < 1e-9);
        assert_eq!(info.score, 1.0);
        assert!(!info.fallback);
    }

    #[test]
    fn point_above_box_connects_vertically() {
        let tol = Tolerances::default();
        let (_, cb, info) = connect(
            Vector2::new(5.0, -10.0),
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            tol,
            None,
        );
        assert!((cb - Vector2::new(5.0, 0.0)).norm() < 1e-9);
        assert_eq!(info.score, 1.0);
    }
}
