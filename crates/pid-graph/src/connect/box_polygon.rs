//! Box-Polygon connector (spec.md §4.2). Level 3 (the 1-D overlap rule) is
//! Box-Box only, so this connector goes straight from levels 1-2 to level 4.

use nalgebra::Vector2;

use crate::geom::{axis_score, polygon_edges, Shape};
use crate::tolerance::Tolerances;

use super::centroid_perp;
use super::info::{AxisLock, ConnectionInfo, Kind};
use super::wall_to_wall::best_wall_to_wall;

/// Box `[bmin, bmax]` connecting to `polygon`.
pub fn connect(
    bmin: Vector2<f64>,
    bmax: Vector2<f64>,
    polygon: &[Vector2<f64>],
    tol: Tolerances,
    axis_lock: AxisLock,
) -> (Vector2<f64>, Vector2<f64>, ConnectionInfo) {
    let box_b = (bmin, bmax);
    let poly_shape = Shape::Polygon(polygon.to_vec());
    let poly_bbox = poly_shape.bbox();
    let poly_edges = polygon_edges(polygon);
    let edges_box = Shape::box_sides(bmin, bmax);
    let centroid_box = (bmin + bmax) * 0.5;
    let centroid_poly = poly_shape.centroid();

    // Level 1: perpendicular from the box's centroid.
    if let Some((cbox, cpoly, axis)) = centroid_perp::best(
        centroid_box,
        &edges_box,
        box_b,
        &poly_edges,
        poly_bbox,
        tol,
        axis_lock,
    ) {
        return (cbox, cpoly, ConnectionInfo::new(axis, 1.0, Kind::CentroidPerpA));
    }

    // Level 2: perpendicular from the polygon's centroid.
    if let Some((cpoly, cbox, axis)) = centroid_perp::best(
        centroid_poly,
        &poly_edges,
        poly_bbox,
        &edges_box,
        box_b,
        tol,
        axis_lock,
    ) {
        return (cbox, cpoly, ConnectionInfo::new(axis, 1.0, Kind::CentroidPerpB));
    }

    // Level 4: minimum-diagonality wall-to-wall (no level 3, Box-Box only).
    if let Some((cbox, cpoly, info)) = best_wall_to_wall(&edges_box, &poly_edges, tol, axis_lock) {
        return (cbox, cpoly, info);
    }

    let (score, axis) = axis_score(centroid_poly - centroid_box);
    (centroid_box, centroid_poly, ConnectionInfo::fallback(axis, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_above_polygon_connects_vertically() {
        let tol = Tolerances::default();
        let poly = vec![
            Vector2::new(0.0, 30.0),
            Vector2::new(10.0, 30.0),
            Vector2::new(10.0, 40.0),
            Vector2::new(0.0, 40.0),
        ];
        let (cbox, cpoly, info) = connect(
            Vector2::new(2.0, 0.0),
            Vector2::new(8.0, 10.0),
            &poly,
            tol,
            None,
        );
        assert_eq!(info.kind, Kind::CentroidPerpA);
        assert_eq!(info.axis, crate::geom::Axis::Vertical);
        assert_eq!(cbox.y, 10.0);
        assert_eq!(cpoly.y, 30.0);
    }

    #[test]
    fn axis_lock_excludes_the_other_axis() {
        let tol = Tolerances::default();
        let poly = vec![
            Vector2::new(20.0, 2.0),
            Vector2::new(30.0, 2.0),
            Vector2::new(30.0, 8.0),
            Vector2::new(20.0, 8.0),
        ];
        let (_, _, unlocked) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            &poly,
            tol,
            None,
        );
        assert_eq!(unlocked.axis, crate::geom::Axis::Horizontal);

        let (_, _, locked) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            &poly,
            tol,
            Some(crate::geom::Axis::Vertical),
        );
        assert!(locked.fallback || locked.axis != crate::geom::Axis::Horizontal);
    }
}
