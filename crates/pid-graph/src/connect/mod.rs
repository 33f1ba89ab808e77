//! C2: the connection engine (spec.md §4.2). `connect` double-dispatches on
//! the pair of shapes and runs the priority hierarchy: centroid-perpendicular
//! from each side, the box-box 1-D overlap rule, minimum-diagonality
//! wall-to-wall, and a centroid-centroid fallback that never fails.

mod box_box;
mod box_polygon;
mod centroid_perp;
mod info;
mod lines;
mod point_box;
mod point_point;
mod point_polygon;
mod polygon_polygon;
mod wall_to_wall;

pub use info::{axis_allowed, AxisLock, ConnectionInfo, Kind};

use nalgebra::Vector2;

use crate::geom::Shape;
use crate::tolerance::Tolerances;

/// Connect `a` to `b`, returning `(contact_on_a, contact_on_b, info)`.
///
/// Every shape pair has exactly one implementation; the reversed ordering
/// (e.g. Polygon-Point) runs the same connector with arguments swapped and
/// swaps the returned contacts back.
pub fn connect(
    a: &Shape,
    b: &Shape,
    tol: Tolerances,
    axis_lock: AxisLock,
) -> (Vector2<f64>, Vector2<f64>, ConnectionInfo) {
    match (a, b) {
        (Shape::Point(pa), Shape::Point(pb)) => point_point::connect(*pa, *pb),

        (Shape::Point(p), Shape::Box { min, max }) => point_box::connect(*p, *min, *max, tol, axis_lock),
        (Shape::Box { min, max }, Shape::Point(p)) => {
            let (cb, ca, info) = point_box::connect(*p, *min, *max, tol, axis_lock);
            (ca, cb, info)
        }

        (Shape::Point(p), Shape::Polygon(poly)) => point_polygon::connect(*p, poly, tol, axis_lock),
        (Shape::Polygon(poly), Shape::Point(p)) => {
            let (cb, ca, info) = point_polygon::connect(*p, poly, tol, axis_lock);
            (ca, cb, info)
        }

        (Shape::Box { min: amin, max: amax }, Shape::Box { min: bmin, max: bmax }) => {
            box_box::connect(*amin, *amax, *bmin, *bmax, tol, axis_lock)
        }

        (Shape::Box { min, max }, Shape::Polygon(poly)) => {
            box_polygon::connect(*min, *max, poly, tol, axis_lock)
        }
        (Shape::Polygon(poly), Shape::Box { min, max }) => {
            let (cb, ca, info) = box_polygon::connect(*min, *max, poly, tol, axis_lock);
            (ca, cb, info)
        }

        (Shape::Polygon(pa), Shape::Polygon(pb)) => polygon_polygon::connect(pa, pb, tol, axis_lock),
    }
}
