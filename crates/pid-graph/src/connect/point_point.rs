//! Point-Point connector. Not named explicitly in spec.md (which only
//! details Point-Box, Point-Polygon, Box-Box, Box-Polygon, Polygon-Polygon),
//! but two `Connector` nodes with `Point` shape can be linked directly
//! (e.g. two manually inserted waypoints); both contacts are the points
//! themselves.

use nalgebra::Vector2;

use crate::geom::axis_score;

use super::info::ConnectionInfo;
use super::Kind;

pub fn connect(a: Vector2<f64>, b: Vector2<f64>) -> (Vector2<f64>, Vector2<f64>, ConnectionInfo) {
    let (score, axis) = axis_score(b - a);
    (a, b, ConnectionInfo::new(axis, score, Kind::CentroidPerpA))
}
