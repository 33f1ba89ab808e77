//! Geometry primitives (spec.md §4.1, component C1).
//!
//! Purely functional: segment/polygon/box math used by the connection
//! engine (`connect`), the perpendicularity analyzer, and the edit
//! commands. Nothing here mutates a graph.

mod axis;
mod segment;
mod shape;

pub use axis::{axis_score, Axis, GOOD_EDGE_THRESHOLD};
pub use segment::{closest_between_segments, point_to_segment, segments_overlap_1d};
pub use shape::{polygon_edges, Shape, ShapeError};
