//! Axis classification and perpendicularity scoring (spec.md §4.1, §4.3).

use nalgebra::Vector2;

/// An axis a contact vector can be classified against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Zero-length vector; neither axis applies.
    Point,
}

/// `axis_score(dx, dy) = 1 - min(|dx|, |dy|) / ||(dx, dy)||`.
///
/// Returns the score together with the nearer axis. The zero vector scores
/// 1.0 and is classified `Axis::Point` (spec.md §4.1).
pub fn axis_score(d: Vector2<f64>) -> (f64, Axis) {
    let len = d.norm();
    if len <= 0.0 {
        return (1.0, Axis::Point);
    }
    let (dx, dy) = (d.x.abs(), d.y.abs());
    let s = 1.0 - dx.min(dy) / len;
    let axis = if dx <= dy { Axis::Vertical } else { Axis::Horizontal };
    (s, axis)
}

/// Perpendicularity threshold for "good" edges: `1 - sin(1°) ≈ 0.9998`
/// (spec.md §4.3).
pub const GOOD_EDGE_THRESHOLD: f64 = 0.9998;
