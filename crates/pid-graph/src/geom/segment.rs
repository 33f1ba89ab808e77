//! Segment and 1-D overlap primitives (spec.md §4.1, component C1).

use nalgebra::Vector2;

use crate::tolerance::Tolerances;

/// Overlap of two 1-D intervals `[a1,a2]` and `[b1,b2]` (endpoints need not be
/// ordered). Returns `(overlaps, start, end)` on the combined axis.
pub fn segments_overlap_1d(a1: f64, a2: f64, b1: f64, b2: f64) -> (bool, f64, f64) {
    let (alo, ahi) = (a1.min(a2), a1.max(a2));
    let (blo, bhi) = (b1.min(b2), b1.max(b2));
    let lo = alo.max(blo);
    let hi = ahi.min(bhi);
    (lo <= hi, lo, hi)
}

/// Closest point on segment `ab` to `p`, plus the distance. Degenerate
/// segments (`|ab| < eps_len`) collapse to `a`.
pub fn point_to_segment(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    tol: Tolerances,
) -> (Vector2<f64>, f64) {
    let ab = b - a;
    let len = ab.norm();
    if len < tol.eps_len {
        return (a, (p - a).norm());
    }
    let t = ((p - a).dot(&ab) / (len * len)).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (closest, (p - closest).norm())
}

/// Closest pair of points between segments `a1a2` and `b1b2`.
///
/// Considers the four endpoint-to-segment projections and returns the pair
/// with the smallest distance. Ties keep the first candidate encountered, in
/// the order: `a1→b`, `a2→b`, `b1→a`, `b2→a`.
pub fn closest_between_segments(
    a1: Vector2<f64>,
    a2: Vector2<f64>,
    b1: Vector2<f64>,
    b2: Vector2<f64>,
    tol: Tolerances,
) -> (Vector2<f64>, Vector2<f64>, f64) {
    let (cb1, d1) = point_to_segment(a1, b1, b2, tol);
    let (cb2, d2) = point_to_segment(a2, b1, b2, tol);
    let (ca1, d3) = point_to_segment(b1, a1, a2, tol);
    let (ca2, d4) = point_to_segment(b2, a1, a2, tol);

    let candidates = [
        (a1, cb1, d1),
        (a2, cb2, d2),
        (ca1, b1, d3),
        (ca2, b2, d4),
    ];
    let mut best = candidates[0];
    for cand in &candidates[1..] {
        if cand.2 < best.2 {
            best = *cand;
        }
    }
    best
}
