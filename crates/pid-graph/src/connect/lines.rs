//! Shared helpers for the priority-1/2 "perpendicular from a centroid"
//! rules: intersecting an axis-aligned probe line with a shape's boundary.

use nalgebra::Vector2;

use crate::tolerance::Tolerances;

/// Every `y` at which the vertical line `x = x0` crosses one of `edges`.
pub fn vertical_intersections(
    edges: &[(usize, Vector2<f64>, Vector2<f64>)],
    x0: f64,
    tol: Tolerances,
) -> Vec<(usize, f64)> {
    let mut out = Vec::new();
    for (idx, a, b) in edges {
        let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
        if (b.x - a.x).abs() < tol.eps_len {
            if (a.x - x0).abs() < tol.eps_len {
                out.push((*idx, a.y));
                out.push((*idx, b.y));
            }
            continue;
        }
        if x0 >= lo - tol.eps_len && x0 <= hi + tol.eps_len {
            let t = (x0 - a.x) / (b.x - a.x);
            out.push((*idx, a.y + t * (b.y - a.y)));
        }
    }
    out
}

/// Every `x` at which the horizontal line `y = y0` crosses one of `edges`.
pub fn horizontal_intersections(
    edges: &[(usize, Vector2<f64>, Vector2<f64>)],
    y0: f64,
    tol: Tolerances,
) -> Vec<(usize, f64)> {
    let mut out = Vec::new();
    for (idx, a, b) in edges {
        let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
        if (b.y - a.y).abs() < tol.eps_len {
            if (a.y - y0).abs() < tol.eps_len {
                out.push((*idx, a.x));
                out.push((*idx, b.x));
            }
            continue;
        }
        if y0 >= lo - tol.eps_len && y0 <= hi + tol.eps_len {
            let t = (y0 - a.y) / (b.y - a.y);
            out.push((*idx, a.x + t * (b.x - a.x)));
        }
    }
    out
}

/// Picks the intersection value closest to `target`, breaking ties by the
/// lowest edge index (spec.md REDESIGN FLAGS / Open Questions: deterministic
/// tie-breaks).
pub fn nearest_to(candidates: &[(usize, f64)], target: f64) -> Option<(usize, f64)> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = (a.1 - target).abs();
            let db = (b.1 - target).abs();
            da.partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        })
}
