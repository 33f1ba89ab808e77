//! Shared level 1/2 logic: "perpendicular from a centroid" (spec.md §4.2).
//!
//! Generalizes the Box-Box rule to any boundary expressible as a list of
//! edges: for a box the two intersections of the probe line with its own
//! boundary are just its min/max side, so this collapses to the Box-Box
//! behavior exactly; for a polygon it picks the boundary crossing nearest
//! the other shape.

use nalgebra::Vector2;

use crate::geom::Axis;
use crate::tolerance::Tolerances;

use super::info::{axis_allowed, AxisLock};
use super::lines::{horizontal_intersections, vertical_intersections};

type Edges = [(usize, Vector2<f64>, Vector2<f64>)];
type Bounds = (Vector2<f64>, Vector2<f64>);

fn vertical(
    probe_x: f64,
    own_edges: &Edges,
    own_bbox: Bounds,
    other_edges: &Edges,
    other_bbox: Bounds,
    tol: Tolerances,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    if probe_x < other_bbox.0.x - tol.eps_len || probe_x > other_bbox.1.x + tol.eps_len {
        return None;
    }
    let own_ints = vertical_intersections(own_edges, probe_x, tol);
    let other_ints = vertical_intersections(other_edges, probe_x, tol);
    if own_ints.is_empty() || other_ints.is_empty() {
        return None;
    }
    if own_bbox.1.y <= other_bbox.0.y {
        let oy = own_ints.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
        let ty = other_ints.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
        Some((Vector2::new(probe_x, oy), Vector2::new(probe_x, ty)))
    } else if other_bbox.1.y <= own_bbox.0.y {
        let oy = own_ints.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
        let ty = other_ints.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
        Some((Vector2::new(probe_x, oy), Vector2::new(probe_x, ty)))
    } else {
        None
    }
}

fn horizontal(
    probe_y: f64,
    own_edges: &Edges,
    own_bbox: Bounds,
    other_edges: &Edges,
    other_bbox: Bounds,
    tol: Tolerances,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    if probe_y < other_bbox.0.y - tol.eps_len || probe_y > other_bbox.1.y + tol.eps_len {
        return None;
    }
    let own_ints = horizontal_intersections(own_edges, probe_y, tol);
    let other_ints = horizontal_intersections(other_edges, probe_y, tol);
    if own_ints.is_empty() || other_ints.is_empty() {
        return None;
    }
    if own_bbox.1.x <= other_bbox.0.x {
        let ox = own_ints.iter().map(|(_, x)| *x).fold(f64::NEG_INFINITY, f64::max);
        let tx = other_ints.iter().map(|(_, x)| *x).fold(f64::INFINITY, f64::min);
        Some((Vector2::new(ox, probe_y), Vector2::new(tx, probe_y)))
    } else if other_bbox.1.x <= own_bbox.0.x {
        let ox = own_ints.iter().map(|(_, x)| *x).fold(f64::INFINITY, f64::min);
        let tx = other_ints.iter().map(|(_, x)| *x).fold(f64::NEG_INFINITY, f64::max);
        Some((Vector2::new(ox, probe_y), Vector2::new(tx, probe_y)))
    } else {
        None
    }
}

/// Best level-1/2 candidate for `probe` (the owner's centroid) against
/// `other`'s boundary. Returns `(contact_own, contact_other, axis)`.
pub fn best(
    probe: Vector2<f64>,
    own_edges: &Edges,
    own_bbox: Bounds,
    other_edges: &Edges,
    other_bbox: Bounds,
    tol: Tolerances,
    axis_lock: AxisLock,
) -> Option<(Vector2<f64>, Vector2<f64>, Axis)> {
    let mut cands: Vec<(Vector2<f64>, Vector2<f64>, Axis)> = Vec::new();
    if axis_allowed(Axis::Vertical, axis_lock) {
        if let Some((co, ct)) = vertical(probe.x, own_edges, own_bbox, other_edges, other_bbox, tol) {
            cands.push((co, ct, Axis::Vertical));
        }
    }
    if axis_allowed(Axis::Horizontal, axis_lock) {
        if let Some((co, ct)) = horizontal(probe.y, own_edges, own_bbox, other_edges, other_bbox, tol) {
            cands.push((co, ct, Axis::Horizontal));
        }
    }
    cands
        .into_iter()
        .min_by(|a, b| (a.1 - a.0).norm().partial_cmp(&(b.1 - b.0).norm()).unwrap())
}
