//! Priority level 4: minimum-diagonality wall-to-wall / edge-to-edge search
//! (spec.md §4.2, level 4).

use nalgebra::Vector2;

use crate::geom::{axis_score, closest_between_segments, point_to_segment};
use crate::tolerance::Tolerances;

use super::info::{axis_allowed, AxisLock, ConnectionInfo, Kind};

/// Point-Shape variant of level 4: enumerates `other`'s sides/edges and
/// scores the closest point on each (spec.md §4.2, "Point-Shape connectors
/// ... level 4 enumerates the other shape's sides/edges").
pub fn best_point_to_edges(
    point: Vector2<f64>,
    edges: &[(usize, Vector2<f64>, Vector2<f64>)],
    tol: Tolerances,
    axis_lock: AxisLock,
) -> Option<(Vector2<f64>, ConnectionInfo)> {
    let mut best: Option<(Vector2<f64>, ConnectionInfo, f64, usize)> = None;
    for &(idx, a, b) in edges {
        let (contact, dist) = point_to_segment(point, a, b, tol);
        let (score, axis) = axis_score(contact - point);
        if !axis_allowed(axis, axis_lock) {
            continue;
        }
        let candidate = (contact, ConnectionInfo::new(axis, score, Kind::WallToWall), dist, idx);
        best = Some(match best {
            None => candidate,
            Some(cur) => {
                if point_candidate_better(&candidate, &cur) {
                    candidate
                } else {
                    cur
                }
            }
        });
    }
    best.map(|(contact, info, ..)| (contact, info))
}

fn point_candidate_better(
    cand: &(Vector2<f64>, ConnectionInfo, f64, usize),
    cur: &(Vector2<f64>, ConnectionInfo, f64, usize),
) -> bool {
    if cand.1.score != cur.1.score {
        return cand.1.score > cur.1.score;
    }
    if cand.2 != cur.2 {
        return cand.2 < cur.2;
    }
    cand.3 < cur.3
}

/// Enumerates every `(side_a, side_b)` pair, scores each by `axis_score` of
/// the closest-point vector, and returns the maximizing candidate.
///
/// Tie-break (spec.md §9 Open Question): first by score (max), then by
/// distance (min), then lexicographically by `(sideA_index, sideB_index)`.
pub fn best_wall_to_wall(
    edges_a: &[(usize, Vector2<f64>, Vector2<f64>)],
    edges_b: &[(usize, Vector2<f64>, Vector2<f64>)],
    tol: Tolerances,
    axis_lock: AxisLock,
) -> Option<(Vector2<f64>, Vector2<f64>, ConnectionInfo)> {
    let mut best: Option<(Vector2<f64>, Vector2<f64>, ConnectionInfo, f64, usize, usize)> = None;

    for &(ia, a1, a2) in edges_a {
        for &(ib, b1, b2) in edges_b {
            let (ca, cb, dist) = closest_between_segments(a1, a2, b1, b2, tol);
            let (score, axis) = axis_score(cb - ca);
            if !axis_allowed(axis, axis_lock) {
                continue;
            }
            let candidate = (
                ca,
                cb,
                ConnectionInfo::new(axis, score, Kind::WallToWall),
                dist,
                ia,
                ib,
            );
            best = Some(match best {
                None => candidate,
                Some(cur) => {
                    if is_better(&candidate, &cur) {
                        candidate
                    } else {
                        cur
                    }
                }
            });
        }
    }

    best.map(|(ca, cb, info, ..)| (ca, cb, info))
}

type Candidate = (
    Vector2<f64>,
    Vector2<f64>,
    ConnectionInfo,
    f64,
    usize,
    usize,
);

fn is_better(cand: &Candidate, cur: &Candidate) -> bool {
    let (_, _, ci, di, ia_i, ib_i) = cand;
    let (_, _, cc, dc, ia_c, ib_c) = cur;
    if ci.score != cc.score {
        return ci.score > cc.score;
    }
    if di != dc {
        return di < dc;
    }
    (*ia_i, *ib_i) < (*ia_c, *ib_c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Shape;

    #[test]
    fn diagonal_boxes_pick_facing_corners() {
        let tol = Tolerances::default();
        let a = Shape::new_box(0.0, 0.0, 10.0, 10.0).unwrap();
        let b = Shape::new_box(40.0, 40.0, 50.0, 50.0).unwrap();
        let (min_a, max_a) = a.bbox();
        let (min_b, max_b) = b.bbox();
        let edges_a = Shape::box_sides(min_a, max_a);
        let edges_b = Shape::box_sides(min_b, max_b);
        let (ca, cb, info) =
            best_wall_to_wall(&edges_a, &edges_b, tol, None).expect("some candidate");
        assert!((ca - Vector2::new(10.0, 10.0)).norm() < 1e-9);
        assert!((cb - Vector2::new(40.0, 40.0)).norm() < 1e-9);
        assert!(info.score < crate::geom::GOOD_EDGE_THRESHOLD);
    }
}
