//! Box-Box connector: the fullest expression of the priority hierarchy
//! (spec.md §4.2; scenarios 1 and 2 in §8).

use nalgebra::Vector2;

use crate::geom::{axis_score, segments_overlap_1d, Axis, Shape};
use crate::tolerance::Tolerances;

use super::centroid_perp;
use super::info::{axis_allowed, AxisLock, ConnectionInfo, Kind};
use super::wall_to_wall::best_wall_to_wall;

/// Box `a = [amin, amax]` connecting to box `b = [bmin, bmax]`.
pub fn connect(
    amin: Vector2<f64>,
    amax: Vector2<f64>,
    bmin: Vector2<f64>,
    bmax: Vector2<f64>,
    tol: Tolerances,
    axis_lock: AxisLock,
) -> (Vector2<f64>, Vector2<f64>, ConnectionInfo) {
    let centroid_a = (amin + amax) * 0.5;
    let centroid_b = (bmin + bmax) * 0.5;
    let edges_a = Shape::box_sides(amin, amax);
    let edges_b = Shape::box_sides(bmin, bmax);

    // Level 1: perpendicular from A's centroid.
    if let Some((ca, cb, axis)) =
        centroid_perp::best(centroid_a, &edges_a, (amin, amax), &edges_b, (bmin, bmax), tol, axis_lock)
    {
        return (ca, cb, ConnectionInfo::new(axis, 1.0, Kind::CentroidPerpA));
    }

    // Level 2: perpendicular from B's centroid (contacts come back B-first).
    if let Some((cb, ca, axis)) =
        centroid_perp::best(centroid_b, &edges_b, (bmin, bmax), &edges_a, (amin, amax), tol, axis_lock)
    {
        return (ca, cb, ConnectionInfo::new(axis, 1.0, Kind::CentroidPerpB));
    }

    // Level 3: perpendicular through the 1-D overlap, or overlapping boxes.
    let (ox, oxlo, oxhi) = segments_overlap_1d(amin.x, amax.x, bmin.x, bmax.x);
    let (oy, oylo, oyhi) = segments_overlap_1d(amin.y, amax.y, bmin.y, bmax.y);
    if ox && oy {
        let (score, axis) = axis_score(centroid_b - centroid_a);
        // Centroids are interior points, not boundary ones, so this is
        // marked `fallback` even though it keeps its own `Overlapping`
        // kind; it also still honors `axis_lock` like every other branch
        // here instead of short-circuiting the hierarchy unconditionally.
        if axis_allowed(axis, axis_lock) {
            return (
                centroid_a,
                centroid_b,
                ConnectionInfo { axis, score, kind: Kind::Overlapping, fallback: true },
            );
        }
    }
    if ox && !oy && axis_allowed(Axis::Vertical, axis_lock) {
        let xm = (oxlo + oxhi) * 0.5;
        let (ca, cb) = if amax.y <= bmin.y {
            (Vector2::new(xm, amax.y), Vector2::new(xm, bmin.y))
        } else {
            (Vector2::new(xm, amin.y), Vector2::new(xm, bmax.y))
        };
        return (ca, cb, ConnectionInfo::new(Axis::Vertical, 1.0, Kind::OverlapPerp));
    }
    if oy && !ox && axis_allowed(Axis::Horizontal, axis_lock) {
        let ym = (oylo + oyhi) * 0.5;
        let (ca, cb) = if amax.x <= bmin.x {
            (Vector2::new(amax.x, ym), Vector2::new(bmin.x, ym))
        } else {
            (Vector2::new(amin.x, ym), Vector2::new(bmax.x, ym))
        };
        return (ca, cb, ConnectionInfo::new(Axis::Horizontal, 1.0, Kind::OverlapPerp));
    }

    // Level 4: minimum-diagonality wall-to-wall.
    if let Some((ca, cb, info)) = best_wall_to_wall(&edges_a, &edges_b, tol, axis_lock) {
        return (ca, cb, info);
    }

    let (score, axis) = axis_score(centroid_b - centroid_a);
    (centroid_a, centroid_b, ConnectionInfo::fallback(axis, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_1_purely_vertical() {
        let tol = Tolerances::default();
        let (ca, cb, info) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(3.0, 40.0),
            Vector2::new(8.0, 50.0),
            tol,
            None,
        );
        assert_eq!(ca, Vector2::new(5.0, 10.0));
        assert_eq!(cb, Vector2::new(5.0, 40.0));
        assert_eq!(info.axis, Axis::Vertical);
        assert_eq!(info.score, 1.0);
        assert_eq!(info.kind, Kind::CentroidPerpA);
    }

    #[test]
    fn scenario_2_diagonal_wall_to_wall() {
        let tol = Tolerances::default();
        let (ca, cb, info) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(40.0, 40.0),
            Vector2::new(50.0, 50.0),
            tol,
            None,
        );
        assert_eq!(ca, Vector2::new(10.0, 10.0));
        assert_eq!(cb, Vector2::new(40.0, 40.0));
        assert_eq!(info.kind, Kind::WallToWall);
        assert!(info.score < crate::geom::GOOD_EDGE_THRESHOLD);
    }

    #[test]
    fn overlapping_boxes_return_centroids() {
        let tol = Tolerances::default();
        let (ca, cb, info) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(5.0, 5.0),
            Vector2::new(15.0, 15.0),
            tol,
            None,
        );
        assert_eq!(ca, Vector2::new(5.0, 5.0));
        assert_eq!(cb, Vector2::new(10.0, 10.0));
        assert_eq!(info.kind, Kind::Overlapping);
        // Centroids are interior points for these boxes, so this must be
        // exempt from the boundary-contact invariant via `fallback`.
        assert!(info.fallback);
    }

    #[test]
    fn overlapping_boxes_respect_axis_lock() {
        // Same boxes as `overlapping_boxes_return_centroids`: centroid
        // vector is (5, 5), a tie that resolves to `Vertical`. Locking to
        // `Horizontal` must reject the overlap candidate and fall through
        // to a later level instead of ignoring the lock.
        let tol = Tolerances::default();
        let (_, _, unlocked) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(5.0, 5.0),
            Vector2::new(15.0, 15.0),
            tol,
            None,
        );
        assert_eq!(unlocked.kind, Kind::Overlapping);
        assert_eq!(unlocked.axis, Axis::Vertical);

        let (_, _, locked) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(5.0, 5.0),
            Vector2::new(15.0, 15.0),
            tol,
            Some(Axis::Horizontal),
        );
        assert_ne!(locked.kind, Kind::Overlapping);
        assert!(locked.fallback || locked.axis == Axis::Horizontal);
    }

    #[test]
    fn axis_lock_excludes_the_other_axis_level1_candidate() {
        // Unlocked, A's centroid y lies in B's y-range and they're
        // separated in x: a pure horizontal level-1 candidate. Locking to
        // vertical must reject it.
        let tol = Tolerances::default();
        let (_, _, unlocked) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(40.0, 5.0),
            Vector2::new(50.0, 15.0),
            tol,
            None,
        );
        assert_eq!(unlocked.axis, Axis::Horizontal);

        let (_, _, locked) = connect(
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 10.0),
            Vector2::new(40.0, 5.0),
            Vector2::new(50.0, 15.0),
            tol,
            Some(Axis::Vertical),
        );
        // Either a genuine vertical candidate turned up further down the
        // hierarchy, or there wasn't one and we fell back to the
        // centroid-centroid connection (which ignores the lock).
        assert!(locked.fallback || locked.axis != Axis::Horizontal);
    }
}
