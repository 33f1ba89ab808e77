//! Connection engine result metadata (spec.md §4.2 "Returned `info`").

use std::fmt;

use crate::geom::Axis;

/// Which rule in the priority hierarchy produced a connection (spec.md
/// §4.2). Used as the human-readable `kind` token for testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Level 1: perpendicular from A's centroid.
    CentroidPerpA,
    /// Level 2: perpendicular from B's centroid.
    CentroidPerpB,
    /// Level 3: perpendicular through the 1-D overlap (box-box only).
    OverlapPerp,
    /// Level 3: boxes overlap on both axes.
    Overlapping,
    /// Level 4: minimum-diagonality wall-to-wall / edge-to-edge.
    WallToWall,
    /// No priority level produced a candidate; centroid-to-centroid.
    Fallback,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::CentroidPerpA => "centroid_perp_a",
            Kind::CentroidPerpB => "centroid_perp_b",
            Kind::OverlapPerp => "overlap_perp",
            Kind::Overlapping => "overlapping",
            Kind::WallToWall => "wall_to_wall",
            Kind::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// Metadata returned alongside a contact pair (spec.md §4.2).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionInfo {
    pub axis: Axis,
    pub score: f64,
    pub kind: Kind,
    /// True only for the centroid-to-centroid fallback path (spec.md §4.2
    /// "Edge cases", §7 `Fallback`).
    pub fallback: bool,
}

impl ConnectionInfo {
    pub fn new(axis: Axis, score: f64, kind: Kind) -> Self {
        Self {
            axis,
            score,
            kind,
            fallback: false,
        }
    }

    pub fn fallback(axis: Axis, score: f64) -> Self {
        Self {
            axis,
            score,
            kind: Kind::Fallback,
            fallback: true,
        }
    }

    /// Human-readable axis token (spec.md §4.2: "axis (horizontal/vertical/
    /// diagonal)"). `axis` itself always names the nearer of the two axes,
    /// even for a wall-to-wall contact that isn't really aligned with
    /// either one (e.g. the 45-degree corner-to-corner case); this collapses
    /// that case to "diagonal" for reporting while leaving `axis` available
    /// for axis-lock derivation and the good/bad threshold check.
    pub fn axis_label(&self) -> &'static str {
        if self.score < crate::geom::GOOD_EDGE_THRESHOLD {
            "diagonal"
        } else {
            match self.axis {
                Axis::Horizontal => "horizontal",
                Axis::Vertical => "vertical",
                Axis::Point => "point",
            }
        }
    }
}

/// Axis lock accepted by every connector (spec.md §4.2).
pub type AxisLock = Option<Axis>;

/// Whether `axis` is permitted under `lock` (spec.md §4.2: "filters
/// candidates to that axis only"). `Axis::Point` never satisfies a lock.
pub fn axis_allowed(axis: Axis, lock: AxisLock) -> bool {
    match lock {
        None => true,
        Some(required) => axis == required,
    }
}
