//! Node shapes: point, axis-aligned box, arbitrary polygon (spec.md §3).

use nalgebra::Vector2;

use crate::tolerance::Tolerances;

use super::segment::point_to_segment;

/// A node's geometric footprint.
///
/// `Box` stores `(min, max)` with `min.x < max.x && min.y < max.y`. `Polygon`
/// stores vertices in order, implicitly closed (`n >= 3`).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(Vector2<f64>),
    Box { min: Vector2<f64>, max: Vector2<f64> },
    Polygon(Vec<Vector2<f64>>),
}

/// Why a shape failed the load-time or construction invariants (spec.md §7,
/// `GeometryDegenerate`).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("box requires x1 < x2 and y1 < y2, got ({x1}, {y1}) .. ({x2}, {y2})")]
    DegenerateBox { x1: f64, y1: f64, x2: f64, y2: f64 },
    #[error("polygon requires at least 3 distinct vertices, got {unique}")]
    DegeneratePolygon { unique: usize },
}

impl Shape {
    /// Construct a box, rejecting degenerate extents (spec.md §7).
    pub fn new_box(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, ShapeError> {
        if !(x1 < x2 && y1 < y2) {
            return Err(ShapeError::DegenerateBox { x1, y1, x2, y2 });
        }
        Ok(Shape::Box {
            min: Vector2::new(x1, y1),
            max: Vector2::new(x2, y2),
        })
    }

    /// Construct a polygon, rejecting fewer than 3 unique vertices (spec.md §7).
    pub fn new_polygon(vertices: Vec<Vector2<f64>>, tol: Tolerances) -> Result<Self, ShapeError> {
        let mut unique: Vec<Vector2<f64>> = Vec::with_capacity(vertices.len());
        for v in &vertices {
            if !unique.iter().any(|u| (u - v).norm_squared() < tol.eps_sq) {
                unique.push(*v);
            }
        }
        if unique.len() < 3 {
            return Err(ShapeError::DegeneratePolygon { unique: unique.len() });
        }
        Ok(Shape::Polygon(vertices))
    }

    /// Centroid: the point itself, the box center, or the arithmetic mean of
    /// vertices (spec.md §3).
    pub fn centroid(&self) -> Vector2<f64> {
        match self {
            Shape::Point(p) => *p,
            Shape::Box { min, max } => (min + max) * 0.5,
            Shape::Polygon(vs) => {
                let sum: Vector2<f64> = vs.iter().fold(Vector2::zeros(), |acc, v| acc + v);
                sum / vs.len() as f64
            }
        }
    }

    /// Axis-aligned bounding box: `(min, max)`. For `Point`, a degenerate box
    /// at the point.
    pub fn bbox(&self) -> (Vector2<f64>, Vector2<f64>) {
        match self {
            Shape::Point(p) => (*p, *p),
            Shape::Box { min, max } => (*min, *max),
            Shape::Polygon(vs) => {
                let mut min = vs[0];
                let mut max = vs[0];
                for v in &vs[1..] {
                    min.x = min.x.min(v.x);
                    min.y = min.y.min(v.y);
                    max.x = max.x.max(v.x);
                    max.y = max.y.max(v.y);
                }
                (min, max)
            }
        }
    }

    /// Translate all coordinates by `delta`, preserving shape (spec.md §3:
    /// "drag" moves a node's coordinates by a translation; all vertices move
    /// by the same vector).
    pub fn translated(&self, delta: Vector2<f64>) -> Shape {
        match self {
            Shape::Point(p) => Shape::Point(p + delta),
            Shape::Box { min, max } => Shape::Box {
                min: min + delta,
                max: max + delta,
            },
            Shape::Polygon(vs) => Shape::Polygon(vs.iter().map(|v| v + delta).collect()),
        }
    }

    /// The box's 4 sides as `(index, a, b)` segments, consistently ordered:
    /// 0 bottom (min.y), 1 right (max.x), 2 top (max.y), 3 left (min.x).
    pub fn box_sides(min: Vector2<f64>, max: Vector2<f64>) -> [(usize, Vector2<f64>, Vector2<f64>); 4] {
        let tl = Vector2::new(min.x, max.y);
        let tr = Vector2::new(max.x, max.y);
        let br = Vector2::new(max.x, min.y);
        let bl = Vector2::new(min.x, min.y);
        [
            (0, bl, br), // bottom
            (1, br, tr), // right
            (2, tr, tl), // top
            (3, tl, bl), // left
        ]
    }

    /// Cyclic boundary edges as `(index, a, b)` segments. Empty for `Point`.
    pub fn boundary_edges(&self) -> Vec<(usize, Vector2<f64>, Vector2<f64>)> {
        match self {
            Shape::Point(_) => Vec::new(),
            Shape::Box { min, max } => Self::box_sides(*min, *max).to_vec(),
            Shape::Polygon(vs) => polygon_edges(vs),
        }
    }

    /// Closest point on the shape's boundary to `p`, plus distance. For
    /// `Point`, the point itself at distance 0 (spec.md §3: contacts on a
    /// `Point` node equal its centroid).
    pub fn closest_boundary_point(&self, p: Vector2<f64>, tol: Tolerances) -> (Vector2<f64>, f64) {
        match self {
            Shape::Point(q) => (*q, (p - q).norm()),
            _ => {
                let edges = self.boundary_edges();
                let mut best = point_to_segment(p, edges[0].1, edges[0].2, tol);
                for (_, a, b) in &edges[1..] {
                    let cand = point_to_segment(p, *a, *b, tol);
                    if cand.1 < best.1 {
                        best = cand;
                    }
                }
                best
            }
        }
    }

    /// Whether `p` lies within `tol.boundary_tol_frac` of the bounding
    /// extent from the shape's boundary (spec.md §8, "Boundary contact").
    pub fn contains_on_boundary(&self, p: Vector2<f64>, tol: Tolerances) -> bool {
        let (min, max) = self.bbox();
        let extent = (max - min).norm().max(tol.eps_len);
        let (_, dist) = self.closest_boundary_point(p, tol);
        dist <= extent * tol.boundary_tol_frac
    }
}

/// Cyclic edges of a polygon's vertex list, each tagged with its index.
pub fn polygon_edges(vs: &[Vector2<f64>]) -> Vec<(usize, Vector2<f64>, Vector2<f64>)> {
    let n = vs.len();
    (0..n).map(|i| (i, vs[i], vs[(i + 1) % n])).collect()
}
