//! Node type (spec.md §3).

use nalgebra::Vector2;

use crate::geom::Shape;

/// `Equipment` is a detected piece of plant; `Connector` is a branch point
/// or user-inserted waypoint, typically `Point`-shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Equipment,
    Connector,
}

/// Optional provenance carried through load/save (spec.md §6 round-trip).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMetadata {
    pub area: Option<f64>,
    pub detection_index: Option<i64>,
    pub manual: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub class_id: Option<i64>,
    pub shape: Shape,
    pub metadata: NodeMetadata,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, class_id: Option<i64>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            kind,
            class_id,
            shape,
            metadata: NodeMetadata::default(),
        }
    }

    /// For `Point`, its own coordinates; for `Box`, the geometric center;
    /// for `Polygon`, the arithmetic mean of vertices (spec.md §3).
    pub fn centroid(&self) -> Vector2<f64> {
        self.shape.centroid()
    }

    /// Translate the node's shape in place by `delta`, preserving shape
    /// (spec.md §3: "drag... all vertices translate by the same vector").
    pub fn translate(&mut self, delta: Vector2<f64>) {
        self.shape = self.shape.translated(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_centroid_is_its_own_coordinates() {
        let node = Node::new("n1", NodeKind::Connector, None, Shape::Point(Vector2::new(3.0, 4.0)));
        assert_eq!(node.centroid(), Vector2::new(3.0, 4.0));
    }

    #[test]
    fn translate_preserves_box_shape() {
        let mut node = Node::new(
            "n1",
            NodeKind::Equipment,
            Some(1),
            Shape::new_box(0.0, 0.0, 10.0, 10.0).unwrap(),
        );
        node.translate(Vector2::new(5.0, -5.0));
        assert_eq!(node.centroid(), Vector2::new(10.0, 0.0));
        match &node.shape {
            Shape::Box { min, max } => {
                assert_eq!(*min, Vector2::new(5.0, -5.0));
                assert_eq!(*max, Vector2::new(15.0, 5.0));
            }
            _ => panic!("expected box"),
        }
    }
}
