//! Edge type (spec.md §3). Undirected, but the oriented record is kept so
//! callers can tell which contact belongs to which endpoint.

use nalgebra::Vector2;

/// Provenance carried through load/save (spec.md §6 round-trip).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeMetadata {
    pub length: Option<f64>,
    pub is_terminal: bool,
    pub manual: bool,
    /// Set when this edge's contacts came from the connection engine's
    /// centroid-centroid fallback rather than a boundary-respecting level
    /// (spec.md §4.2 "Edge cases", §7 `Fallback`, §8 "Boundary contact").
    /// Exempts the edge from the boundary-contact invariant.
    pub fallback: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub source_contact: Vector2<f64>,
    pub target_contact: Vector2<f64>,
    pub metadata: EdgeMetadata,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        source_contact: Vector2<f64>,
        target_contact: Vector2<f64>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_contact,
            target_contact,
            metadata: EdgeMetadata::default(),
        }
    }

    /// The lexicographically ordered storage key (spec.md §3, §8 "Key
    /// canonicity").
    pub fn key(&self) -> (String, String) {
        canonical_key(&self.source, &self.target)
    }

    /// The contact point belonging to `node_id`, if it's one of this
    /// edge's endpoints.
    pub fn contact_for(&self, node_id: &str) -> Option<Vector2<f64>> {
        if node_id == self.source {
            Some(self.source_contact)
        } else if node_id == self.target {
            Some(self.target_contact)
        } else {
            None
        }
    }

    /// The endpoint on the other side of `node_id`, if it's one of this
    /// edge's endpoints.
    pub fn other(&self, node_id: &str) -> Option<&str> {
        if node_id == self.source {
            Some(&self.target)
        } else if node_id == self.target {
            Some(&self.source)
        } else {
            None
        }
    }
}

pub fn canonical_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_lexicographically_ordered_regardless_of_orientation() {
        let e = Edge::new("b", "a", Vector2::zeros(), Vector2::zeros());
        assert_eq!(e.key(), ("a".to_string(), "b".to_string()));
    }

    #[test]
    fn contact_for_resolves_by_endpoint() {
        let e = Edge::new("a", "b", Vector2::new(1.0, 1.0), Vector2::new(2.0, 2.0));
        assert_eq!(e.contact_for("a"), Some(Vector2::new(1.0, 1.0)));
        assert_eq!(e.contact_for("b"), Some(Vector2::new(2.0, 2.0)));
        assert_eq!(e.contact_for("c"), None);
    }

    #[test]
    fn other_resolves_the_opposite_endpoint() {
        let e = Edge::new("a", "b", Vector2::zeros(), Vector2::zeros());
        assert_eq!(e.other("a"), Some("b"));
        assert_eq!(e.other("b"), Some("a"));
        assert_eq!(e.other("c"), None);
    }
}
