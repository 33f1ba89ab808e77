//! C4: the graph model (spec.md §3, §4.4).

use std::collections::{HashMap, HashSet};

use nalgebra::Vector2;

use crate::geom::Shape;
use crate::perpendicularity::score_edge;

use super::edge::{canonical_key, Edge};
use super::error::{GraphError, GraphResult};
use super::node::Node;

/// Nodes, edges, and the derived adjacency/perpendicularity indices
/// (spec.md §3 "Graph").
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: HashMap<String, Node>,
    edges: HashMap<(String, String), Edge>,
    adjacency: HashMap<String, HashSet<String>>,
    perpendicularity: HashMap<(String, String), f64>,
}

/// The nearest node/edge hit within a search radius.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeHit {
    pub id: String,
    pub distance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeHit {
    pub key: (String, String),
    pub distance: f64,
    pub projection: Vector2<f64>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Rejects a duplicate id (spec.md §4.4).
    pub fn add_node(&mut self, node: Node) -> GraphResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::Duplicate(node.id));
        }
        self.adjacency.entry(node.id.clone()).or_default();
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Internal removal used by commands; does not touch incident edges.
    /// Commands use `delete_node` (C5) to handle those consistently.
    pub fn remove_node(&mut self, id: &str) -> GraphResult<Node> {
        let node = self
            .nodes
            .remove(id)
            .ok_or_else(|| GraphError::NodeMissing(id.to_string()))?;
        self.adjacency.remove(id);
        Ok(node)
    }

    /// Rejects a self-loop and a duplicate key; updates adjacency and
    /// perpendicularity (spec.md §4.4). `fallback` should come from the
    /// `ConnectionInfo` that produced `contact_a`/`contact_b`, if any, so
    /// the boundary-contact invariant (spec.md §8) can be checked correctly
    /// downstream.
    pub fn add_edge(
        &mut self,
        a: &str,
        b: &str,
        contact_a: Vector2<f64>,
        contact_b: Vector2<f64>,
        fallback: bool,
    ) -> GraphResult<()> {
        if a == b {
            return Err(GraphError::SelfLoop(a.to_string()));
        }
        if !self.nodes.contains_key(a) {
            return Err(GraphError::NodeMissing(a.to_string()));
        }
        if !self.nodes.contains_key(b) {
            return Err(GraphError::NodeMissing(b.to_string()));
        }
        let key = canonical_key(a, b);
        if self.edges.contains_key(&key) {
            return Err(GraphError::Duplicate(format!("edge ({}, {})", key.0, key.1)));
        }
        let mut edge = Edge::new(a, b, contact_a, contact_b);
        edge.metadata.fallback = fallback;
        self.insert_edge_unchecked(edge);
        Ok(())
    }

    /// Inserts an edge whose key has already been validated as absent
    /// (used by undo-reversal and command internals that recreate an
    /// exact prior edge).
    pub fn insert_edge_unchecked(&mut self, edge: Edge) {
        let key = edge.key();
        self.adjacency.entry(edge.source.clone()).or_default().insert(edge.target.clone());
        self.adjacency.entry(edge.target.clone()).or_default().insert(edge.source.clone());
        let (score, _) = score_edge(edge.source_contact, edge.target_contact);
        self.perpendicularity.insert(key.clone(), score);
        self.edges.insert(key, edge);
    }

    /// No-op outcome if absent (spec.md §4.4): this returns `Ok(None)`
    /// rather than an error so callers that only want "make sure it's
    /// gone" don't have to special-case `EdgeMissing`.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Option<Edge> {
        let key = canonical_key(a, b);
        let edge = self.edges.remove(&key)?;
        self.perpendicularity.remove(&key);
        if let Some(set) = self.adjacency.get_mut(&edge.source) {
            set.remove(&edge.target);
        }
        if let Some(set) = self.adjacency.get_mut(&edge.target) {
            set.remove(&edge.source);
        }
        Some(edge)
    }

    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges.get(&canonical_key(a, b))
    }

    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn degree(&self, id: &str) -> usize {
        self.adjacency.get(id).map_or(0, HashSet::len)
    }

    pub fn is_isolated(&self, id: &str) -> bool {
        self.degree(id) == 0
    }

    /// Count of nodes with degree 0 (spec.md §6 `graph.num_isolated_nodes`).
    pub fn isolated_node_count(&self) -> usize {
        self.nodes.keys().filter(|id| self.is_isolated(id)).count()
    }

    pub fn perpendicularity_score(&self, a: &str, b: &str) -> Option<f64> {
        self.perpendicularity.get(&canonical_key(a, b)).copied()
    }

    /// Nearest node to `(x, y)` within `radius`, by centroid distance
    /// (spec.md §4.4). A linear scan is acceptable at the expected scale.
    pub fn node_at(&self, point: Vector2<f64>, radius: f64) -> Option<NodeHit> {
        self.nodes
            .values()
            .filter_map(|node| {
                let d = (node.centroid() - point).norm();
                (d <= radius).then_some(NodeHit { id: node.id.clone(), distance: d })
            })
            .min_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap())
    }

    /// Nearest edge to `(x, y)` within `radius`, by distance to the
    /// straight segment between its two contact points, plus the
    /// projection point on that segment (spec.md §4.4).
    pub fn nearest_edge(&self, point: Vector2<f64>, radius: f64) -> Option<EdgeHit> {
        self.edges
            .values()
            .filter_map(|edge| {
                let tol = crate::tolerance::Tolerances::default();
                let (proj, dist) =
                    crate::geom::point_to_segment(point, edge.source_contact, edge.target_contact, tol);
                (dist <= radius).then_some(EdgeHit { key: edge.key(), distance: dist, projection: proj })
            })
            .min_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap())
    }
}

/// Convenience used by commands to resolve a node's current shape.
pub fn shape_of(graph: &Graph, id: &str) -> GraphResult<Shape> {
    graph
        .node(id)
        .map(|n| n.shape.clone())
        .ok_or_else(|| GraphError::NodeMissing(id.to_string()))
}
