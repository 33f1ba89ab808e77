//! C6: the undo journal (spec.md §4.6). Every command produces exactly one
//! reversible record; undoing every record in LIFO order restores the
//! graph to its pre-command state exactly (spec.md §8 "Undo round-trip").

use std::collections::VecDeque;

use nalgebra::Vector2;

use crate::graph::{Edge, Graph, GraphResult, Node};

/// One reversible record per command type (spec.md §4.6).
#[derive(Clone, Debug)]
pub enum UndoRecord {
    AddEdge { a: String, b: String },
    DeleteEdge { edge: Edge },
    SplitEdgeWithConnector { new_id: String, original_edge: Edge },
    AddIsolatedConnector { new_id: String },
    DeleteNode {
        node: Node,
        incident_edges: Vec<Edge>,
        merge_edge: Option<(String, String)>,
    },
    DragNode {
        id: String,
        old_centroid: Vector2<f64>,
        per_edge_old_contacts: Vec<Edge>,
    },
    OptimizeEdge { a: String, b: String, old_contacts: Edge },
    OptimizeAll { records: Vec<UndoRecord> },
}

impl UndoRecord {
    /// Reverses this record against `graph` in place.
    pub fn undo(self, graph: &mut Graph) -> GraphResult<()> {
        match self {
            UndoRecord::AddEdge { a, b } => {
                graph.remove_edge(&a, &b);
                Ok(())
            }
            UndoRecord::DeleteEdge { edge } => {
                graph.insert_edge_unchecked(edge);
                Ok(())
            }
            UndoRecord::SplitEdgeWithConnector { new_id, original_edge } => {
                let (a, b) = original_edge.key();
                graph.remove_edge(&a, &new_id);
                graph.remove_edge(&new_id, &b);
                graph.remove_node(&new_id)?;
                graph.insert_edge_unchecked(original_edge);
                Ok(())
            }
            UndoRecord::AddIsolatedConnector { new_id } => {
                graph.remove_node(&new_id)?;
                Ok(())
            }
            UndoRecord::DeleteNode { node, incident_edges, merge_edge } => {
                if let Some((a, b)) = merge_edge {
                    graph.remove_edge(&a, &b);
                }
                graph.add_node(node)?;
                for edge in incident_edges {
                    graph.insert_edge_unchecked(edge);
                }
                Ok(())
            }
            UndoRecord::DragNode { id, old_centroid, per_edge_old_contacts } => {
                let current = graph
                    .node(&id)
                    .ok_or_else(|| crate::graph::GraphError::NodeMissing(id.clone()))?
                    .centroid();
                let delta = old_centroid - current;
                if let Some(node) = graph.node_mut(&id) {
                    node.translate(delta);
                }
                for edge in per_edge_old_contacts {
                    graph.remove_edge(&edge.source, &edge.target);
                    graph.insert_edge_unchecked(edge);
                }
                Ok(())
            }
            UndoRecord::OptimizeEdge { a, b, old_contacts } => {
                graph.remove_edge(&a, &b);
                graph.insert_edge_unchecked(old_contacts);
                Ok(())
            }
            UndoRecord::OptimizeAll { records } => {
                for record in records.into_iter().rev() {
                    record.undo(graph)?;
                }
                Ok(())
            }
        }
    }
}

/// Bounded deque of records; a new push evicts the oldest entry once the
/// cap is reached (spec.md §4.6 "typical cap 50").
#[derive(Debug)]
pub struct UndoJournal {
    records: VecDeque<UndoRecord>,
    cap: usize,
}

impl UndoJournal {
    pub fn new(cap: usize) -> Self {
        Self { records: VecDeque::with_capacity(cap), cap }
    }

    pub fn push(&mut self, record: UndoRecord) {
        if self.records.len() == self.cap {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Pops and reverses the most recent record, if any.
    pub fn undo_last(&mut self, graph: &mut Graph) -> GraphResult<bool> {
        match self.records.pop_back() {
            Some(record) => {
                record.undo(graph)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for UndoJournal {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;
    use crate::geom::Shape;

    fn point_node(id: &str, x: f64, y: f64) -> Node {
        Node::new(id, NodeKind::Connector, None, Shape::Point(Vector2::new(x, y)))
    }

    #[test]
    fn journal_evicts_oldest_past_cap() {
        let mut journal = UndoJournal::new(2);
        journal.push(UndoRecord::AddIsolatedConnector { new_id: "a".into() });
        journal.push(UndoRecord::AddIsolatedConnector { new_id: "b".into() });
        journal.push(UndoRecord::AddIsolatedConnector { new_id: "c".into() });
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn add_edge_undo_removes_the_edge() {
        let mut graph = Graph::new();
        graph.add_node(point_node("a", 0.0, 0.0)).unwrap();
        graph.add_node(point_node("b", 1.0, 0.0)).unwrap();
        graph.add_edge("a", "b", Vector2::zeros(), Vector2::zeros(), false).unwrap();
        let mut journal = UndoJournal::default();
        journal.push(UndoRecord::AddEdge { a: "a".into(), b: "b".into() });
        journal.undo_last(&mut graph).unwrap();
        assert!(graph.edge_between("a", "b").is_none());
    }
}
