//! C5: edit commands (spec.md §4.5). Each command is atomic: it either
//! fully applies and pushes exactly one undo record, or leaves the graph
//! unchanged and returns an error.

mod id_gen;

pub use id_gen::IdGenerator;

use nalgebra::Vector2;

use crate::connect::{self, AxisLock};
use crate::geom::{axis_score, Axis, Shape};
use crate::graph::{Edge, Graph, GraphError, GraphResult, Node, NodeKind};
use crate::tolerance::Tolerances;
use crate::undo::{UndoJournal, UndoRecord};

/// Runs the connection engine and surfaces whether it fell back to
/// centroid-centroid contacts, logging a warning when it does (spec.md §7
/// `Fallback`). Every command that creates or recomputes contacts routes
/// through here so the flag reaches the edge it ends up stored on.
fn connect_shapes(
    a: &Shape,
    b: &Shape,
    tol: Tolerances,
    axis_lock: AxisLock,
) -> (Vector2<f64>, Vector2<f64>, bool) {
    let (ca, cb, info) = connect::connect(a, b, tol, axis_lock);
    if info.fallback {
        tracing::warn!(kind = %info.kind, "connection fell back to centroid-centroid contacts");
    }
    (ca, cb, info.fallback)
}

fn node_shape<'a>(graph: &'a Graph, id: &str) -> GraphResult<&'a Shape> {
    graph
        .node(id)
        .map(|n| &n.shape)
        .ok_or_else(|| GraphError::NodeMissing(id.to_string()))
}

/// `AddEdge(a, b)` (spec.md §4.5). No axis lock.
pub fn add_edge(graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances, a: &str, b: &str) -> GraphResult<()> {
    if a == b {
        return Err(GraphError::SelfLoop(a.to_string()));
    }
    if graph.edge_between(a, b).is_some() {
        return Err(GraphError::Duplicate(format!("edge ({a}, {b})")));
    }
    let shape_a = node_shape(graph, a)?.clone();
    let shape_b = node_shape(graph, b)?.clone();
    let (ca, cb, fallback) = connect_shapes(&shape_a, &shape_b, tol, None);
    graph.add_edge(a, b, ca, cb, fallback)?;
    undo.push(UndoRecord::AddEdge { a: a.to_string(), b: b.to_string() });
    Ok(())
}

/// `DeleteEdge(a, b)` (spec.md §4.5). Rejects if absent.
pub fn delete_edge(graph: &mut Graph, undo: &mut UndoJournal, a: &str, b: &str) -> GraphResult<()> {
    let edge = graph
        .edge_between(a, b)
        .cloned()
        .ok_or_else(|| GraphError::EdgeMissing(a.to_string(), b.to_string()))?;
    graph.remove_edge(a, b);
    undo.push(UndoRecord::DeleteEdge { edge });
    Ok(())
}

/// `SplitEdgeWithConnector(edge, point)` (spec.md §4.5). Original contacts
/// on `a` and `b` are preserved exactly; only the new point-to-point
/// contacts at the inserted connector are computed.
pub fn split_edge_with_connector(
    graph: &mut Graph,
    undo: &mut UndoJournal,
    ids: &mut IdGenerator,
    a: &str,
    b: &str,
    point: Vector2<f64>,
) -> GraphResult<String> {
    let original_edge = graph
        .edge_between(a, b)
        .cloned()
        .ok_or_else(|| GraphError::EdgeMissing(a.to_string(), b.to_string()))?;
    let (ca, cb) = (original_edge.source_contact, original_edge.target_contact);
    let (source, target) = (original_edge.source.clone(), original_edge.target.clone());
    // The endpoint contacts are carried over verbatim, so whichever half of
    // the original edge that endpoint belonged to still governs whether it
    // was ever boundary-guaranteed.
    let fallback = original_edge.metadata.fallback;

    let new_id = ids.next_id();
    graph.remove_edge(a, b);
    graph.add_node(Node {
        metadata: crate::graph::NodeMetadata { manual: true, ..Default::default() },
        ..Node::new(new_id.clone(), NodeKind::Connector, None, Shape::Point(point))
    })?;
    graph.add_edge(&source, &new_id, ca, point, fallback)?;
    graph.add_edge(&new_id, &target, point, cb, fallback)?;

    undo.push(UndoRecord::SplitEdgeWithConnector { new_id: new_id.clone(), original_edge });
    Ok(new_id)
}

/// `AddIsolatedConnector(point)` (spec.md §4.5). Always succeeds.
pub fn add_isolated_connector(
    graph: &mut Graph,
    undo: &mut UndoJournal,
    ids: &mut IdGenerator,
    point: Vector2<f64>,
) -> String {
    let new_id = ids.next_id();
    let node = Node {
        metadata: crate::graph::NodeMetadata { manual: true, ..Default::default() },
        ..Node::new(new_id.clone(), NodeKind::Connector, None, Shape::Point(point))
    };
    graph.add_node(node).expect("freshly generated id cannot collide");
    undo.push(UndoRecord::AddIsolatedConnector { new_id: new_id.clone() });
    new_id
}

/// `DeleteNode(id)` (spec.md §4.5). A degree-2 `Connector` is merged away;
/// its two neighbors are reconnected with fresh `AddEdge` semantics.
pub fn delete_node(graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances, id: &str) -> GraphResult<()> {
    let node = graph.node(id).cloned().ok_or_else(|| GraphError::NodeMissing(id.to_string()))?;
    let neighbor_ids: Vec<String> = graph.neighbors(id).map(str::to_string).collect();
    let incident_edges: Vec<Edge> = neighbor_ids
        .iter()
        .filter_map(|n| graph.edge_between(id, n).cloned())
        .collect();

    let is_mergeable_connector = node.kind == NodeKind::Connector && neighbor_ids.len() == 2;

    for n in &neighbor_ids {
        graph.remove_edge(id, n);
    }
    graph.remove_node(id)?;

    let merge_edge = if is_mergeable_connector {
        let n1 = &neighbor_ids[0];
        let n2 = &neighbor_ids[1];
        let shape1 = node_shape(graph, n1)?.clone();
        let shape2 = node_shape(graph, n2)?.clone();
        let (c1, c2, fallback) = connect_shapes(&shape1, &shape2, tol, None);
        graph.add_edge(n1, n2, c1, c2, fallback)?;
        Some((n1.clone(), n2.clone()))
    } else {
        None
    };

    undo.push(UndoRecord::DeleteNode { node, incident_edges, merge_edge });
    Ok(())
}

/// Recomputes the contacts of every edge incident to `id` against `shape`
/// (the node's current, already-translated shape), using no axis lock
/// (spec.md §4.5 `DragNode`, §4.2).
fn recompute_incident_contacts(graph: &mut Graph, tol: Tolerances, id: &str) -> GraphResult<()> {
    let neighbor_ids: Vec<String> = graph.neighbors(id).map(str::to_string).collect();
    let own_shape = node_shape(graph, id)?.clone();
    for n in neighbor_ids {
        let other_shape = node_shape(graph, &n)?.clone();
        let edge = graph.edge_between(id, &n).cloned().expect("neighbor implies edge");
        let (own_contact, other_contact, fallback) = connect_shapes(&own_shape, &other_shape, tol, None);
        let (source_contact, target_contact) = if edge.source == id {
            (own_contact, other_contact)
        } else {
            (other_contact, own_contact)
        };
        graph.remove_edge(id, &n);
        graph.insert_edge_unchecked(Edge {
            source: edge.source,
            target: edge.target,
            source_contact,
            target_contact,
            metadata: crate::graph::EdgeMetadata { fallback, ..edge.metadata },
        });
    }
    Ok(())
}

/// `DragNode(id, new_centroid)` (spec.md §4.5). Translates the node and
/// recomputes every incident edge's contacts with no axis lock. This is
/// the single-step form; see [`DragSession`] for pointer-motion coalescing
/// (spec.md §5).
pub fn drag_node(graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances, id: &str, new_centroid: Vector2<f64>) -> GraphResult<()> {
    let mut session = DragSession::begin(graph, id)?;
    session.apply(graph, tol, new_centroid)?;
    undo.push(session.finish());
    Ok(())
}

/// Captures pre-drag state once, then lets many motion events mutate the
/// live model while coalescing into a single undo record at release
/// (spec.md §5 "Drag coalescing").
pub struct DragSession {
    id: String,
    old_centroid: Vector2<f64>,
    old_edges: Vec<Edge>,
}

impl DragSession {
    pub fn begin(graph: &Graph, id: &str) -> GraphResult<Self> {
        let node = graph.node(id).ok_or_else(|| GraphError::NodeMissing(id.to_string()))?;
        let old_edges: Vec<Edge> = graph
            .neighbors(id)
            .filter_map(|n| graph.edge_between(id, n).cloned())
            .collect();
        Ok(Self { id: id.to_string(), old_centroid: node.centroid(), old_edges })
    }

    /// Applies one motion event: moves the node to `new_centroid` and
    /// recomputes incident contacts. Does not touch the undo journal.
    pub fn apply(&mut self, graph: &mut Graph, tol: Tolerances, new_centroid: Vector2<f64>) -> GraphResult<()> {
        let current = graph.node(&self.id).ok_or_else(|| GraphError::NodeMissing(self.id.clone()))?.centroid();
        let delta = new_centroid - current;
        graph.node_mut(&self.id).expect("checked above").translate(delta);
        recompute_incident_contacts(graph, tol, &self.id)
    }

    /// Ends the drag, producing the single undo record for the whole
    /// motion (spec.md §5).
    pub fn finish(self) -> UndoRecord {
        UndoRecord::DragNode {
            id: self.id,
            old_centroid: self.old_centroid,
            per_edge_old_contacts: self.old_edges,
        }
    }
}

/// Derives the axis lock from an edge's current contact vector (spec.md
/// §4.5 `OptimizeEdge`, §9 Open Question): ties and degenerate (zero
/// length) vectors both resolve to `Axis::Vertical`, matching
/// `axis_score`'s own tie-break.
pub fn derive_axis_lock(edge: &Edge) -> Axis {
    let (_, axis) = axis_score(edge.target_contact - edge.source_contact);
    match axis {
        Axis::Point => Axis::Vertical,
        other => other,
    }
}

/// Applies `OptimizeEdge(a, b)` and returns its undo record directly,
/// without touching a journal. Shared by [`optimize_edge`] and
/// [`optimize_all_bad_edges`], which differ only in how the record is
/// filed.
fn optimize_edge_record(graph: &mut Graph, tol: Tolerances, a: &str, b: &str) -> GraphResult<UndoRecord> {
    let old_contacts = graph
        .edge_between(a, b)
        .cloned()
        .ok_or_else(|| GraphError::EdgeMissing(a.to_string(), b.to_string()))?;
    let lock: AxisLock = Some(derive_axis_lock(&old_contacts));

    let shape_a = node_shape(graph, &old_contacts.source)?.clone();
    let shape_b = node_shape(graph, &old_contacts.target)?.clone();
    let (source_contact, target_contact, fallback) = connect_shapes(&shape_a, &shape_b, tol, lock);

    graph.remove_edge(a, b);
    graph.insert_edge_unchecked(Edge {
        source: old_contacts.source.clone(),
        target: old_contacts.target.clone(),
        source_contact,
        target_contact,
        metadata: crate::graph::EdgeMetadata { fallback, ..old_contacts.metadata.clone() },
    });
    Ok(UndoRecord::OptimizeEdge { a: a.to_string(), b: b.to_string(), old_contacts })
}

/// `OptimizeEdge(a, b)` (spec.md §4.5). Axis lock is derived from the
/// edge's current classification so the optimize never flips a nominally
/// vertical edge to horizontal (spec.md §8 "Optimize monotonicity").
pub fn optimize_edge(graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances, a: &str, b: &str) -> GraphResult<()> {
    let record = optimize_edge_record(graph, tol, a, b)?;
    undo.push(record);
    Ok(())
}

/// `OptimizeAllBadEdges()` (spec.md §4.5). Returns the count optimized and
/// records a single compound undo containing the per-edge reversals in
/// reverse application order (reversal happens naturally: `OptimizeAll`'s
/// own `undo` walks `records` back to front).
pub fn optimize_all_bad_edges(graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances) -> usize {
    use crate::perpendicularity::is_good;

    let bad_keys: Vec<(String, String)> = graph
        .edges()
        .filter(|e| !is_good(graph.perpendicularity_score(&e.source, &e.target).unwrap_or(1.0)))
        .map(|e| e.key())
        .collect();

    let mut records = Vec::with_capacity(bad_keys.len());
    for (a, b) in &bad_keys {
        if let Ok(record) = optimize_edge_record(graph, tol, a, b) {
            records.push(record);
        }
    }

    let optimized = records.len();
    if optimized > 0 {
        undo.push(UndoRecord::OptimizeAll { records });
    }
    optimized
}
