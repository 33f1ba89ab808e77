//! Property-based tests for spec.md §8: undo round-trip and optimize
//! monotonicity, driven by `proptest` over randomized box layouts and
//! command sequences.

use nalgebra::Vector2;
use pid_graph::prelude::*;
use proptest::prelude::*;

fn box_node(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Node {
    Node::new(id, NodeKind::Equipment, None, Shape::new_box(x1, y1, x2, y2).unwrap())
}

/// A small fixed graph of 4 disjoint boxes, used as the common starting
/// point for the round-trip property.
fn sample_graph() -> Graph {
    let mut g = Graph::new();
    g.add_node(box_node("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
    g.add_node(box_node("b", 3.0, 40.0, 8.0, 50.0)).unwrap();
    g.add_node(box_node("c", 40.0, 40.0, 50.0, 50.0)).unwrap();
    g.add_node(box_node("d", -60.0, -10.0, -50.0, 0.0)).unwrap();
    g
}

#[derive(Clone, Copy, Debug)]
enum Step {
    AddEdge(usize, usize),
    DeleteEdge(usize, usize),
    Drag(usize, f64, f64),
    OptimizeAll,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..4, 0usize..4).prop_map(|(a, b)| Step::AddEdge(a, b)),
        (0usize..4, 0usize..4).prop_map(|(a, b)| Step::DeleteEdge(a, b)),
        (0usize..4, -5.0..5.0f64, -5.0..5.0f64).prop_map(|(n, dx, dy)| Step::Drag(n, dx, dy)),
        Just(Step::OptimizeAll),
    ]
}

fn ids() -> [&'static str; 4] {
    ["a", "b", "c", "d"]
}

/// Applies `step`, ignoring any error (a rejected command is a no-op from
/// the model's perspective and pushes no undo record).
fn apply(graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances, step: Step) {
    let names = ids();
    match step {
        Step::AddEdge(a, b) => {
            let _ = commands::add_edge(graph, undo, tol, names[a], names[b]);
        }
        Step::DeleteEdge(a, b) => {
            let _ = commands::delete_edge(graph, undo, names[a], names[b]);
        }
        Step::Drag(n, dx, dy) => {
            if let Some(node) = graph.node(names[n]) {
                let target = node.centroid() + Vector2::new(dx, dy);
                let _ = commands::drag_node(graph, undo, tol, names[n], target);
            }
        }
        Step::OptimizeAll => {
            commands::optimize_all_bad_edges(graph, undo, tol);
        }
    }
}

fn structurally_equal(a: &Graph, b: &Graph) -> bool {
    if a.node_count() != b.node_count() || a.edge_count() != b.edge_count() {
        return false;
    }
    for node in a.nodes() {
        match b.node(&node.id) {
            Some(other) if (other.centroid() - node.centroid()).norm() < 1e-6 => {}
            _ => return false,
        }
    }
    for edge in a.edges() {
        match b.edge_between(&edge.source, &edge.target) {
            Some(other) => {
                if (other.source_contact - edge.source_contact).norm() > 1e-6
                    || (other.target_contact - edge.target_contact).norm() > 1e-6
                {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

proptest! {
    /// Applying then undoing any sequence of commands restores the graph
    /// to structural equality with the pre-sequence state (spec.md §8
    /// "Undo round-trip").
    #[test]
    fn undo_round_trip(steps in proptest::collection::vec(arb_step(), 0..12)) {
        let tol = Tolerances::default();
        let original = sample_graph();
        let mut graph = original.clone();
        let mut undo = UndoJournal::default();

        let applied = steps.len();
        for step in steps {
            apply(&mut graph, &mut undo, tol, step);
        }

        // Undo exactly as many records as were actually pushed; a
        // rejected command pushes none, so this only ever unwinds real
        // mutations, never more than `applied` steps' worth.
        for _ in 0..applied {
            if undo.is_empty() {
                break;
            }
            undo.undo_last(&mut graph).unwrap();
        }

        prop_assert!(structurally_equal(&graph, &original));
    }

    /// `OptimizeEdge` never decreases the edge's perpendicularity score
    /// under the axis lock derived from its pre-call classification
    /// (spec.md §8 "Optimize monotonicity").
    #[test]
    fn optimize_monotonicity(dx in -30.0..30.0f64, dy in -30.0..30.0f64) {
        let tol = Tolerances::default();
        let mut graph = Graph::new();
        graph.add_node(box_node("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        graph.add_node(box_node("b", 3.0, 40.0, 8.0, 50.0)).unwrap();
        let mut undo = UndoJournal::default();
        commands::add_edge(&mut graph, &mut undo, tol, "a", "b").unwrap();
        let _ = commands::drag_node(&mut graph, &mut undo, tol, "a", Vector2::new(5.0 + dx, 5.0 + dy));

        let before = graph.edge_between("a", "b").unwrap().clone();
        let (score_before, _) = score_edge(before.source_contact, before.target_contact);

        if commands::optimize_edge(&mut graph, &mut undo, tol, "a", "b").is_ok() {
            let after = graph.edge_between("a", "b").unwrap();
            let (score_after, _) = score_edge(after.source_contact, after.target_contact);
            prop_assert!(score_after >= score_before - 1e-9);
        }
    }
}
