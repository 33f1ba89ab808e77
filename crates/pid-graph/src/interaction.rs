//! C7: editor modes, selection/hover, hit-testing, preview overlays
//! (spec.md §4.7). Pure state; it never mutates the graph directly, it
//! only decides which C5 command a pointer event should become.

use nalgebra::Vector2;

use crate::commands::{self, DragSession, IdGenerator};
use crate::graph::{Graph, GraphResult};
use crate::perpendicularity::{is_good, Stats};
use crate::tolerance::Tolerances;
use crate::undo::UndoJournal;

/// Fixed pixel hit-radius thresholds from the source editor (spec.md
/// §4.7), kept configurable here rather than hardcoded.
#[derive(Clone, Copy, Debug)]
pub struct HitRadii {
    pub node: f64,
    pub edge: f64,
}

impl Default for HitRadii {
    fn default() -> Self {
        Self { node: 20.0, edge: 15.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    AddEdge,
    DeleteEdge,
    AddConnector,
    DeleteNode,
    OptimizeEdge,
    DragNode,
}

/// What the editor would preview or commit on the next click, derived
/// from the current mode and hover state (spec.md §4.7 `AddConnector`).
#[derive(Clone, Debug, PartialEq)]
pub enum Preview {
    None,
    /// Hovering an edge far enough from its contacts to split it.
    Split { edge: (String, String), point: Vector2<f64> },
    /// Hovering empty space with a pending isolated-connector insertion.
    IsolatedConnector { point: Vector2<f64> },
}

/// Observable view state (spec.md §6 "Observable view state"). Renderers
/// read this between commands; no callback may mutate the model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub selected_node: Option<String>,
    pub hovered_node: Option<String>,
    pub hovered_edge: Option<(String, String)>,
}

/// Drives mode-dispatched pointer events into C5 commands (spec.md §4.7).
pub struct Interaction {
    pub mode: Mode,
    pub radii: HitRadii,
    pub view: ViewState,
    drag: Option<DragSession>,
}

impl Interaction {
    pub fn new(mode: Mode) -> Self {
        Self { mode, radii: HitRadii::default(), view: ViewState::default(), drag: None }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.view.selected_node = None;
        self.drag = None;
    }

    pub fn hover(&mut self, graph: &Graph, point: Vector2<f64>) {
        self.view.hovered_node = graph.node_at(point, self.radii.node).map(|h| h.id);
        self.view.hovered_edge = if self.view.hovered_node.is_none() {
            graph.nearest_edge(point, self.radii.edge).map(|h| h.key)
        } else {
            None
        };
    }

    /// Perpendicularity statistics over the whole graph, for a renderer's
    /// status bar (spec.md §6 "Observable view state").
    pub fn stats(&self, graph: &Graph) -> Stats {
        Stats::compute(graph.edges().map(|e| (e.source_contact, e.target_contact)))
    }

    /// Per-edge good/bad classification, keyed the same way `Graph::edges`
    /// exposes edges, for a renderer to color edges individually (spec.md
    /// §6 "Observable view state").
    pub fn edge_classification(&self, graph: &Graph) -> Vec<((String, String), bool)> {
        graph
            .edges()
            .map(|e| {
                let score = graph.perpendicularity_score(&e.source, &e.target).unwrap_or(1.0);
                (e.key(), is_good(score))
            })
            .collect()
    }

    /// Preview for `AddConnector` mode: split if the projection lands
    /// strictly inside the edge (away from its endpoints), otherwise an
    /// isolated connector in empty space.
    pub fn preview(&self, graph: &Graph, point: Vector2<f64>) -> Preview {
        if self.mode != Mode::AddConnector {
            return Preview::None;
        }
        if let Some(hit) = graph.nearest_edge(point, self.radii.edge) {
            return Preview::Split { edge: hit.key, point: hit.projection };
        }
        Preview::IsolatedConnector { point }
    }

    /// `AddEdge`/`DeleteEdge` modes: first click selects, second click on
    /// a different node emits the command, a click in empty space clears
    /// the selection (spec.md §4.7).
    pub fn click_node(
        &mut self,
        graph: &mut Graph,
        undo: &mut UndoJournal,
        tol: Tolerances,
        point: Vector2<f64>,
    ) -> GraphResult<bool> {
        let Some(hit) = graph.node_at(point, self.radii.node) else {
            self.view.selected_node = None;
            return Ok(false);
        };
        match self.view.selected_node.take() {
            None => {
                self.view.selected_node = Some(hit.id);
                Ok(false)
            }
            Some(first) if first != hit.id => {
                match self.mode {
                    Mode::AddEdge => commands::add_edge(graph, undo, tol, &first, &hit.id)?,
                    Mode::DeleteEdge => commands::delete_edge(graph, undo, &first, &hit.id)?,
                    _ => return Ok(false),
                }
                Ok(true)
            }
            Some(first) => {
                // Clicked the same node twice: keep it selected.
                self.view.selected_node = Some(first);
                Ok(false)
            }
        }
    }

    /// `DeleteNode` mode (spec.md §4.7).
    pub fn click_delete_node(&self, graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances, point: Vector2<f64>) -> GraphResult<bool> {
        match graph.node_at(point, self.radii.node) {
            Some(hit) => {
                commands::delete_node(graph, undo, tol, &hit.id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `OptimizeEdge` mode (spec.md §4.7).
    pub fn click_optimize_edge(&self, graph: &mut Graph, undo: &mut UndoJournal, tol: Tolerances, point: Vector2<f64>) -> GraphResult<bool> {
        match graph.nearest_edge(point, self.radii.edge) {
            Some(hit) => {
                commands::optimize_edge(graph, undo, tol, &hit.key.0, &hit.key.1)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `AddConnector` mode: commits whatever [`Interaction::preview`]
    /// would show.
    pub fn click_add_connector(
        &self,
        graph: &mut Graph,
        undo: &mut UndoJournal,
        ids: &mut IdGenerator,
        point: Vector2<f64>,
    ) -> GraphResult<()> {
        match self.preview(graph, point) {
            Preview::Split { edge, point } => {
                commands::split_edge_with_connector(graph, undo, ids, &edge.0, &edge.1, point)?;
            }
            Preview::IsolatedConnector { point } => {
                commands::add_isolated_connector(graph, undo, ids, point);
            }
            Preview::None => {}
        }
        Ok(())
    }

    /// `DragNode` mode: press starts a drag session (spec.md §4.7, §5).
    pub fn drag_start(&mut self, graph: &Graph, id: &str) -> GraphResult<()> {
        self.drag = Some(DragSession::begin(graph, id)?);
        Ok(())
    }

    /// Motion during an active drag; coalesces into the session started
    /// by [`Interaction::drag_start`] (spec.md §5).
    pub fn drag_move(&mut self, graph: &mut Graph, tol: Tolerances, new_centroid: Vector2<f64>) -> GraphResult<()> {
        if let Some(session) = self.drag.as_mut() {
            session.apply(graph, tol, new_centroid)?;
        }
        Ok(())
    }

    /// Release; emits the single coalesced undo record (spec.md §5).
    pub fn drag_end(&mut self, undo: &mut UndoJournal) {
        if let Some(session) = self.drag.take() {
            undo.push(session.finish());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Shape;
    use crate::graph::{Node, NodeKind};

    fn box_node(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Node {
        Node::new(id, NodeKind::Equipment, None, Shape::new_box(x1, y1, x2, y2).unwrap())
    }

    #[test]
    fn add_edge_mode_requires_two_distinct_clicks() {
        let mut graph = Graph::new();
        graph.add_node(box_node("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        graph.add_node(box_node("b", 3.0, 40.0, 8.0, 50.0)).unwrap();
        let mut undo = UndoJournal::default();
        let tol = Tolerances::default();
        let mut it = Interaction::new(Mode::AddEdge);

        let committed = it.click_node(&mut graph, &mut undo, tol, Vector2::new(5.0, 5.0)).unwrap();
        assert!(!committed);
        assert_eq!(it.view.selected_node.as_deref(), Some("a"));

        let committed = it.click_node(&mut graph, &mut undo, tol, Vector2::new(5.0, 45.0)).unwrap();
        assert!(committed);
        assert!(graph.edge_between("a", "b").is_some());
    }

    #[test]
    fn stats_and_classification_reflect_the_graph() {
        let mut graph = Graph::new();
        graph.add_node(box_node("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        graph.add_node(box_node("b", 3.0, 40.0, 8.0, 50.0)).unwrap();
        let mut undo = UndoJournal::default();
        let tol = Tolerances::default();
        let it = Interaction::new(Mode::AddEdge);
        commands::add_edge(&mut graph, &mut undo, tol, "a", "b").unwrap();

        let stats = it.stats(&graph);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.good, 1);

        let classification = it.edge_classification(&graph);
        assert_eq!(classification.len(), 1);
        assert!(classification[0].1);
    }

    #[test]
    fn click_in_empty_space_clears_selection() {
        let mut graph = Graph::new();
        graph.add_node(box_node("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut undo = UndoJournal::default();
        let tol = Tolerances::default();
        let mut it = Interaction::new(Mode::AddEdge);
        it.click_node(&mut graph, &mut undo, tol, Vector2::new(5.0, 5.0)).unwrap();
        it.click_node(&mut graph, &mut undo, tol, Vector2::new(500.0, 500.0)).unwrap();
        assert_eq!(it.view.selected_node, None);
    }
}
