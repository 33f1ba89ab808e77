//! Interactive graph validation engine for P&ID schematic curation.
//!
//! The engine is a pure, single-threaded model: commands (`commands`)
//! mutate a `graph::Graph`, using `connect` to place contact points and
//! `perpendicularity` to score them; `undo` makes every command
//! reversible; `interaction` turns pointer events into commands;
//! `schema` is the sole I/O boundary (JSON load/save).

pub mod commands;
pub mod connect;
pub mod geom;
pub mod graph;
pub mod interaction;
pub mod perpendicularity;
pub mod schema;
pub mod tolerance;
pub mod undo;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::commands::{self, DragSession, IdGenerator};
    pub use crate::connect::{self, AxisLock, ConnectionInfo, Kind};
    pub use crate::geom::{Axis, Shape};
    pub use crate::graph::{Edge, Graph, GraphError, GraphResult, Node, NodeKind};
    pub use crate::interaction::{HitRadii, Interaction, Mode, Preview, ViewState};
    pub use crate::perpendicularity::{is_good, score_edge, Stats};
    pub use crate::schema::{load, save, Document};
    pub use crate::tolerance::Tolerances;
    pub use crate::undo::{UndoJournal, UndoRecord};
}
