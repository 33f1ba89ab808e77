//! Error taxonomy for the graph model and edit commands (spec.md §7).

use thiserror::Error;

/// Typed outcome for every mutating graph/command operation. No exception
/// ever crosses this boundary; a failing command leaves the model
/// unchanged.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    NodeMissing(String),

    #[error("edge ({0}, {1}) does not exist")]
    EdgeMissing(String, String),

    #[error("duplicate {0}")]
    Duplicate(String),

    #[error("self-loop on node {0}")]
    SelfLoop(String),

    #[error("geometry degenerate: {0}")]
    GeometryDegenerate(String),
}

/// Result alias used throughout the graph and command layers.
pub type GraphResult<T> = Result<T, GraphError>;
