//! C4: typed nodes, undirected edges, adjacency, and spatial hit-testing
//! (spec.md §3, §4.4).

mod edge;
mod error;
mod model;
mod node;

pub use edge::{canonical_key, Edge, EdgeMetadata};
pub use error::{GraphError, GraphResult};
pub use model::{shape_of, EdgeHit, Graph, NodeHit};
pub use node::{Node, NodeKind, NodeMetadata};
