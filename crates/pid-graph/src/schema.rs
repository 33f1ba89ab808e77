//! §6: the JSON load/save schema. This is the only place in `pid-graph`
//! that knows about serialization; the graph model itself has no I/O
//! vocabulary.

use std::collections::HashMap;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::connect;
use crate::geom::Shape;
use crate::graph::{Graph, GraphError, Node, NodeKind, NodeMetadata};
use crate::tolerance::Tolerances;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeTypeField {
    Equipment,
    Connector,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeTypeField,
    /// `[row, column]`; swapped to `(x, y)` on load (spec.md §6).
    pub centroid: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segmentation: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yolo_idx: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub manual: bool,
    /// Preserves unknown fields across load/save (spec.md §6 round-trip).
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_point: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_point: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_terminal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub straight_line_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub manual: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphSummary {
    pub num_edges: usize,
    pub num_isolated_nodes: usize,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
    pub graph: GraphSummary,
}

/// What [`load`] dropped, with a human-readable reason (spec.md §7 "The
/// load step is fault-tolerant: malformed nodes/edges are dropped with a
/// log line").
#[derive(Clone, Debug, PartialEq)]
pub struct LoadWarning {
    pub entity: String,
    pub reason: String,
}

fn node_shape(record: &NodeRecord, tol: Tolerances) -> Result<Shape, GraphError> {
    if let Some(poly) = &record.segmentation {
        if poly.len() >= 6 {
            let vertices: Vec<Vector2<f64>> = poly
                .chunks_exact(2)
                .map(|p| Vector2::new(p[0], p[1]))
                .collect();
            return Shape::new_polygon(vertices, tol)
                .map_err(|e| GraphError::GeometryDegenerate(e.to_string()));
        }
    }
    if let Some([x1, y1, x2, y2]) = record.bbox {
        return Shape::new_box(x1, y1, x2, y2)
            .map_err(|e| GraphError::GeometryDegenerate(e.to_string()));
    }
    let [row, col] = record.centroid;
    Ok(Shape::Point(Vector2::new(col, row)))
}

/// Loads a document into a fresh [`Graph`], dropping malformed entities
/// rather than failing the whole load (spec.md §7).
pub fn load(doc: &Document, tol: Tolerances) -> (Graph, Vec<LoadWarning>) {
    let mut graph = Graph::new();
    let mut warnings = Vec::new();

    for record in &doc.nodes {
        match node_shape(record, tol) {
            Ok(shape) => {
                let kind = match record.kind {
                    NodeTypeField::Equipment => NodeKind::Equipment,
                    NodeTypeField::Connector => NodeKind::Connector,
                };
                let node = Node {
                    id: record.id.clone(),
                    kind,
                    class_id: record.class_id,
                    shape,
                    metadata: NodeMetadata {
                        area: record.area,
                        detection_index: record.yolo_idx,
                        manual: record.manual,
                    },
                };
                if let Err(e) = graph.add_node(node) {
                    tracing::warn!(node = %record.id, error = %e, "dropping duplicate node at load");
                    warnings.push(LoadWarning { entity: record.id.clone(), reason: e.to_string() });
                }
            }
            Err(e) => {
                tracing::warn!(node = %record.id, error = %e, "dropping malformed node at load");
                warnings.push(LoadWarning { entity: record.id.clone(), reason: e.to_string() });
            }
        }
    }

    for link in &doc.links {
        let (Some(source), Some(target)) = (&link.source, &link.target) else {
            tracing::warn!("dropping link with missing source/target");
            warnings.push(LoadWarning {
                entity: link.id.clone().unwrap_or_default(),
                reason: "missing source or target".to_string(),
            });
            continue;
        };
        let contacts = match (link.source_point, link.target_point) {
            (Some([ry, rx]), Some([ty, tx])) => Some((Vector2::new(rx, ry), Vector2::new(tx, ty))),
            _ => None,
        };
        let (source_contact, target_contact, fallback) = match contacts {
            // Contacts supplied by the document are trusted as-is; whether
            // they're exempt from the boundary-contact invariant is
            // whatever a prior save already recorded.
            Some((a, b)) => (a, b, link.fallback),
            None => {
                let Some(a) = graph.node(source) else {
                    warnings.push(LoadWarning { entity: source.clone(), reason: "node missing".into() });
                    continue;
                };
                let Some(b) = graph.node(target) else {
                    warnings.push(LoadWarning { entity: target.clone(), reason: "node missing".into() });
                    continue;
                };
                let (ca, cb, info) = connect::connect(&a.shape, &b.shape, tol, None);
                if info.fallback {
                    tracing::warn!(%source, %target, "connection engine fell back to centroids");
                }
                (ca, cb, info.fallback)
            }
        };
        if let Err(e) = graph.add_edge(source, target, source_contact, target_contact, fallback) {
            tracing::warn!(%source, %target, error = %e, "dropping malformed link at load");
            warnings.push(LoadWarning { entity: format!("{source}-{target}"), reason: e.to_string() });
        }
    }

    (graph, warnings)
}

/// Serializes `graph` back to a [`Document`], recomputing summary fields
/// (spec.md §6 "Writers must update these on save").
pub fn save(graph: &Graph) -> Document {
    let nodes = graph
        .nodes()
        .map(|node| {
            let (row, col) = {
                let c = node.centroid();
                (c.y, c.x)
            };
            let (bbox, segmentation) = match &node.shape {
                Shape::Point(_) => (None, None),
                Shape::Box { min, max } => (Some([min.x, min.y, max.x, max.y]), None),
                Shape::Polygon(vs) => (None, Some(vs.iter().flat_map(|v| [v.x, v.y]).collect())),
            };
            NodeRecord {
                id: node.id.clone(),
                kind: match node.kind {
                    NodeKind::Equipment => NodeTypeField::Equipment,
                    NodeKind::Connector => NodeTypeField::Connector,
                },
                centroid: [row, col],
                area: node.metadata.area,
                bbox,
                segmentation,
                class_id: node.class_id,
                class_name: None,
                yolo_idx: node.metadata.detection_index,
                manual: node.metadata.manual,
                extra: HashMap::new(),
            }
        })
        .collect();

    let links = graph
        .edges()
        .map(|edge| LinkRecord {
            id: None,
            source: Some(edge.source.clone()),
            target: Some(edge.target.clone()),
            source_point: Some([edge.source_contact.y, edge.source_contact.x]),
            target_point: Some([edge.target_contact.y, edge.target_contact.x]),
            length: Some((edge.target_contact - edge.source_contact).norm()),
            is_terminal: edge.metadata.is_terminal,
            color: None,
            straight_line_distance: None,
            manual: edge.metadata.manual,
            fallback: edge.metadata.fallback,
            extra: HashMap::new(),
        })
        .collect();

    Document {
        nodes,
        links,
        graph: GraphSummary {
            num_edges: graph.edge_count(),
            num_isolated_nodes: graph.isolated_node_count(),
            extra: HashMap::new(),
        },
    }
}
