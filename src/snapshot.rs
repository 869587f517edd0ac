//! Graph snapshot export for external consumers
//!
//! The engine hands back keys only; callers enrich them by key lookup. The
//! snapshot bundles that lookup into one serializable value: every node's
//! display attributes, degrees and prerequisite list in insertion order,
//! plus the placeholder diagnostic.

use std::sync::Arc;

use serde::Serialize;

use crate::graph::CurriculumGraph;

/// One node's public view
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub key: Arc<str>,
    pub title: String,
    pub cluster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub in_degree: usize,
    pub out_degree: usize,
    pub prerequisites: Vec<Arc<str>>,
}

/// Serializable view of a whole curriculum graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSummary>,
    /// Keys synthesized for dangling prerequisite references; non-empty
    /// means the source data deserves an audit
    pub placeholders: Vec<Arc<str>>,
}

impl GraphSnapshot {
    pub fn from_graph(graph: &CurriculumGraph) -> Self {
        let nodes = graph
            .node_ids()
            .iter()
            .map(|key| {
                let info = graph.node(key).cloned().unwrap_or_default();
                NodeSummary {
                    key: Arc::clone(key),
                    title: info.title,
                    cluster: info.cluster,
                    level: info.level,
                    in_degree: graph.in_degree(key),
                    out_degree: graph.out_degree(key),
                    prerequisites: graph.predecessors(key).to_vec(),
                }
            })
            .collect();

        Self {
            nodes,
            placeholders: graph.placeholders().to_vec(),
        }
    }
}
