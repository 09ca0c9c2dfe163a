use super::edge::Edge;
use super::node::{Node, NodeKind};
use super::viewport::Viewport;
use crate::error::ImportError;
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The complete persisted unit: the full node list, edge list and viewport.
/// Snapshots are written atomically on save and read atomically on restore
/// or import; there is no partial form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub viewport: Viewport,
}

impl WorkflowSnapshot {
    /// Serializes the snapshot to the interchange JSON format.
    pub fn to_json(&self) -> String {
        // Serialization of a plain data tree cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parses and shape-validates interchange JSON. On any failure the error
    /// describes what was wrong and no snapshot is produced.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let snapshot: WorkflowSnapshot =
            serde_json::from_str(text).map_err(|e| ImportError::JsonParse(e.to_string()))?;
        snapshot.validate_shape()?;
        Ok(snapshot)
    }

    /// Structural checks beyond what deserialization enforces: a non-empty
    /// node list, exactly one input and one output, unique ids, and edge
    /// endpoints that resolve to present nodes.
    pub fn validate_shape(&self) -> Result<(), ImportError> {
        if self.nodes.is_empty() {
            return Err(ImportError::Shape("node list is empty".to_string()));
        }

        for kind in [NodeKind::Input, NodeKind::Output] {
            let count = self.nodes.iter().filter(|n| n.kind == kind).count();
            if count != 1 {
                return Err(ImportError::Shape(format!(
                    "expected exactly one {} node, found {}",
                    kind, count
                )));
            }
        }

        if let Some(id) = self.nodes.iter().map(|n| &n.id).duplicates().next() {
            return Err(ImportError::Shape(format!("duplicate node id '{}'", id)));
        }
        if let Some(id) = self.edges.iter().map(|e| &e.id).duplicates().next() {
            return Err(ImportError::Shape(format!("duplicate edge id '{}'", id)));
        }

        let ids: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(ImportError::Shape(format!(
                        "edge '{}' references missing node '{}'",
                        edge.id, endpoint
                    )));
                }
            }
        }

        Ok(())
    }
}
