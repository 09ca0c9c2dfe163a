use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Id of the initial input→output connection created at reset. The store
/// refuses to delete this edge through the normal edge-deletion paths.
pub const RESERVED_EDGE_ID: &str = "edge-input-output";

/// A directed connection between two nodes. Edges express data-flow order;
/// the full edge set must always form a layered, acyclic pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    /// Creates an edge with a fresh unique id.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let suffix: u16 = rand::random();
        Self {
            id: format!("edge-{}-{:04x}", millis, suffix),
            source: source.into(),
            target: target.into(),
        }
    }

    /// The protected initial connection between the input and output nodes.
    pub fn reserved(input_id: impl Into<String>, output_id: impl Into<String>) -> Self {
        Self {
            id: RESERVED_EDGE_ID.to_string(),
            source: input_id.into(),
            target: output_id.into(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.id == RESERVED_EDGE_ID
    }
}
