//! One-way synchronization between the store and the canvas.
//!
//! The canvas library keeps its own transient node/edge list; that list is a
//! derived cache of the store, never an authority. `CanvasProjection` models
//! it: `refresh` pulls from the store and skips the update when the cache is
//! already structurally equal, so projection and canvas cannot oscillate.
//! Viewport gestures travel the opposite direction through
//! [`report_viewport_gesture`], which drops echoes that arrive while the
//! store is mid-restore.

use super::WorkflowStore;
use crate::model::{NodeKind, Position, Viewport};

/// What a `refresh` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Updated,
    Unchanged,
}

/// The renderable element for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
}

/// The renderable element for one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The derived rendering cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasProjection {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
    pub viewport: Option<Viewport>,
}

impl CanvasProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derives the cache from the store, skipping the write when nothing
    /// changed structurally. Always acknowledges a pending restore, so the
    /// gesture channel reopens once the canvas reflects the new state.
    pub fn refresh(&mut self, store: &mut WorkflowStore) -> SyncOutcome {
        let nodes: Vec<CanvasNode> = store
            .nodes()
            .iter()
            .map(|n| CanvasNode {
                id: n.id.clone(),
                kind: n.kind,
                position: n.position,
            })
            .collect();
        let edges: Vec<CanvasEdge> = store
            .edges()
            .iter()
            .map(|e| CanvasEdge {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
            })
            .collect();
        let viewport = Some(store.viewport());

        let outcome = if self.nodes == nodes && self.edges == edges && self.viewport == viewport {
            SyncOutcome::Unchanged
        } else {
            self.nodes = nodes;
            self.edges = edges;
            self.viewport = viewport;
            SyncOutcome::Updated
        };

        store.acknowledge_restore();
        outcome
    }
}

/// The canvas→store viewport channel. Returns whether the gesture was
/// applied; echoes during a programmatic restore are ignored so the restored
/// viewport is not immediately overwritten by the canvas's stale one.
pub fn report_viewport_gesture(store: &mut WorkflowStore, viewport: Viewport) -> bool {
    if store.is_restoring() {
        return false;
    }
    store.set_viewport(viewport);
    true
}
