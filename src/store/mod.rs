//! The stateful workflow engine.
//!
//! `WorkflowStore` exclusively owns the in-memory graph (nodes, edges,
//! viewport). Every mutation consults the layer policy and the connection
//! validator, then either fully commits or fully no-ops; rejected operations
//! come back as recoverable [`MutationError`] notices and never leave the
//! graph half-applied. The rendering layer is a one-way projection of this
//! state (see [`sync`]), never a second source of truth.

pub mod sync;

use crate::error::{ImportError, MutationError, PersistError};
use crate::layer::{
    auto_wire_on_add, deletion_block_reason, is_position_locked, layer_members, layer_policy,
    placement_for, rewire_on_remove,
};
use crate::model::{Edge, Node, NodeKind, Position, Viewport, WorkflowSnapshot};
use crate::persist::{MemorySnapshotStore, SnapshotStore};
use crate::validator::{check_connection, check_reconnection};

/// Sentinel ids of the two canonical nodes. Fixed ids keep the reserved
/// input→output edge identifiable and make `reset_to_initial_state`
/// reproduce the exact same snapshot every time.
pub const INITIAL_INPUT_ID: &str = "input-root";
pub const INITIAL_OUTPUT_ID: &str = "output-root";

const INITIAL_INPUT_POSITION: Position = Position { x: 120.0, y: 320.0 };
const INITIAL_OUTPUT_POSITION: Position = Position { x: 960.0, y: 320.0 };

/// Result of a delete-key press over the current selection: how many items
/// were removed and how many were protected and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub removed_nodes: usize,
    pub removed_edges: usize,
    pub skipped: usize,
}

pub struct WorkflowStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    viewport: Viewport,
    /// True while a restore/reset/import is replacing state, so viewport-sync
    /// listeners can tell a programmatic change from a canvas echo.
    is_restoring: bool,
    persistence: Box<dyn SnapshotStore>,
}

impl WorkflowStore {
    /// Creates a store at the canonical two-node initial state, backed by the
    /// given persistence bridge.
    pub fn new(persistence: Box<dyn SnapshotStore>) -> Self {
        let mut store = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
            is_restoring: false,
            persistence,
        };
        store.apply_initial_state();
        store.is_restoring = false;
        store
    }

    /// Convenience constructor on an in-memory bridge (tests, host shells).
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySnapshotStore::default()))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_restoring(&self) -> bool {
        self.is_restoring
    }

    /// A point-in-time copy of the full persisted unit.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            viewport: self.viewport,
        }
    }

    /// Adds a node to its layer, at `position` or at the layer's
    /// deterministic spot, and applies the topology's auto-wiring.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        position: Option<Position>,
    ) -> Result<&Node, MutationError> {
        let policy = layer_policy(kind);
        let count = layer_members(kind, &self.nodes).count();
        if count >= policy.max_count {
            return Err(MutationError::CapacityExceeded {
                layer: kind.to_string(),
                max: policy.max_count,
            });
        }

        let position = position.unwrap_or_else(|| placement_for(kind, &self.nodes, &self.viewport));
        let node = Node::new(kind, position);
        let wires = auto_wire_on_add(kind, &node.id, &self.nodes, &self.edges);

        self.nodes.push(node);
        for (source, target) in wires {
            self.edges.push(Edge::new(source, target));
        }
        Ok(&self.nodes[self.nodes.len() - 1])
    }

    /// Removes a node, its incident edges, and re-bridges a sequential layer
    /// across the gap. Fixed and first-of-layer nodes are protected.
    pub fn remove_node(&mut self, id: &str) -> Result<(), MutationError> {
        let node = self
            .nodes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| MutationError::UnknownNode {
                node_id: id.to_string(),
            })?;

        if let Some(reason) = deletion_block_reason(&node, &self.nodes) {
            return Err(MutationError::IllegalDeletion {
                node_id: id.to_string(),
                reason: reason.to_string(),
            });
        }

        let bridges = rewire_on_remove(&node, &self.nodes, &self.edges);
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.source != id && e.target != id);
        for (source, target) in bridges {
            self.edges.push(Edge::new(source, target));
        }
        Ok(())
    }

    /// Commits a caller-approved connection. The store re-validates before
    /// committing; a rejection here is logged and returned without being
    /// surfaced as a fault (the UI already did its own validation pass).
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<&Edge, MutationError> {
        let verdict = check_connection(source, target, &self.nodes, &self.edges);
        if let Some(reason) = verdict.reason() {
            log::warn!(
                "rejected edge {} -> {} at commit time: {}",
                source,
                target,
                reason
            );
            return Err(MutationError::InvalidConnection {
                reason: reason.to_string(),
            });
        }
        self.edges.push(Edge::new(source, target));
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// Re-targets an existing edge, validating against the edge set with the
    /// moved edge excluded.
    pub fn reconnect_edge(
        &mut self,
        edge_id: &str,
        source: &str,
        target: &str,
    ) -> Result<(), MutationError> {
        if !self.edges.iter().any(|e| e.id == edge_id) {
            return Err(MutationError::UnknownEdge {
                edge_id: edge_id.to_string(),
            });
        }
        let verdict = check_reconnection(source, target, &self.nodes, &self.edges, edge_id);
        if let Some(reason) = verdict.reason() {
            return Err(MutationError::InvalidConnection {
                reason: reason.to_string(),
            });
        }
        if let Some(edge) = self.edges.iter_mut().find(|e| e.id == edge_id) {
            edge.source = source.to_string();
            edge.target = target.to_string();
        }
        Ok(())
    }

    /// Removes an edge. The reserved initial input→output edge is protected.
    pub fn remove_edge(&mut self, id: &str) -> Result<(), MutationError> {
        let edge = self
            .edges
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| MutationError::UnknownEdge {
                edge_id: id.to_string(),
            })?;
        if edge.is_reserved() {
            return Err(MutationError::ReservedEdge {
                edge_id: id.to_string(),
            });
        }
        self.edges.retain(|e| e.id != id);
        Ok(())
    }

    /// Bulk position patch from a drag gesture. Position-locked nodes and
    /// unknown ids are silently skipped; edges are untouched.
    pub fn update_node_positions(&mut self, updates: &[(String, Position)]) {
        for (id, position) in updates {
            if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                if is_position_locked(node) {
                    continue;
                }
                node.position = *position;
            }
        }
    }

    /// Replaces the viewport. Debouncing of continuous pan/zoom gestures is a
    /// UI-boundary concern, not the store's.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Writes the current state as one atomic snapshot, overwriting any prior
    /// one (single slot, not versioned).
    pub fn save_current_workflow(&mut self) -> Result<(), PersistError> {
        let snapshot = self.snapshot();
        self.persistence.save(&snapshot)
    }

    /// Replaces in-memory state from the durable snapshot. `is_restoring`
    /// stays set until the projection acknowledges the swap (see
    /// [`sync::CanvasProjection::refresh`]).
    pub fn restore_workflow(&mut self) -> Result<(), MutationError> {
        let snapshot = self.persistence.load().ok_or(MutationError::NoSnapshot)?;
        self.is_restoring = true;
        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
        self.viewport = snapshot.viewport;
        Ok(())
    }

    /// Discards everything and recreates the canonical two-node graph with
    /// the reserved connecting edge at the default viewport.
    pub fn reset_to_initial_state(&mut self) {
        self.apply_initial_state();
    }

    fn apply_initial_state(&mut self) {
        self.is_restoring = true;
        let mut input = Node::new(NodeKind::Input, INITIAL_INPUT_POSITION);
        input.id = INITIAL_INPUT_ID.to_string();
        let mut output = Node::new(NodeKind::Output, INITIAL_OUTPUT_POSITION);
        output.id = INITIAL_OUTPUT_ID.to_string();
        self.edges = vec![Edge::reserved(&input.id, &output.id)];
        self.nodes = vec![input, output];
        self.viewport = Viewport::default();
    }

    /// Serializes the full snapshot to transportable JSON.
    pub fn export_to_json(&self) -> String {
        self.snapshot().to_json()
    }

    /// Parses, shape-validates and commits interchange JSON. On any failure
    /// the store state is left untouched.
    pub fn import_from_json(&mut self, text: &str) -> Result<(), ImportError> {
        let snapshot = WorkflowSnapshot::from_json(text)?;
        self.is_restoring = true;
        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
        self.viewport = snapshot.viewport;
        Ok(())
    }

    /// The delete-key surface: removes every selected node and edge that the
    /// per-layer and reserved-edge rules permit, skipping the rest.
    pub fn delete_selection(&mut self, node_ids: &[String], edge_ids: &[String]) -> SelectionOutcome {
        let mut outcome = SelectionOutcome::default();
        for id in node_ids {
            match self.remove_node(id) {
                Ok(()) => outcome.removed_nodes += 1,
                Err(e) => {
                    log::debug!("selection delete skipped node '{}': {}", id, e);
                    outcome.skipped += 1;
                }
            }
        }
        for id in edge_ids {
            match self.remove_edge(id) {
                Ok(()) => outcome.removed_edges += 1,
                Err(e) => {
                    log::debug!("selection delete skipped edge '{}': {}", id, e);
                    outcome.skipped += 1;
                }
            }
        }
        outcome
    }

    pub(crate) fn acknowledge_restore(&mut self) {
        self.is_restoring = false;
    }
}
