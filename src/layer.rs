//! Per-layer cardinality rules, deterministic placement and auto-wiring.
//!
//! A layer is the named stage a node kind belongs to. The policy here is the
//! single place the canonical limits live: the input, ensemble and output
//! layers are singletons, generation and validation hold up to five nodes,
//! and context nodes (which take no part in the edge topology) cap at three.

use crate::model::{Edge, Node, NodeKind, Position, Viewport};
use itertools::Itertools;

/// Cardinality rules for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerPolicy {
    pub min_count: usize,
    pub max_count: usize,
    /// Whether the layer's first node may be deleted once it exists.
    pub first_deletable: bool,
}

/// The canonical per-layer limits.
pub const fn layer_policy(kind: NodeKind) -> LayerPolicy {
    match kind {
        NodeKind::Input | NodeKind::Output => LayerPolicy {
            min_count: 1,
            max_count: 1,
            first_deletable: false,
        },
        NodeKind::Ensemble => LayerPolicy {
            min_count: 1,
            max_count: 1,
            first_deletable: false,
        },
        NodeKind::Generation | NodeKind::Validation => LayerPolicy {
            min_count: 1,
            max_count: 5,
            first_deletable: false,
        },
        NodeKind::Context => LayerPolicy {
            min_count: 0,
            max_count: 3,
            first_deletable: true,
        },
    }
}

/// Members of a layer in creation order.
pub fn layer_members<'a>(kind: NodeKind, nodes: &'a [Node]) -> impl Iterator<Item = &'a Node> {
    nodes.iter().filter(move |n| n.kind == kind)
}

/// Position of a validation node within its chain (creation order), or
/// `None` if the id is not a validation node.
pub fn validation_chain_index(node_id: &str, nodes: &[Node]) -> Option<usize> {
    layer_members(NodeKind::Validation, nodes)
        .find_position(|n| n.id == node_id)
        .map(|(idx, _)| idx)
}

/// Why a node may not be deleted, if it is protected.
pub fn deletion_block_reason(node: &Node, nodes: &[Node]) -> Option<&'static str> {
    if node.kind == NodeKind::Output {
        return Some("the output node is fixed");
    }
    let policy = layer_policy(node.kind);
    if !policy.first_deletable {
        let is_first = layer_members(node.kind, nodes)
            .next()
            .is_some_and(|first| first.id == node.id);
        if is_first {
            return Some("the first node of a layer cannot be removed");
        }
    }
    None
}

pub fn is_deletable(node: &Node, nodes: &[Node]) -> bool {
    deletion_block_reason(node, nodes).is_none()
}

/// Only the output node is pinned in place; position patches for it are
/// dropped even when the caller forgets to filter it out.
pub fn is_position_locked(node: &Node) -> bool {
    node.kind == NodeKind::Output
}

const CANVAS_WIDTH: f64 = 1280.0;
const CANVAS_HEIGHT: f64 = 800.0;
const STACK_OFFSET_X: f64 = 40.0;
const STACK_OFFSET_Y: f64 = 120.0;

/// Deterministic placement for a new node: stacked below the layer's last
/// member, or at the viewport center for the layer's first node.
pub fn placement_for(kind: NodeKind, nodes: &[Node], viewport: &Viewport) -> Position {
    match layer_members(kind, nodes).last() {
        Some(last) => Position::new(
            last.position.x + STACK_OFFSET_X,
            last.position.y + STACK_OFFSET_Y,
        ),
        None => {
            let (cx, cy) = viewport.center(CANVAS_WIDTH, CANVAS_HEIGHT);
            Position::new(cx, cy)
        }
    }
}

/// Edges mandated by the topology when a node of `kind` joins the graph.
/// `nodes` is the graph before the addition; pairs are `(source, target)`.
pub fn auto_wire_on_add(
    kind: NodeKind,
    new_id: &str,
    nodes: &[Node],
    _edges: &[Edge],
) -> Vec<(String, String)> {
    match kind {
        NodeKind::Generation => {
            // A generation node feeds the ensemble node as soon as one exists.
            layer_members(NodeKind::Ensemble, nodes)
                .map(|ensemble| (new_id.to_string(), ensemble.id.clone()))
                .collect()
        }
        NodeKind::Ensemble => {
            let mut wires: Vec<(String, String)> = layer_members(NodeKind::Generation, nodes)
                .map(|generation| (generation.id.clone(), new_id.to_string()))
                .collect();
            if let Some(first_validation) = layer_members(NodeKind::Validation, nodes).next() {
                wires.push((new_id.to_string(), first_validation.id.clone()));
            }
            wires
        }
        NodeKind::Validation => {
            // Append to the chain tail, or hang off the ensemble node when
            // this is the chain's first member.
            if let Some(tail) = layer_members(NodeKind::Validation, nodes).last() {
                vec![(tail.id.clone(), new_id.to_string())]
            } else if let Some(ensemble) = layer_members(NodeKind::Ensemble, nodes).next() {
                vec![(ensemble.id.clone(), new_id.to_string())]
            } else {
                Vec::new()
            }
        }
        NodeKind::Input | NodeKind::Output | NodeKind::Context => Vec::new(),
    }
}

/// Bridging edges needed after removing `node` so a sequential layer stays
/// contiguous. Incident-edge removal itself is the store's job.
pub fn rewire_on_remove(node: &Node, _nodes: &[Node], edges: &[Edge]) -> Vec<(String, String)> {
    if node.kind != NodeKind::Validation {
        return Vec::new();
    }

    let predecessor = edges
        .iter()
        .find(|e| e.target == node.id)
        .map(|e| e.source.clone());
    let successor = edges
        .iter()
        .find(|e| e.source == node.id)
        .map(|e| e.target.clone());

    match (predecessor, successor) {
        (Some(pred), Some(succ)) => vec![(pred, succ)],
        _ => Vec::new(),
    }
}
