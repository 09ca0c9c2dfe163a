//! Pure connection validation.
//!
//! The validator decides whether a prospective edge is legal given the full
//! graph state. It never mutates anything and retains no state across calls;
//! the store re-runs it before committing any edge the UI layer proposes.

use crate::layer::{layer_policy, validation_chain_index};
use crate::model::{Edge, Node, NodeKind};
use ahash::AHashMap;

/// Outcome of a connection check. Rejections carry a human-readable reason
/// suitable for a transient user notice.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionVerdict {
    Allowed,
    Rejected { reason: String },
}

impl ConnectionVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ConnectionVerdict::Allowed)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ConnectionVerdict::Allowed => None,
            ConnectionVerdict::Rejected { reason } => Some(reason),
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        ConnectionVerdict::Rejected {
            reason: reason.into(),
        }
    }
}

/// Checks whether a new edge `source -> target` may be added.
pub fn check_connection(
    source_id: &str,
    target_id: &str,
    nodes: &[Node],
    edges: &[Edge],
) -> ConnectionVerdict {
    check(source_id, target_id, nodes, edges, None)
}

/// Checks a reconnection (re-targeting an existing edge). The edge being
/// moved is excluded from the edge set so it cannot block its own new slot.
pub fn check_reconnection(
    source_id: &str,
    target_id: &str,
    nodes: &[Node],
    edges: &[Edge],
    moved_edge_id: &str,
) -> ConnectionVerdict {
    check(source_id, target_id, nodes, edges, Some(moved_edge_id))
}

fn check(
    source_id: &str,
    target_id: &str,
    nodes: &[Node],
    edges: &[Edge],
    excluded_edge: Option<&str>,
) -> ConnectionVerdict {
    // Rule 1: self-loop.
    if source_id == target_id {
        return ConnectionVerdict::rejected("A node cannot connect to itself");
    }

    let Some(source) = nodes.iter().find(|n| n.id == source_id) else {
        return ConnectionVerdict::rejected(format!("Source node '{}' does not exist", source_id));
    };
    let Some(target) = nodes.iter().find(|n| n.id == target_id) else {
        return ConnectionVerdict::rejected(format!("Target node '{}' does not exist", target_id));
    };

    let live_edges: Vec<&Edge> = edges
        .iter()
        .filter(|e| excluded_edge != Some(e.id.as_str()))
        .collect();

    // Rule 2: fixed layer-to-layer topology.
    if let Some(reason) = pair_rejection(source, target, nodes) {
        return ConnectionVerdict::rejected(reason);
    }

    // Rule 3: incoming cardinality of the target.
    let incoming = live_edges.iter().filter(|e| e.target == target_id).count();
    let max_incoming = max_incoming_for(target.kind);
    if incoming >= max_incoming {
        return ConnectionVerdict::rejected(format!(
            "{} nodes accept at most {} incoming connection{}",
            target.kind,
            max_incoming,
            if max_incoming == 1 { "" } else { "s" }
        ));
    }

    // Rule 4: the layered topology should already exclude cycles; this guards
    // against future layer kinds relaxing rule 2.
    if would_create_cycle(source_id, target_id, &live_edges) {
        return ConnectionVerdict::rejected("This connection would create a cycle");
    }

    ConnectionVerdict::Allowed
}

/// Enforces the legal source/target kind pairs: `generation -> ensemble`,
/// `ensemble -> validation(first)`, `validation(i) -> validation(i+1)` and
/// the reserved `input -> output`.
fn pair_rejection(source: &Node, target: &Node, nodes: &[Node]) -> Option<String> {
    match (source.kind, target.kind) {
        (NodeKind::Input, NodeKind::Output) => None,
        (NodeKind::Generation, NodeKind::Ensemble) => None,
        (NodeKind::Ensemble, NodeKind::Validation) => {
            if validation_chain_index(&target.id, nodes) == Some(0) {
                None
            } else {
                Some("The ensemble node may only connect to the first validation node".to_string())
            }
        }
        (NodeKind::Validation, NodeKind::Validation) => {
            let source_idx = validation_chain_index(&source.id, nodes);
            let target_idx = validation_chain_index(&target.id, nodes);
            match (source_idx, target_idx) {
                (Some(s), Some(t)) if t == s + 1 => None,
                _ => Some(
                    "Validation nodes may only connect to their immediate successor in the chain"
                        .to_string(),
                ),
            }
        }
        (s, t) => Some(format!("A {} node cannot connect to a {} node", s, t)),
    }
}

/// How many incoming edges a node of this kind may hold.
fn max_incoming_for(kind: NodeKind) -> usize {
    match kind {
        // Every generation node fans into the single ensemble node.
        NodeKind::Ensemble => layer_policy(NodeKind::Generation).max_count,
        // Chain members and the output node take exactly one feed.
        NodeKind::Validation | NodeKind::Output => 1,
        // No legal pair targets these; rule 2 fires first.
        NodeKind::Input | NodeKind::Generation | NodeKind::Context => 0,
    }
}

/// Simulates adding `source -> target` and walks forward from the target
/// looking for a path back to the source.
fn would_create_cycle(source_id: &str, target_id: &str, edges: &[&Edge]) -> bool {
    let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut stack = vec![target_id];
    let mut visited: Vec<&str> = Vec::new();
    while let Some(current) = stack.pop() {
        if current == source_id {
            return true;
        }
        if visited.contains(&current) {
            continue;
        }
        visited.push(current);
        if let Some(next) = outgoing.get(current) {
            stack.extend(next.iter().copied());
        }
    }
    false
}
