//! Common test utilities for building workflow stores and graphs.
use kousei::prelude::*;

/// Creates a store holding a fully wired pipeline:
/// input, 2 generation, ensemble, 2 validation, output.
#[allow(dead_code)]
pub fn create_full_pipeline() -> WorkflowStore {
    let mut store = WorkflowStore::in_memory();
    store.add_node(NodeKind::Generation, None).unwrap();
    store.add_node(NodeKind::Generation, None).unwrap();
    store.add_node(NodeKind::Ensemble, None).unwrap();
    store.add_node(NodeKind::Validation, None).unwrap();
    store.add_node(NodeKind::Validation, None).unwrap();
    store
}

/// The id of the `idx`-th node of a kind, in creation order.
#[allow(dead_code)]
pub fn nth_id(store: &WorkflowStore, kind: NodeKind, idx: usize) -> String {
    store
        .nodes()
        .iter()
        .filter(|n| n.kind == kind)
        .nth(idx)
        .unwrap_or_else(|| panic!("no {} node at index {}", kind, idx))
        .id
        .clone()
}

/// All `(source, target)` pairs currently in the store.
#[allow(dead_code)]
pub fn edge_pairs(store: &WorkflowStore) -> Vec<(String, String)> {
    store
        .edges()
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect()
}

/// Whether exactly one edge runs from `source` to `target`.
#[allow(dead_code)]
pub fn has_single_edge(store: &WorkflowStore, source: &str, target: &str) -> bool {
    store
        .edges()
        .iter()
        .filter(|e| e.source == source && e.target == target)
        .count()
        == 1
}
