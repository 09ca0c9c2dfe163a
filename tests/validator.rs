//! Connection validator rules, in order of evaluation.
mod common;
use common::*;
use kousei::prelude::*;

#[test]
fn test_self_loop_rejected() {
    let store = create_full_pipeline();
    let generation = nth_id(&store, NodeKind::Generation, 0);

    let verdict = check_connection(&generation, &generation, store.nodes(), store.edges());
    assert!(!verdict.is_allowed());
    assert!(verdict.reason().unwrap().contains("itself"));
}

#[test]
fn test_generation_to_validation_skipping_ensemble_rejected() {
    let store = create_full_pipeline();
    let generation = nth_id(&store, NodeKind::Generation, 0);
    let validation = nth_id(&store, NodeKind::Validation, 0);

    let verdict = check_connection(&generation, &validation, store.nodes(), store.edges());
    assert!(!verdict.is_allowed());
    assert!(verdict.reason().unwrap().contains("generation"));
}

#[test]
fn test_second_incoming_edge_on_chain_node_rejected() {
    let store = create_full_pipeline();
    let val0 = nth_id(&store, NodeKind::Validation, 0);
    let val1 = nth_id(&store, NodeKind::Validation, 1);

    // val0 -> val1 already exists from auto-wiring; the pair is legal but the
    // chain node's single incoming slot is taken.
    let verdict = check_connection(&val0, &val1, store.nodes(), store.edges());
    assert!(!verdict.is_allowed());
    assert!(verdict.reason().unwrap().contains("incoming"));
}

#[test]
fn test_ensemble_may_only_target_first_validation_node() {
    let store = create_full_pipeline();
    let ensemble = nth_id(&store, NodeKind::Ensemble, 0);
    let val1 = nth_id(&store, NodeKind::Validation, 1);

    let verdict = check_connection(&ensemble, &val1, store.nodes(), store.edges());
    assert!(!verdict.is_allowed());
    assert!(verdict.reason().unwrap().contains("first validation"));
}

#[test]
fn test_chain_back_edge_rejected() {
    let store = create_full_pipeline();
    let val0 = nth_id(&store, NodeKind::Validation, 0);
    let val1 = nth_id(&store, NodeKind::Validation, 1);

    let verdict = check_connection(&val1, &val0, store.nodes(), store.edges());
    assert!(!verdict.is_allowed());
}

#[test]
fn test_context_nodes_take_no_edges() {
    let mut store = create_full_pipeline();
    store.add_node(NodeKind::Context, None).unwrap();
    let context = nth_id(&store, NodeKind::Context, 0);
    let ensemble = nth_id(&store, NodeKind::Ensemble, 0);

    let outgoing = check_connection(&context, &ensemble, store.nodes(), store.edges());
    assert!(!outgoing.is_allowed());
    let incoming = check_connection(&ensemble, &context, store.nodes(), store.edges());
    assert!(!incoming.is_allowed());
}

#[test]
fn test_unknown_endpoint_rejected() {
    let store = WorkflowStore::in_memory();
    let input = nth_id(&store, NodeKind::Input, 0);

    let verdict = check_connection(&input, "missing-node", store.nodes(), store.edges());
    assert!(!verdict.is_allowed());
    assert!(verdict.reason().unwrap().contains("does not exist"));
}

#[test]
fn test_reconnection_excludes_the_moved_edge() {
    let store = WorkflowStore::in_memory();
    let input = nth_id(&store, NodeKind::Input, 0);
    let output = nth_id(&store, NodeKind::Output, 0);

    // A fresh input -> output edge is blocked by the output node's occupied
    // incoming slot, but re-targeting the reserved edge itself is fine.
    let fresh = check_connection(&input, &output, store.nodes(), store.edges());
    assert!(!fresh.is_allowed());

    let moved = check_reconnection(&input, &output, store.nodes(), store.edges(), RESERVED_EDGE_ID);
    assert!(moved.is_allowed());
}

#[test]
fn test_validator_performs_no_mutation() {
    let store = create_full_pipeline();
    let nodes_before = store.nodes().to_vec();
    let edges_before = store.edges().to_vec();

    let generation = nth_id(&store, NodeKind::Generation, 0);
    let ensemble = nth_id(&store, NodeKind::Ensemble, 0);
    let _ = check_connection(&generation, &ensemble, store.nodes(), store.edges());

    assert_eq!(store.nodes(), nodes_before.as_slice());
    assert_eq!(store.edges(), edges_before.as_slice());
}
