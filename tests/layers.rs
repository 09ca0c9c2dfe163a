//! Layer policy: cardinality, auto-wiring and chain repair.
mod common;
use common::*;
use kousei::prelude::*;

#[test]
fn test_first_generation_node_creates_no_edges() {
    let mut store = WorkflowStore::in_memory();
    store.add_node(NodeKind::Generation, None).unwrap();

    // input, generation, output; the only edge is still the reserved one.
    assert_eq!(store.nodes().len(), 3);
    assert_eq!(store.edges().len(), 1);
    assert_eq!(store.edges()[0].id, RESERVED_EDGE_ID);
}

#[test]
fn test_ensemble_add_wires_all_generation_nodes() {
    let mut store = WorkflowStore::in_memory();
    store.add_node(NodeKind::Generation, None).unwrap();
    store.add_node(NodeKind::Generation, None).unwrap();
    store.add_node(NodeKind::Ensemble, None).unwrap();

    let ensemble = nth_id(&store, NodeKind::Ensemble, 0);
    for idx in 0..2 {
        let generation = nth_id(&store, NodeKind::Generation, idx);
        assert!(has_single_edge(&store, &generation, &ensemble));
    }
}

#[test]
fn test_generation_added_after_ensemble_wires_itself() {
    let mut store = WorkflowStore::in_memory();
    store.add_node(NodeKind::Ensemble, None).unwrap();
    store.add_node(NodeKind::Generation, None).unwrap();

    let ensemble = nth_id(&store, NodeKind::Ensemble, 0);
    let generation = nth_id(&store, NodeKind::Generation, 0);
    assert!(has_single_edge(&store, &generation, &ensemble));
}

#[test]
fn test_validation_chain_is_a_simple_chain() {
    let mut store = WorkflowStore::in_memory();
    store.add_node(NodeKind::Ensemble, None).unwrap();
    for _ in 0..4 {
        store.add_node(NodeKind::Validation, None).unwrap();
    }

    let ensemble = nth_id(&store, NodeKind::Ensemble, 0);
    let chain: Vec<String> = (0..4).map(|i| nth_id(&store, NodeKind::Validation, i)).collect();

    assert!(has_single_edge(&store, &ensemble, &chain[0]));
    for window in chain.windows(2) {
        assert!(has_single_edge(&store, &window[0], &window[1]));
    }

    // No extra links into or out of the chain beyond the simple path.
    let chain_edges = store
        .edges()
        .iter()
        .filter(|e| chain.contains(&e.source) || chain.contains(&e.target))
        .count();
    assert_eq!(chain_edges, 4); // ensemble->v0 plus three chain links
}

#[test]
fn test_layer_capacity_is_enforced() {
    let mut store = WorkflowStore::in_memory();
    let max = layer_policy(NodeKind::Generation).max_count;
    for _ in 0..max {
        store.add_node(NodeKind::Generation, None).unwrap();
    }
    let nodes_before = store.nodes().len();

    let err = store.add_node(NodeKind::Generation, None).unwrap_err();
    assert!(matches!(err, MutationError::CapacityExceeded { .. }));
    assert_eq!(store.nodes().len(), nodes_before);
}

#[test]
fn test_second_input_or_output_rejected() {
    let mut store = WorkflowStore::in_memory();
    assert!(matches!(
        store.add_node(NodeKind::Input, None),
        Err(MutationError::CapacityExceeded { .. })
    ));
    assert!(matches!(
        store.add_node(NodeKind::Output, None),
        Err(MutationError::CapacityExceeded { .. })
    ));
}

#[test]
fn test_removing_interior_validation_node_bridges_the_chain() {
    let mut store = WorkflowStore::in_memory();
    store.add_node(NodeKind::Ensemble, None).unwrap();
    for _ in 0..3 {
        store.add_node(NodeKind::Validation, None).unwrap();
    }
    let val0 = nth_id(&store, NodeKind::Validation, 0);
    let val1 = nth_id(&store, NodeKind::Validation, 1);
    let val2 = nth_id(&store, NodeKind::Validation, 2);

    store.remove_node(&val1).unwrap();

    assert!(has_single_edge(&store, &val0, &val2));
    assert!(!store.nodes().iter().any(|n| n.id == val1));
    assert!(
        !store
            .edges()
            .iter()
            .any(|e| e.source == val1 || e.target == val1)
    );
}

#[test]
fn test_first_node_of_layer_is_protected() {
    let mut store = create_full_pipeline();
    let first_generation = nth_id(&store, NodeKind::Generation, 0);
    let first_validation = nth_id(&store, NodeKind::Validation, 0);

    for id in [&first_generation, &first_validation] {
        let counts = (store.nodes().len(), store.edges().len());
        let err = store.remove_node(id).unwrap_err();
        assert!(matches!(err, MutationError::IllegalDeletion { .. }));
        assert_eq!((store.nodes().len(), store.edges().len()), counts);
    }

    // The second member of a layer is fair game.
    let second_generation = nth_id(&store, NodeKind::Generation, 1);
    store.remove_node(&second_generation).unwrap();
}

#[test]
fn test_context_nodes_are_all_deletable() {
    let mut store = WorkflowStore::in_memory();
    store.add_node(NodeKind::Context, None).unwrap();
    let context = nth_id(&store, NodeKind::Context, 0);

    store.remove_node(&context).unwrap();
    assert_eq!(store.nodes().len(), 2);
}

#[test]
fn test_placement_stacks_below_the_layer_tail() {
    let mut store = WorkflowStore::in_memory();
    let first = store.add_node(NodeKind::Generation, None).unwrap().position;
    let second = store.add_node(NodeKind::Generation, None).unwrap().position;

    assert!(second.y > first.y);
    assert_eq!(second.x, first.x + 40.0);
    assert_eq!(second.y, first.y + 120.0);
}
