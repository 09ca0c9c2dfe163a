//! # Kousei - Workflow Graph Modeling and Validation Engine
//!
//! **Kousei** is the core engine behind a node-based visual editor for
//! LLM-processing pipelines. It owns the workflow graph (nodes, edges,
//! viewport), enforces the layered pipeline topology, validates prospective
//! connections, and serializes the whole state for persistence, interchange
//! and remote execution. Rendering, HTTP and file download are thin wrappers
//! around this crate, not part of it.
//!
//! ## Core Workflow
//!
//! 1.  **Create a store**: `WorkflowStore` starts at the canonical two-node
//!     graph (input → output with the reserved edge) on a persistence bridge
//!     of your choice.
//! 2.  **Mutate**: add and remove nodes per layer, draw connections, drag
//!     positions. Every mutation is checked against the layer policy and the
//!     connection validator and either fully commits or fully no-ops with a
//!     recoverable notice.
//! 3.  **Project**: keep the canvas in sync through `CanvasProjection`, a
//!     one-way, equality-checked projection of the store.
//! 4.  **Persist and ship**: save/restore the single snapshot slot, export
//!     and import interchange JSON, or stage an `ExecutionRequest` for the
//!     remote executor.
//!
//! ## Quick Start
//!
//! ```rust
//! use kousei::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut store = WorkflowStore::in_memory();
//!
//!     // Build the pipeline: generation feeds the ensemble node, which
//!     // feeds the validation chain. Auto-wiring creates the mandated edges.
//!     store.add_node(NodeKind::Generation, None)?;
//!     store.add_node(NodeKind::Ensemble, None)?;
//!     store.add_node(NodeKind::Validation, None)?;
//!
//!     // A manual connection goes through the validator first.
//!     let generation_id = store.nodes()[2].id.clone();
//!     let verdict = check_connection(
//!         &generation_id,
//!         &generation_id,
//!         store.nodes(),
//!         store.edges(),
//!     );
//!     assert!(!verdict.is_allowed()); // self-loops are rejected
//!
//!     // Keep the canvas in sync one-way.
//!     let mut projection = CanvasProjection::new();
//!     projection.refresh(&mut store);
//!
//!     // Persist and round-trip.
//!     store.save_current_workflow()?;
//!     let json = store.export_to_json();
//!     store.import_from_json(&json)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod exec;
pub mod layer;
pub mod model;
pub mod persist;
pub mod prelude;
pub mod store;
pub mod validator;
