//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions of the kousei
//! crate, so editor shells and tests can pull in the whole working set with
//! one import.
//!
//! # Example
//!
//! ```rust,no_run
//! use kousei::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut store = WorkflowStore::new(Box::new(FileSnapshotStore::new("workflow.json")));
//! store.add_node(NodeKind::Generation, None)?;
//! store.save_current_workflow()?;
//! println!("{}", store.export_to_json());
//! # Ok(())
//! # }
//! ```

// The stateful engine and its projection
pub use crate::store::sync::{CanvasProjection, SyncOutcome, report_viewport_gesture};
pub use crate::store::{SelectionOutcome, WorkflowStore};

// Data model
pub use crate::model::{
    Edge, LlmConfig, ModelProvider, Node, NodeAttributes, NodeKind, Position, RESERVED_EDGE_ID,
    SearchIntensity, Viewport, WorkflowSnapshot,
};

// Validation and layer policy
pub use crate::layer::{LayerPolicy, is_deletable, is_position_locked, layer_policy};
pub use crate::validator::{ConnectionVerdict, check_connection, check_reconnection};

// Persistence bridge
pub use crate::persist::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};

// Execution interface
pub use crate::exec::{ExecutionRequest, ExecutionResults, KnowledgeBase, RequirementRecord};

// Error types
pub use crate::error::{ImportError, MutationError, PersistError, RequestError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
