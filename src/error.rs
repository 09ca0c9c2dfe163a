use thiserror::Error;

/// Errors a store mutation can be rejected with. All of these are recoverable
/// notices: the operation no-ops and the store stays fully interactive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("The {layer} layer already holds its maximum of {max} nodes")]
    CapacityExceeded { layer: String, max: usize },

    #[error("Node '{node_id}' cannot be deleted: {reason}")]
    IllegalDeletion { node_id: String, reason: String },

    #[error("The initial input-output connection cannot be deleted")]
    ReservedEdge { edge_id: String },

    #[error("Connection rejected: {reason}")]
    InvalidConnection { reason: String },

    #[error("Node '{node_id}' does not exist")]
    UnknownNode { node_id: String },

    #[error("Edge '{edge_id}' does not exist")]
    UnknownEdge { edge_id: String },

    #[error("Nothing to restore: no workflow has been saved")]
    NoSnapshot,
}

/// Errors raised while parsing or shape-validating interchange JSON. On any
/// import failure the store's prior state is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParse(String),

    #[error("Workflow JSON has an invalid shape: {0}")]
    Shape(String),
}

/// Errors staging a snapshot for remote execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Workflow is not executable: {0}")]
    Incomplete(String),
}

/// Errors from the durable persistence bridge. A missing or corrupt stored
/// snapshot is not an error (it loads as `None`); these cover write failures.
#[derive(Error, Debug, Clone)]
pub enum PersistError {
    #[error("Could not write snapshot to '{target}': {message}")]
    Io { target: String, message: String },
}
