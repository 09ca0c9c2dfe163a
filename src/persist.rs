//! The persistence bridge: one snapshot slot in a durable local store.
//!
//! The contract is deliberately small: `save` overwrites the single slot,
//! `load` returns the stored snapshot or `None`. Missing or corrupt stored
//! data is treated as "no snapshot", never as an error, so a damaged blob can
//! always be recovered from by saving again.

use crate::error::PersistError;
use crate::model::WorkflowSnapshot;
use std::fs;
use std::path::{Path, PathBuf};

pub trait SnapshotStore {
    fn save(&mut self, snapshot: &WorkflowSnapshot) -> Result<(), PersistError>;
    fn load(&self) -> Option<WorkflowSnapshot>;
}

/// A single in-memory slot. Used by tests and by host shells that manage
/// durability themselves (e.g. a wasm host bridging to browser storage).
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: Option<WorkflowSnapshot>,
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&mut self, snapshot: &WorkflowSnapshot) -> Result<(), PersistError> {
        self.slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Option<WorkflowSnapshot> {
        self.slot.clone()
    }
}

/// One JSON blob at a fixed path, the file-system analogue of a fixed
/// local-storage key.
#[derive(Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&mut self, snapshot: &WorkflowSnapshot) -> Result<(), PersistError> {
        fs::write(&self.path, snapshot.to_json()).map_err(|e| PersistError::Io {
            target: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn load(&self) -> Option<WorkflowSnapshot> {
        let text = fs::read_to_string(&self.path).ok()?;
        match WorkflowSnapshot::from_json(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!(
                    "stored snapshot at '{}' is unreadable, treating as absent: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }
}
