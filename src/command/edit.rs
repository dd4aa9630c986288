use tracing::debug;

use crate::error::CollectionError;
use crate::record::{Record, RecordChanges};
use crate::snapshot::Snapshot;
use crate::store::CollectionStore;

use super::Command;

/// Replaces a record with an edited copy; undo restores the snapshot taken
/// before the edit.
pub struct EditRecord {
    store: CollectionStore,
    edited: Record,
    before: Snapshot,
}

impl EditRecord {
    /// `before` must be a snapshot of the same record taken before the edit.
    pub fn new(store: CollectionStore, edited: Record, before: Snapshot) -> Self {
        EditRecord {
            store,
            edited,
            before,
        }
    }

    /// Snapshot `original`, apply `changes` to a copy, and bind both.
    pub fn from_changes(
        store: CollectionStore,
        original: &Record,
        changes: &RecordChanges,
    ) -> Result<Self, CollectionError> {
        let before = original.snapshot();
        let mut edited = original.clone();
        edited.apply(changes)?;
        Ok(EditRecord::new(store, edited, before))
    }

    pub fn edited(&self) -> &Record {
        &self.edited
    }

    fn replace(&self, record: Record) -> Result<(), CollectionError> {
        let id = record.id().to_string();
        if !self.store.update(record)? {
            return Err(CollectionError::NotFound { id });
        }
        Ok(())
    }
}

impl Command for EditRecord {
    fn execute(&mut self) -> Result<(), CollectionError> {
        self.replace(self.edited.clone())?;
        debug!(id = self.edited.id(), title = self.edited.title(), "executed edit");
        Ok(())
    }

    fn undo(&mut self) -> Result<(), CollectionError> {
        let mut restored = self.edited.clone();
        restored.restore(&self.before)?;
        self.replace(restored)?;
        debug!(id = self.edited.id(), "undid edit");
        Ok(())
    }

    fn description(&self) -> String {
        format!("Edit: {}", self.edited.title())
    }
}
