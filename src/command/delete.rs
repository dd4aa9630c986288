use tracing::debug;

use crate::error::CollectionError;
use crate::record::Record;
use crate::store::CollectionStore;

use super::Command;

/// Removes a record; undo puts back the exact record that was removed, id
/// and all edits made before the deletion included.
///
/// The removed record is held by value and nothing outside the command can
/// reach it, so it cannot change between `execute` and `undo`.
pub struct DeleteRecord {
    store: CollectionStore,
    record: Record,
}

impl DeleteRecord {
    pub fn new(store: CollectionStore, record: Record) -> Self {
        DeleteRecord { store, record }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

impl Command for DeleteRecord {
    fn execute(&mut self) -> Result<(), CollectionError> {
        let removed = self
            .store
            .remove(self.record.id())?
            .ok_or_else(|| CollectionError::NotFound {
                id: self.record.id().to_string(),
            })?;
        // Keep what the store actually held; it may be newer than the copy
        // this command was built with.
        self.record = removed;
        debug!(id = self.record.id(), title = self.record.title(), "executed delete");
        Ok(())
    }

    fn undo(&mut self) -> Result<(), CollectionError> {
        if !self.store.add(self.record.clone())? {
            return Err(CollectionError::DuplicateId {
                id: self.record.id().to_string(),
            });
        }
        debug!(id = self.record.id(), title = self.record.title(), "undid delete");
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete: {}", self.record.title())
    }
}
