use tracing::debug;

use crate::error::CollectionError;
use crate::record::Record;
use crate::store::CollectionStore;

use super::Command;

pub struct AddRecord {
    store: CollectionStore,
    record: Record,
}

impl AddRecord {
    pub fn new(store: CollectionStore, record: Record) -> Self {
        AddRecord { store, record }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

impl Command for AddRecord {
    fn execute(&mut self) -> Result<(), CollectionError> {
        if !self.store.add(self.record.clone())? {
            return Err(CollectionError::DuplicateId {
                id: self.record.id().to_string(),
            });
        }
        debug!(id = self.record.id(), title = self.record.title(), "executed add");
        Ok(())
    }

    fn undo(&mut self) -> Result<(), CollectionError> {
        self.store
            .remove(self.record.id())?
            .ok_or_else(|| CollectionError::NotFound {
                id: self.record.id().to_string(),
            })?;
        debug!(id = self.record.id(), title = self.record.title(), "undid add");
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add: {}", self.record.title())
    }
}
