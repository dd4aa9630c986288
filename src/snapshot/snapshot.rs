use crate::error::CollectionError;
use crate::record::Record;

/// Immutable capture of a record's field values at a point in time.
///
/// A snapshot is a plain value: later changes to the record it was taken from
/// never reach it, so restoring it always yields exactly the captured state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    state: Record,
}

impl Snapshot {
    /// Id of the record this snapshot belongs to.
    pub fn record_id(&self) -> &str {
        self.state.id()
    }
}

impl Record {
    /// Capture the current field values.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.clone(),
        }
    }

    /// Overwrite every field except the id with the snapshot's values.
    ///
    /// Fails with [`CollectionError::InvalidSnapshot`] when the snapshot was
    /// taken from a different record.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CollectionError> {
        if self.id() != snapshot.record_id() {
            return Err(CollectionError::InvalidSnapshot {
                record_id: self.id().to_string(),
                snapshot_id: snapshot.record_id().to_string(),
            });
        }
        self.overwrite_fields(&snapshot.state);
        Ok(())
    }
}
