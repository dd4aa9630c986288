use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::CollectionError;
use crate::record::Record;

use super::{read_if_exists, resolve_path, write_atomically, PersistenceFormat, PersistenceStrategy};

/// Pretty-printed JSON array of record objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPersistence;

impl JsonPersistence {
    pub fn new() -> Self {
        JsonPersistence
    }
}

impl PersistenceStrategy for JsonPersistence {
    fn format(&self) -> PersistenceFormat {
        PersistenceFormat::Json
    }

    fn save(&self, records: &[Record], path: &Path) -> Result<PathBuf, CollectionError> {
        let path = resolve_path(path, self.format().extension())?;
        let json = serde_json::to_vec_pretty(records).map_err(|e| CollectionError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        write_atomically(&path, &json)?;
        info!(path = %path.display(), count = records.len(), "saved collection as JSON");
        Ok(path)
    }

    fn load(&self, path: &Path) -> Result<Vec<Record>, CollectionError> {
        let path = resolve_path(path, self.format().extension())?;
        let Some(contents) = read_if_exists(&path)? else {
            info!(path = %path.display(), "file not found, starting with an empty collection");
            return Ok(Vec::new());
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        // Each element is validated on deserialization; one invalid record
        // fails the whole document rather than yielding a partial record.
        let records: Option<Vec<Record>> =
            serde_json::from_str(&contents).map_err(|e| CollectionError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;
        let records = records.unwrap_or_default();
        info!(path = %path.display(), count = records.len(), "loaded collection from JSON");
        Ok(records)
    }
}
