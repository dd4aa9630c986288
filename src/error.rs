use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::record::ValidationError;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot restore snapshot of record {snapshot_id} onto record {record_id}")]
    InvalidSnapshot {
        record_id: String,
        snapshot_id: String,
    },

    #[error("no persistence strategy configured")]
    NoStrategyConfigured,

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("record {id} not found")]
    NotFound { id: String },

    #[error("record {id} is already in the collection")]
    DuplicateId { id: String },

    #[error("collection lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CollectionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CollectionError::Io {
            path: path.into(),
            source,
        }
    }
}
