//! A personal movie collection held in memory.
//!
//! Changes go through reversible [`Command`]s kept on a bounded undo history,
//! the [`CollectionStore`] notifies registered [`CollectionObserver`]s after
//! every committed change, and the storage format is a swappable
//! [`PersistenceStrategy`] (JSON or CSV).

mod command;
mod config;
mod error;
mod library;
mod observer;
mod persistence;
mod record;
mod snapshot;
mod store;

pub use command::{AddRecord, Command, CommandManager, DeleteRecord, EditRecord, DEFAULT_MAX_HISTORY};
pub use config::{LibraryConfig, AUTOSAVE_FILENAME, DEFAULT_FILENAME};
pub use error::CollectionError;
pub use library::Library;
pub use observer::{observer_fn, CollectionEvent, CollectionObserver, FnObserver, ObserverRegistry};
pub use persistence::{
    CsvPersistence, JsonPersistence, ParseFormatError, PersistenceFormat, PersistenceStrategy,
    CSV_HEADER,
};
pub use record::{
    max_year, ParseStatusError, Record, RecordBuilder, RecordChanges, Status, ValidationError,
    MAX_RATING, MAX_YEAR_AHEAD, MIN_RATING, MIN_YEAR,
};
pub use snapshot::Snapshot;
pub use store::{CollectionStore, FilterCriteria, ALL_CATEGORIES};
