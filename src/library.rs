//! Composition root: one store, one undo history, and the autosave policy.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::command::{AddRecord, Command, CommandManager, DeleteRecord, EditRecord};
use crate::config::LibraryConfig;
use crate::error::CollectionError;
use crate::persistence::{resolve_path, JsonPersistence, PersistenceFormat, PersistenceStrategy};
use crate::record::{Record, RecordChanges};
use crate::store::{CollectionStore, FilterCriteria};

/// Owns the collection for the lifetime of the application and routes every
/// reversible change through the command history.
///
/// After each executed or undone command the whole collection is written as
/// JSON to the autosave path, synchronously and in command order. Autosave
/// failures are logged and never fail the command.
pub struct Library {
    store: CollectionStore,
    commands: CommandManager,
    config: LibraryConfig,
    current_path: PathBuf,
}

impl Library {
    pub fn new(config: LibraryConfig) -> Result<Self, CollectionError> {
        config.validate()?;
        let store = CollectionStore::new();
        store.set_persistence_strategy(config.format.strategy())?;
        Ok(Library {
            store,
            commands: CommandManager::new(config.max_history),
            current_path: config.default_path.clone(),
            config,
        })
    }

    /// Like [`new`](Self::new), then restore the autosave file when one exists.
    /// An unreadable autosave is logged and the collection starts empty.
    pub fn open(config: LibraryConfig) -> Result<Self, CollectionError> {
        let library = Library::new(config)?;
        let Some(target) = library.config.autosave_target() else {
            return Ok(library);
        };

        let autosave = JsonPersistence::new();
        if !resolve_path(target, autosave.format().extension())?.exists() {
            info!("no autosave found");
            return Ok(library);
        }
        match library.store.load_with(&autosave, target) {
            Ok(count) => info!(count, "autosave restored"),
            Err(err) => warn!(error = %err, "could not restore autosave"),
        }
        Ok(library)
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn add_record(&mut self, record: Record) -> Result<(), CollectionError> {
        let command = AddRecord::new(self.store.clone(), record);
        self.run(Box::new(command))
    }

    /// Apply `changes` to the record with `id` as one undoable step and
    /// return the edited record. Empty changes return the record as is and
    /// add nothing to the history.
    pub fn edit_record(&mut self, id: &str, changes: &RecordChanges) -> Result<Record, CollectionError> {
        let original = self.require(id)?;
        if changes.is_empty() {
            debug!(id, "empty edit skipped");
            return Ok(original);
        }
        let command = EditRecord::from_changes(self.store.clone(), &original, changes)?;
        let edited = command.edited().clone();
        self.run(Box::new(command))?;
        Ok(edited)
    }

    pub fn delete_record(&mut self, id: &str) -> Result<Record, CollectionError> {
        let record = self.require(id)?;
        let command = DeleteRecord::new(self.store.clone(), record.clone());
        self.run(Box::new(command))?;
        Ok(record)
    }

    /// Revert the latest command. Returns its description, or `None` when the
    /// history is empty.
    pub fn undo(&mut self) -> Result<Option<String>, CollectionError> {
        let Some(command) = self.commands.undo()? else {
            return Ok(None);
        };
        self.autosave();
        Ok(Some(command.description()))
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn history_size(&self) -> usize {
        self.commands.history_size()
    }

    pub fn clear_history(&mut self) {
        self.commands.clear_history();
    }

    fn run(&mut self, command: Box<dyn Command>) -> Result<(), CollectionError> {
        self.commands.execute_command(command)?;
        self.autosave();
        Ok(())
    }

    fn require(&self, id: &str) -> Result<Record, CollectionError> {
        self.store
            .get(id)?
            .ok_or_else(|| CollectionError::NotFound { id: id.to_string() })
    }

    fn autosave(&self) {
        let Some(target) = self.config.autosave_target() else {
            return;
        };
        match self.store.save_with(&JsonPersistence::new(), target) {
            Ok(path) => debug!(path = %path.display(), "autosaved"),
            Err(err) => warn!(error = %err, "autosave failed"),
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn format(&self) -> Result<Option<PersistenceFormat>, CollectionError> {
        self.store.persistence_format()
    }

    pub fn set_format(&mut self, format: PersistenceFormat) -> Result<(), CollectionError> {
        self.store.set_persistence_strategy(format.strategy())
    }

    /// Path used by [`save_current`](Self::save_current) and
    /// [`load_current`](Self::load_current).
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<PathBuf, CollectionError> {
        self.current_path = path.as_ref().to_path_buf();
        self.store.save(&self.current_path)
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize, CollectionError> {
        self.current_path = path.as_ref().to_path_buf();
        self.store.load(&self.current_path)
    }

    pub fn save_current(&self) -> Result<PathBuf, CollectionError> {
        self.store.save(&self.current_path)
    }

    pub fn load_current(&self) -> Result<usize, CollectionError> {
        self.store.load(&self.current_path)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn records(&self) -> Result<Vec<Record>, CollectionError> {
        self.store.get_all()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<Record>, CollectionError> {
        self.store.filter(criteria)
    }

    pub fn categories(&self) -> Result<Vec<String>, CollectionError> {
        self.store.distinct_categories()
    }
}
