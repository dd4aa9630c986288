use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::error::CollectionError;
use crate::observer::{CollectionEvent, CollectionObserver, ObserverRegistry};
use crate::persistence::{PersistenceFormat, PersistenceStrategy};
use crate::record::{Record, Status};

use super::filter::{
    matches_category, matches_min_rating, matches_query, matches_status, FilterCriteria,
};

#[derive(Default)]
struct StoreState {
    records: Vec<Record>,
    strategy: Option<Arc<dyn PersistenceStrategy>>,
    observers: ObserverRegistry,
}

/// The authoritative in-memory list of records.
///
/// Clone-friendly: clones share the same underlying collection, so the
/// composing application creates one store and hands clones to commands and
/// views. Every operation takes the single store lock for its duration;
/// observers run after the lock is released and see the committed state.
#[derive(Clone, Default)]
pub struct CollectionStore {
    state: Arc<RwLock<StoreState>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, StoreState>, CollectionError> {
        self.state
            .read()
            .map_err(|_| CollectionError::LockPoisoned(operation))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, StoreState>, CollectionError> {
        self.state
            .write()
            .map_err(|_| CollectionError::LockPoisoned(operation))
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Returns `false` if this observer handle is already registered.
    pub fn add_observer(&self, observer: Arc<dyn CollectionObserver>) -> Result<bool, CollectionError> {
        let added = self.write("add observer")?.observers.register(observer);
        if added {
            debug!("observer registered");
        }
        Ok(added)
    }

    pub fn remove_observer(&self, observer: &Arc<dyn CollectionObserver>) -> Result<bool, CollectionError> {
        let removed = self.write("remove observer")?.observers.unregister(observer);
        if removed {
            debug!("observer removed");
        }
        Ok(removed)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a record. Rejected (returns `false`, nobody notified) when a
    /// record with the same id is already present.
    pub fn add(&self, record: Record) -> Result<bool, CollectionError> {
        let observers = {
            let mut state = self.write("add")?;
            if state.records.iter().any(|r| r.id() == record.id()) {
                warn!(id = record.id(), "rejected record with duplicate id");
                return Ok(false);
            }
            state.records.push(record.clone());
            state.observers.clone()
        };
        observers.notify(CollectionEvent::Added(&record));
        Ok(true)
    }

    /// Remove the record with `id`, returning it. `None` means not found and
    /// nobody is notified.
    pub fn remove(&self, id: &str) -> Result<Option<Record>, CollectionError> {
        let (removed, observers) = {
            let mut state = self.write("remove")?;
            let Some(index) = state.records.iter().position(|r| r.id() == id) else {
                return Ok(None);
            };
            (state.records.remove(index), state.observers.clone())
        };
        observers.notify(CollectionEvent::Removed(&removed));
        Ok(Some(removed))
    }

    /// Replace the record with the same id in place. Never inserts.
    pub fn update(&self, record: Record) -> Result<bool, CollectionError> {
        let observers = {
            let mut state = self.write("update")?;
            let Some(slot) = state.records.iter_mut().find(|r| r.id() == record.id()) else {
                return Ok(false);
            };
            *slot = record.clone();
            state.observers.clone()
        };
        observers.notify(CollectionEvent::Updated(&record));
        Ok(true)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get(&self, id: &str) -> Result<Option<Record>, CollectionError> {
        if id.is_empty() {
            return Ok(None);
        }
        let state = self.read("get")?;
        Ok(state.records.iter().find(|r| r.id() == id).cloned())
    }

    /// A copy of every record, in collection order.
    pub fn get_all(&self) -> Result<Vec<Record>, CollectionError> {
        Ok(self.read("get all")?.records.clone())
    }

    pub fn len(&self) -> Result<usize, CollectionError> {
        Ok(self.read("len")?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, CollectionError> {
        Ok(self.read("is empty")?.records.is_empty())
    }

    fn select<F>(&self, operation: &'static str, predicate: F) -> Result<Vec<Record>, CollectionError>
    where
        F: Fn(&Record) -> bool,
    {
        let state = self.read(operation)?;
        Ok(state
            .records
            .iter()
            .filter(|&r| predicate(r))
            .cloned()
            .collect())
    }

    /// Case-insensitive substring search on title or author. A blank query
    /// returns every record.
    pub fn search(&self, query: &str) -> Result<Vec<Record>, CollectionError> {
        self.select("search", |r| matches_query(r, Some(query)))
    }

    /// `None`, a blank name or [`ALL_CATEGORIES`](super::ALL_CATEGORIES)
    /// returns every record.
    pub fn filter_by_category(&self, category: Option<&str>) -> Result<Vec<Record>, CollectionError> {
        self.select("filter by category", |r| matches_category(r, category))
    }

    pub fn filter_by_status(&self, status: Option<Status>) -> Result<Vec<Record>, CollectionError> {
        self.select("filter by status", |r| matches_status(r, status))
    }

    pub fn filter_by_min_rating(&self, min_rating: Option<u8>) -> Result<Vec<Record>, CollectionError> {
        self.select("filter by rating", |r| matches_min_rating(r, min_rating))
    }

    /// All criteria intersected, collection order preserved.
    pub fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<Record>, CollectionError> {
        self.select("filter", |r| criteria.matches(r))
    }

    /// Sorted, deduplicated categories currently in use. Blank categories are
    /// left out.
    pub fn distinct_categories(&self) -> Result<Vec<String>, CollectionError> {
        let state = self.read("distinct categories")?;
        let categories: BTreeSet<&str> = state
            .records
            .iter()
            .map(Record::category)
            .filter(|category| !category.trim().is_empty())
            .collect();
        Ok(categories.into_iter().map(str::to_string).collect())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Install the strategy used by the next `save`/`load`.
    pub fn set_persistence_strategy<S>(&self, strategy: S) -> Result<(), CollectionError>
    where
        S: PersistenceStrategy + 'static,
    {
        let format = strategy.format();
        self.write("set strategy")?.strategy = Some(Arc::new(strategy));
        info!(%format, "persistence strategy changed");
        Ok(())
    }

    /// Format of the active strategy, if any.
    pub fn persistence_format(&self) -> Result<Option<PersistenceFormat>, CollectionError> {
        Ok(self
            .read("strategy")?
            .strategy
            .as_ref()
            .map(|strategy| strategy.format()))
    }

    fn strategy(&self) -> Result<Arc<dyn PersistenceStrategy>, CollectionError> {
        self.read("strategy")?
            .strategy
            .clone()
            .ok_or(CollectionError::NoStrategyConfigured)
    }

    /// Write the whole collection with the active strategy. Returns the path
    /// written (with the canonical extension).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, CollectionError> {
        let strategy = self.strategy()?;
        self.save_with(strategy.as_ref(), path)
    }

    /// Replace the whole collection with the file's contents, read by the
    /// active strategy. Returns the number of records loaded.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<usize, CollectionError> {
        let strategy = self.strategy()?;
        self.load_with(strategy.as_ref(), path)
    }

    /// Like [`save`](Self::save) with an explicit strategy; the active one is
    /// left untouched.
    pub fn save_with(
        &self,
        strategy: &dyn PersistenceStrategy,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, CollectionError> {
        let records = self.get_all()?;
        strategy.save(&records, path.as_ref())
    }

    /// Like [`load`](Self::load) with an explicit strategy. On failure the
    /// current records are kept; on success observers get a single
    /// bulk-loaded notification.
    pub fn load_with(
        &self,
        strategy: &dyn PersistenceStrategy,
        path: impl AsRef<Path>,
    ) -> Result<usize, CollectionError> {
        let loaded = strategy.load(path.as_ref())?;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(loaded.len());
        for record in loaded {
            if seen.insert(record.id().to_string()) {
                records.push(record);
            } else {
                warn!(id = record.id(), "dropping loaded record with duplicate id");
            }
        }

        let count = records.len();
        let observers = {
            let mut state = self.write("load")?;
            state.records = records;
            state.observers.clone()
        };
        observers.notify(CollectionEvent::BulkLoaded);
        Ok(count)
    }
}
