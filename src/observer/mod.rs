//! Change notifications for the collection store.
//!
//! Observers are invoked synchronously, in registration order, after a store
//! mutation has been committed and its lock released, so they may read the
//! store freely.

mod registry;

use crate::record::Record;

pub use registry::ObserverRegistry;

/// A committed change to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionEvent<'a> {
    Added(&'a Record),
    Removed(&'a Record),
    Updated(&'a Record),
    BulkLoaded,
}

/// Receives store notifications. Every method defaults to a no-op so
/// implementors only override what they care about.
pub trait CollectionObserver: Send + Sync {
    fn on_added(&self, _record: &Record) {}

    fn on_removed(&self, _record: &Record) {}

    fn on_updated(&self, _record: &Record) {}

    fn on_bulk_loaded(&self) {}
}

impl CollectionEvent<'_> {
    /// Deliver this event to the matching observer callback.
    pub fn dispatch(&self, observer: &dyn CollectionObserver) {
        match self {
            CollectionEvent::Added(record) => observer.on_added(record),
            CollectionEvent::Removed(record) => observer.on_removed(record),
            CollectionEvent::Updated(record) => observer.on_updated(record),
            CollectionEvent::BulkLoaded => observer.on_bulk_loaded(),
        }
    }
}

/// Adapter that lets a closure observe every event.
pub struct FnObserver<F> {
    callback: F,
}

impl<F> CollectionObserver for FnObserver<F>
where
    F: Fn(CollectionEvent<'_>) + Send + Sync,
{
    fn on_added(&self, record: &Record) {
        (self.callback)(CollectionEvent::Added(record));
    }

    fn on_removed(&self, record: &Record) {
        (self.callback)(CollectionEvent::Removed(record));
    }

    fn on_updated(&self, record: &Record) {
        (self.callback)(CollectionEvent::Updated(record));
    }

    fn on_bulk_loaded(&self) {
        (self.callback)(CollectionEvent::BulkLoaded);
    }
}

/// Wrap a closure as an observer handle.
///
/// ```ignore
/// let observer = observer_fn(|event| println!("{:?}", event));
/// store.add_observer(observer.clone())?;
/// ```
pub fn observer_fn<F>(callback: F) -> std::sync::Arc<dyn CollectionObserver>
where
    F: Fn(CollectionEvent<'_>) + Send + Sync + 'static,
{
    std::sync::Arc::new(FnObserver { callback })
}
