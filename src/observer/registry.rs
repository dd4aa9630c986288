use std::sync::Arc;

use super::{CollectionEvent, CollectionObserver};

/// Ordered set of observer handles. Identity is the handle's allocation, so
/// registering the same `Arc` twice is a no-op.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn CollectionObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the observer was already registered.
    pub fn register(&mut self, observer: Arc<dyn CollectionObserver>) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Returns `false` if the observer was not registered.
    pub fn unregister(&mut self, observer: &Arc<dyn CollectionObserver>) -> bool {
        let before = self.observers.len();
        self.observers
            .retain(|registered| !same_observer(registered, observer));
        self.observers.len() != before
    }

    pub fn contains(&self, observer: &Arc<dyn CollectionObserver>) -> bool {
        self.observers
            .iter()
            .any(|registered| same_observer(registered, observer))
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&self, event: CollectionEvent<'_>) {
        for observer in &self.observers {
            event.dispatch(observer.as_ref());
        }
    }
}

// Compare data pointers only; vtable pointers for the same type may differ
// across codegen units.
fn same_observer(a: &Arc<dyn CollectionObserver>, b: &Arc<dyn CollectionObserver>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
