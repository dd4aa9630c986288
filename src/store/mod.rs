mod filter;
mod store;

pub use filter::{FilterCriteria, ALL_CATEGORIES};
pub use store::CollectionStore;
