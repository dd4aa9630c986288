//! Pluggable file formats for the whole collection.
//!
//! A [`PersistenceStrategy`] converts the full record list to and from one
//! file. The store holds at most one strategy and delegates `save`/`load` to
//! it, so switching formats never touches collection logic.

mod csv;
mod format;
mod json;
mod strategy;

pub use csv::{CsvPersistence, CSV_HEADER};
pub use format::{ParseFormatError, PersistenceFormat};
pub use json::JsonPersistence;
pub use strategy::PersistenceStrategy;

pub(crate) use strategy::{read_if_exists, resolve_path, write_atomically};
