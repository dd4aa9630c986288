//! Reversible mutations of the collection store.
//!
//! Every user-visible change goes through a [`Command`] handed to the
//! [`CommandManager`], which runs it and keeps it on a bounded undo history.

mod add;
mod command;
mod delete;
mod edit;
mod manager;

pub use add::AddRecord;
pub use command::Command;
pub use delete::DeleteRecord;
pub use edit::EditRecord;
pub use manager::{CommandManager, DEFAULT_MAX_HISTORY};
