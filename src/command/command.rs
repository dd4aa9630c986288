use crate::error::CollectionError;

/// One reversible mutation bound to a store.
///
/// Call `execute`/`undo` only through the
/// [`CommandManager`](super::CommandManager).
pub trait Command: Send {
    fn execute(&mut self) -> Result<(), CollectionError>;

    fn undo(&mut self) -> Result<(), CollectionError>;

    /// Human-readable summary, e.g. `Add: Inception`.
    fn description(&self) -> String;
}
