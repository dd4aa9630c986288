use std::collections::VecDeque;

use tracing::{debug, info};

use crate::error::CollectionError;

use super::Command;

pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Bounded undo history.
///
/// The newest command sits at the back. Once the history grows past
/// `max_history` the oldest entry is dropped and can no longer be undone.
pub struct CommandManager {
    history: VecDeque<Box<dyn Command>>,
    max_history: usize,
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl CommandManager {
    pub fn new(max_history: usize) -> Self {
        CommandManager {
            history: VecDeque::with_capacity(max_history.min(DEFAULT_MAX_HISTORY) + 1),
            max_history,
        }
    }

    /// Run `command` and record it. A failed command is not recorded and no
    /// rollback is attempted.
    pub fn execute_command(&mut self, mut command: Box<dyn Command>) -> Result<(), CollectionError> {
        command.execute()?;
        debug!(command = %command.description(), "command executed");
        self.history.push_back(command);

        while self.history.len() > self.max_history {
            if let Some(evicted) = self.history.pop_front() {
                info!(command = %evicted.description(), "history limit reached, dropped oldest command");
            }
        }
        Ok(())
    }

    /// Undo the most recent command and hand it back, or `Ok(None)` when there
    /// is nothing to undo. The entry is popped before its undo runs, so a
    /// failing undo still leaves it off the history.
    pub fn undo(&mut self) -> Result<Option<Box<dyn Command>>, CollectionError> {
        let Some(mut command) = self.history.pop_back() else {
            return Ok(None);
        };
        command.undo()?;
        debug!(command = %command.description(), "command undone");
        Ok(Some(command))
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_size(&self) -> usize {
        self.history.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Description of the command `undo` would revert next.
    pub fn peek_description(&self) -> Option<String> {
        self.history.back().map(|command| command.description())
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
