use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Viewing status of a record.
///
/// Files store the symbolic name (`ToWatch`), user-facing text uses the
/// display label (`To watch`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    ToWatch,
    Watching,
    Watched,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0:?}")]
pub struct ParseStatusError(pub String);

impl Status {
    pub const ALL: [Status; 3] = [Status::ToWatch, Status::Watching, Status::Watched];

    /// Symbolic name, as written to files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ToWatch => "ToWatch",
            Status::Watching => "Watching",
            Status::Watched => "Watched",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Status::ToWatch => "To watch",
            Status::Watching => "Watching",
            Status::Watched => "Watched",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
