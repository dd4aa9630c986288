use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CsvPersistence, JsonPersistence, PersistenceStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported format: {0:?}")]
pub struct ParseFormatError(pub String);

impl PersistenceFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PersistenceFormat::Json => "json",
            PersistenceFormat::Csv => "csv",
        }
    }

    /// A fresh strategy for this format.
    pub fn strategy(&self) -> Box<dyn PersistenceStrategy> {
        match self {
            PersistenceFormat::Json => Box::new(JsonPersistence::new()),
            PersistenceFormat::Csv => Box::new(CsvPersistence::new()),
        }
    }
}

impl fmt::Display for PersistenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceFormat::Json => f.write_str("JSON"),
            PersistenceFormat::Csv => f.write_str("CSV"),
        }
    }
}

impl FromStr for PersistenceFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(PersistenceFormat::Json),
            "csv" => Ok(PersistenceFormat::Csv),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}
