use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::command::DEFAULT_MAX_HISTORY;
use crate::error::CollectionError;
use crate::persistence::PersistenceFormat;

pub const DEFAULT_FILENAME: &str = "movies";
pub const AUTOSAVE_FILENAME: &str = "movies_autosave";

/// Settings for a [`Library`](crate::Library).
///
/// Every field is optional in TOML:
///
/// ```toml
/// max_history = 20
/// default_path = "data/movies"
/// autosave = true
/// autosave_path = "data/movies_autosave"
/// format = "csv"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    pub max_history: usize,
    pub default_path: PathBuf,
    pub autosave: bool,
    pub autosave_path: PathBuf,
    pub format: PersistenceFormat,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            default_path: PathBuf::from(DEFAULT_FILENAME),
            autosave: true,
            autosave_path: PathBuf::from(AUTOSAVE_FILENAME),
            format: PersistenceFormat::default(),
        }
    }
}

impl LibraryConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, CollectionError> {
        let config: LibraryConfig =
            toml::from_str(contents).map_err(|e| CollectionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CollectionError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| CollectionError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    pub fn without_autosave(mut self) -> Self {
        self.autosave = false;
        self
    }

    /// Where autosave writes, or `None` when autosave is off.
    pub fn autosave_target(&self) -> Option<&Path> {
        self.autosave.then_some(self.autosave_path.as_path())
    }

    pub(crate) fn validate(&self) -> Result<(), CollectionError> {
        if self.max_history == 0 {
            return Err(CollectionError::Config(
                "max_history must be at least 1".to_string(),
            ));
        }
        if self.default_path.as_os_str().is_empty() {
            return Err(CollectionError::Config(
                "default_path must not be empty".to_string(),
            ));
        }
        if self.autosave && self.autosave_path.as_os_str().is_empty() {
            return Err(CollectionError::Config(
                "autosave_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
