use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::CollectionError;
use crate::record::Record;

use super::PersistenceFormat;

pub trait PersistenceStrategy: Send + Sync {
    fn format(&self) -> PersistenceFormat;

    /// Write every record to `path` (canonical extension appended when
    /// missing). Returns the path actually written.
    fn save(&self, records: &[Record], path: &Path) -> Result<PathBuf, CollectionError>;

    /// Read every record from `path` (canonical extension appended when
    /// missing). A file that does not exist yields an empty list.
    fn load(&self, path: &Path) -> Result<Vec<Record>, CollectionError>;
}

impl<S: PersistenceStrategy + ?Sized> PersistenceStrategy for Box<S> {
    fn format(&self) -> PersistenceFormat {
        (**self).format()
    }

    fn save(&self, records: &[Record], path: &Path) -> Result<PathBuf, CollectionError> {
        (**self).save(records, path)
    }

    fn load(&self, path: &Path) -> Result<Vec<Record>, CollectionError> {
        (**self).load(path)
    }
}

/// Append `.{extension}` unless the path already ends with it.
pub(crate) fn resolve_path(path: &Path, extension: &str) -> Result<PathBuf, CollectionError> {
    if path.as_os_str().is_empty() {
        return Err(CollectionError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path must not be empty"),
        ));
    }
    let suffix = format!(".{extension}");
    if path.as_os_str().to_string_lossy().ends_with(&suffix) {
        return Ok(path.to_path_buf());
    }
    let mut resolved = path.as_os_str().to_owned();
    resolved.push(suffix);
    Ok(PathBuf::from(resolved))
}

/// Write through a temporary file in the target directory, then rename it
/// over the target so a failed write never leaves a truncated file behind.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), CollectionError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| CollectionError::io(path, e))?;
    file.write_all(contents)
        .map_err(|e| CollectionError::io(path, e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| CollectionError::io(path, e))?;
    file.persist(path)
        .map_err(|e| CollectionError::io(path, e.error))?;
    Ok(())
}

/// `Ok(None)` when the file does not exist.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>, CollectionError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(CollectionError::io(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_path_appends_missing_extension() {
        assert_eq!(
            resolve_path(Path::new("movies"), "json").unwrap(),
            PathBuf::from("movies.json")
        );
        assert_eq!(
            resolve_path(Path::new("dir/movies.json"), "json").unwrap(),
            PathBuf::from("dir/movies.json")
        );
        assert_eq!(
            resolve_path(Path::new("movies.json"), "csv").unwrap(),
            PathBuf::from("movies.json.csv")
        );
        assert_eq!(
            resolve_path(Path::new("dir/.json"), "json").unwrap(),
            PathBuf::from("dir/.json")
        );
        assert!(resolve_path(Path::new(""), "csv").is_err());
    }

    #[test]
    fn write_atomically_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_atomically(&path, b"data").unwrap_err();
        assert!(matches!(err, CollectionError::Io { .. }));
    }

    #[test]
    fn read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_if_exists(&dir.path().join("nope")).unwrap().is_none());
    }
}
