//! Local filesystem collection source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{CollectionSource, LoadError, WriteError};

/// A collection document stored as a file on disk.
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionSource for LocalFileSource {
    fn read_document(&self) -> Result<Vec<u8>, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::NotFound(self.location()));
        }

        fs::read(&self.path).map_err(|source| LoadError::Read {
            location: self.location(),
            source,
        })
    }

    fn write_document(&self, contents: &[u8]) -> Result<(), WriteError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                location: parent.display().to_string(),
                source,
            })?;
        }

        fs::write(&self.path, contents).map_err(|source| WriteError::Io {
            location: self.location(),
            source,
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = LocalFileSource::new(dir.path().join("media.json"));

        assert!(matches!(source.read_document(), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let source = LocalFileSource::new(dir.path().join("nested/deeper/media.json"));

        source.write_document(b"{}").unwrap();

        assert_eq!(source.read_document().unwrap(), b"{}");
    }

    #[test]
    fn bare_file_name_has_no_parent_to_create() {
        let source = LocalFileSource::new(PathBuf::from("media.json"));
        assert_eq!(source.location(), "media.json");
        assert_eq!(source.path(), Path::new("media.json"));
    }
}
