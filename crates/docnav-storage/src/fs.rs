//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for answering existence queries against a source
//! directory on the local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Landing page file names checked when a path names a directory.
const LANDING_PAGES: [&str; 2] = ["README.md", "index.md"];

/// Filesystem storage implementation.
///
/// A path exists when it names a regular file under the source directory, or a
/// directory that contains a `README.md` or `index.md` landing page.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use docnav_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::open(PathBuf::from("docs"))?;
/// let found = storage.exists("installation.md");
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a filesystem storage without checking the source directory.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Create a filesystem storage, verifying the source directory is usable.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `source_dir` does not exist or is not a
    /// directory.
    pub fn open(source_dir: PathBuf) -> Result<Self, StorageError> {
        let meta = fs::metadata(&source_dir).map_err(|e| {
            StorageError::io(e, source_dir.clone()).with_backend(BACKEND)
        })?;

        if !meta.is_dir() {
            return Err(StorageError::new(StorageErrorKind::NotADirectory)
                .with_path(source_dir)
                .with_backend(BACKEND));
        }

        Ok(Self::new(source_dir))
    }

    /// Validate that a path doesn't escape the source directory.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.trim_start_matches('/'));
        Self::validate_path(relative)?;
        Ok(self.source_dir.join(relative))
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &str) -> bool {
        let full_path = match self.resolve(path) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(path, error = %e, "Rejected document path");
                return false;
            }
        };

        if full_path.is_file() {
            return true;
        }

        full_path.is_dir()
            && LANDING_PAGES
                .iter()
                .any(|name| full_path.join(name).is_file())
    }
}
