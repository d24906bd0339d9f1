//! Storage trait and error types.
//!
//! # Path Convention
//!
//! Paths passed to [`Storage::exists`] are document paths relative to the
//! source root, written with forward slashes:
//! - `"README.md"` - file at the root
//! - `"guide/install.md"` - nested file
//! - `"guide"` - directory with a `README.md` or `index.md` landing page

use std::path::PathBuf;

/// Why a storage could not be used or a path was refused.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Source directory does not exist.
    NotFound,
    /// Source path exists but is not a directory.
    NotADirectory,
    /// Document path escapes the source directory.
    InvalidPath,
    /// Any other I/O failure.
    Other,
}

impl StorageErrorKind {
    fn describe(&self) -> &'static str {
        match self {
            Self::NotFound => "source directory not found",
            Self::NotADirectory => "source is not a directory",
            Self::InvalidPath => "path escapes the source directory",
            Self::Other => "storage error",
        }
    }
}

/// Failure to open a storage or to accept a document path.
#[derive(Debug)]
pub struct StorageError {
    pub kind: StorageErrorKind,
    /// Offending path.
    pub path: Option<PathBuf>,
    /// Backend tag shown in messages (`Fs`).
    pub backend: Option<&'static str>,
    io: Option<std::io::Error>,
}

impl StorageError {
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            io: None,
        }
    }

    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_backend(self, backend: &'static str) -> Self {
        Self {
            backend: Some(backend),
            ..self
        }
    }

    /// Classify an I/O failure on `path`.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::NotADirectory => StorageErrorKind::NotADirectory,
            _ => StorageErrorKind::Other,
        };
        Self {
            io: Some(err),
            ..Self::new(kind).with_path(path)
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        f.write_str(self.kind.describe())?;
        if let Some(path) = &self.path {
            write!(f, ": {}", path.display())?;
        }
        if let Some(err) = &self.io {
            write!(f, " ({err})")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.io.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Document existence lookup.
///
/// The resolver calls [`exists`](Storage::exists) for every document path a
/// configuration references. Implementations must be cheap to call repeatedly
/// and safe to share across threads, since locales may be validated in
/// parallel.
pub trait Storage: Send + Sync {
    /// Check if a document exists at the given path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &str) -> bool;
}
