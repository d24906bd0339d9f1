//! Document existence lookup for docnav.
//!
//! The site configuration resolver never reads document content. It only needs
//! to know whether a path named by a sidebar or nav entry refers to a real
//! source document. This crate provides that contract as the [`Storage`] trait:
//!
//! - [`FsStorage`] answers from a source directory on the local filesystem
//! - [`MockStorage`] answers from an in-memory set (behind the `mock` feature)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docnav_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::open(PathBuf::from("docs"))?;
//! assert!(storage.exists("README.md"));
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
