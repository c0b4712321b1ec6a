//! Common error types used throughout cardprep.
//!
//! This module provides a small error type for failures that are not tied to
//! a particular imaging backend.

use std::path::PathBuf;

/// Common error type for cardprep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A folder the run depends on does not exist.
    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    /// A file name could not be used to derive an output name.
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new FolderNotFound error.
    pub fn folder_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::FolderNotFound(path.into())
    }

    /// Create a new InvalidFileName error.
    pub fn invalid_file_name<S: Into<String>>(name: S) -> Self {
        Self::InvalidFileName(name.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
