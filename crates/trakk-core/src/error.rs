//! Error types for trakk-core

use std::path::PathBuf;

/// Result type for trakk-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trakk-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No index file exists yet
    #[error("Not initialized: no index found at {path} (run `trakk init <path>` first)")]
    NotInitialized { path: PathBuf },

    /// The index file exists but its content is unusable
    #[error("Invalid index at {path}: {message}")]
    InvalidIndex { path: PathBuf, message: String },

    /// A ref was expected to be in the index
    #[error("Not tracked: {reference}")]
    NotTracked { reference: String },

    /// `init` was pointed at a directory that already holds files
    #[error("Repository directory {path} is not empty")]
    RepositoryNotEmpty { path: PathBuf },

    /// The home directory could not be determined
    #[error("Could not determine the home directory")]
    HomeNotFound,

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from trakk-fs
    #[error(transparent)]
    Fs(#[from] trakk_fs::Error),

    /// Version-control error from trakk-git
    #[error(transparent)]
    Git(#[from] trakk_git::Error),

    /// Standard I/O error (prompt input and output)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
