//! Error types for trakk-git

use std::path::PathBuf;

/// Result type for trakk-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trakk-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] trakk_fs::Error),

    #[error("Not a git repository with a working tree: {path}")]
    NotARepository { path: PathBuf },
}
