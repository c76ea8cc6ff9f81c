//! Error types for trakk-fs

use std::path::PathBuf;

/// Result type for trakk-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trakk-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    /// A path cannot be tracked: outside home, a symlink, or not a regular file.
    #[error("Out of scope: {path}: {reason}")]
    OutOfScope { path: PathBuf, reason: String },

    #[error("Invalid ref '{reference}': {reason}")]
    InvalidRef { reference: String, reason: String },

    #[error("Failed to link {src} -> {dest}: {source}")]
    LinkFailed {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to unlink {path}: {source}")]
    UnlinkFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn out_of_scope(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::OutOfScope {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
