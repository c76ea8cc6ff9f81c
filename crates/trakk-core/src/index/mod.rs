//! Persisted index of tracked refs
//!
//! The index is the set of refs trakk intends to keep hard-linked, plus the
//! repository root and the directory refs added recursively. It lives in a
//! TOML file (`~/.trakk.toml` by default):
//!
//! ```toml
//! version = 1
//! repository = "/home/me/dotfiles"
//! refs = [".bashrc", ".config/git/config"]
//! dirs = []
//! ```
//!
//! Every mutation is flushed immediately through an atomic write. Nothing is
//! batched, so a crash between two mutations loses at most the second.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trakk_fs::{ConfigStore, NormalizedPath, validate_ref};

use crate::{Error, Result};

/// Current index format version
pub const INDEX_VERSION: u32 = 1;

fn default_version() -> u32 {
    INDEX_VERSION
}

/// On-disk shape of the index file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFile {
    /// Index format version for forward compatibility
    #[serde(default = "default_version")]
    pub version: u32,
    /// Absolute path of the repository root
    pub repository: PathBuf,
    /// Tracked file refs, kept sorted
    #[serde(default)]
    pub refs: BTreeSet<String>,
    /// Directory refs added recursively, kept sorted
    #[serde(default)]
    pub dirs: BTreeSet<String>,
}

impl IndexFile {
    /// Create an empty index pointing at `repository`.
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        Self {
            version: INDEX_VERSION,
            repository: repository.into(),
            refs: BTreeSet::new(),
            dirs: BTreeSet::new(),
        }
    }
}

/// Handle on the index file, loaded at command start.
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: NormalizedPath,
    file: IndexFile,
    store: ConfigStore,
}

impl IndexStore {
    /// Load the index from `path`.
    ///
    /// # Errors
    ///
    /// [`Error::NotInitialized`] when the file does not exist,
    /// [`Error::InvalidIndex`] when the repository is not absolute or a ref
    /// would escape the repository root.
    pub fn open(path: &Path) -> Result<Self> {
        let path = NormalizedPath::new(path);
        if !path.exists() {
            return Err(Error::NotInitialized {
                path: path.to_native(),
            });
        }

        let store = ConfigStore::new();
        let file: IndexFile = store.load(&path)?;
        validate(&path, &file)?;

        tracing::debug!(
            path = %path,
            refs = file.refs.len(),
            dirs = file.dirs.len(),
            "Loaded index"
        );
        Ok(Self { path, file, store })
    }

    /// Write `file` to `path`, replacing any existing index.
    pub fn create(path: &Path, file: IndexFile) -> Result<Self> {
        let path = NormalizedPath::new(path);
        validate(&path, &file)?;
        let index = Self {
            path,
            file,
            store: ConfigStore::new(),
        };
        index.flush()?;
        tracing::info!(path = %index.path, "Wrote index");
        Ok(index)
    }

    /// Location of the index file.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Absolute path of the repository root.
    pub fn repository_root(&self) -> &Path {
        &self.file.repository
    }

    /// Tracked refs in sorted order.
    pub fn list_refs(&self) -> impl Iterator<Item = &str> {
        self.file.refs.iter().map(String::as_str)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.file.refs.contains(reference)
    }

    /// Add `reference`. Returns `false` if it was already present.
    pub fn add(&mut self, reference: &str) -> Result<bool> {
        validate_ref(reference)?;
        if !self.file.refs.insert(reference.to_string()) {
            return Ok(false);
        }
        self.flush()?;
        tracing::debug!(reference, "Added ref to index");
        Ok(true)
    }

    /// Remove `reference`. Returns `false` if it was absent.
    pub fn remove(&mut self, reference: &str) -> Result<bool> {
        if !self.file.refs.remove(reference) {
            return Ok(false);
        }
        self.flush()?;
        tracing::debug!(reference, "Removed ref from index");
        Ok(true)
    }

    /// Directory refs in sorted order.
    pub fn list_dirs(&self) -> impl Iterator<Item = &str> {
        self.file.dirs.iter().map(String::as_str)
    }

    pub fn contains_dir(&self, reference: &str) -> bool {
        self.file.dirs.contains(reference)
    }

    /// Record a directory ref. Returns `false` if it was already present.
    pub fn add_dir(&mut self, reference: &str) -> Result<bool> {
        validate_ref(reference)?;
        if !self.file.dirs.insert(reference.to_string()) {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Forget a directory ref. Returns `false` if it was absent.
    pub fn remove_dir(&mut self, reference: &str) -> Result<bool> {
        if !self.file.dirs.remove(reference) {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// The in-memory index content.
    pub fn file(&self) -> &IndexFile {
        &self.file
    }

    fn flush(&self) -> Result<()> {
        self.store.save(&self.path, &self.file)?;
        Ok(())
    }
}

fn validate(path: &NormalizedPath, file: &IndexFile) -> Result<()> {
    let invalid = |message: String| Error::InvalidIndex {
        path: path.to_native(),
        message,
    };

    if file.version > INDEX_VERSION {
        return Err(invalid(format!(
            "unsupported index version {} (newest known is {INDEX_VERSION})",
            file.version
        )));
    }
    if !file.repository.is_absolute() {
        return Err(invalid(format!(
            "repository path {} is not absolute",
            file.repository.display()
        )));
    }
    for reference in file.refs.iter().chain(file.dirs.iter()) {
        validate_ref(reference).map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}
