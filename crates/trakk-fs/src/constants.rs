//! Well-known names used by trakk on disk.

use std::path::Path;

/// Standard trakk filesystem markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrakkPath {
    /// The `.git` directory inside the repository (never walked)
    GitDir,
    /// The index file in the home directory
    IndexFile,
}

impl TrakkPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir => ".git",
            Self::IndexFile => ".trakk.toml",
        }
    }
}

impl AsRef<Path> for TrakkPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for TrakkPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for TrakkPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether `reference` names the version-control metadata subtree.
pub fn is_vcs_metadata(reference: &str) -> bool {
    let git_dir = TrakkPath::GitDir.as_str();
    reference == git_dir
        || reference
            .strip_prefix(git_dir)
            .is_some_and(|rest| rest.starts_with('/'))
}
