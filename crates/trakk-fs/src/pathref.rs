//! Resolution of user-supplied paths into home-relative refs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::path::{NormalizedPath, validate_ref};
use crate::{Error, Result};

/// A user-supplied path resolved against the home directory.
///
/// Holds the absolute location, the ref (the path relative to home, as stored
/// in the index) and whether the location currently is a directory. The
/// target does not have to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRef {
    absolute: PathBuf,
    reference: String,
    is_dir: bool,
}

impl PathRef {
    /// Resolve `input` into a PathRef.
    ///
    /// A leading `~` expands to `home`; relative inputs are taken relative to
    /// `cwd`. Fails with [`Error::OutOfScope`] when the result is not strictly
    /// below `home` or is a symbolic link or special file.
    pub fn resolve(input: impl AsRef<Path>, home: &Path, cwd: &Path) -> Result<Self> {
        let expanded = expand_tilde(input.as_ref(), home);
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            cwd.join(expanded)
        };

        let absolute = NormalizedPath::new(&joined);
        let home = NormalizedPath::new(home);
        let reference = absolute.relative_to(&home).ok_or_else(|| {
            Error::out_of_scope(
                absolute.to_native(),
                format!("path is not located under the home directory {home}"),
            )
        })?;

        Self::build(absolute.to_native(), reference)
    }

    /// Build a PathRef for a ref already known to the index.
    pub fn from_ref(home: &Path, reference: &str) -> Result<Self> {
        validate_ref(reference)?;
        Self::build(home.join(reference), reference.to_string())
    }

    fn build(absolute: PathBuf, reference: String) -> Result<Self> {
        let is_dir = match fs::symlink_metadata(&absolute) {
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(Error::out_of_scope(
                    &absolute,
                    "symbolic links cannot be tracked",
                ));
            }
            Ok(meta) if meta.is_dir() => true,
            Ok(meta) if meta.is_file() => false,
            Ok(_) => {
                return Err(Error::out_of_scope(
                    &absolute,
                    "not a regular file or directory",
                ));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(Error::io(&absolute, e)),
        };

        tracing::debug!(path = %absolute.display(), reference = %reference, is_dir, "Resolved path");
        Ok(Self {
            absolute,
            reference,
            is_dir,
        })
    }

    /// Absolute filesystem location.
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// Home-relative ref.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether the location was a directory at resolution time.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Whether the location lies strictly below `root`.
    pub fn is_under(&self, root: &Path) -> bool {
        NormalizedPath::new(&self.absolute)
            .relative_to(&NormalizedPath::new(root))
            .is_some()
    }

    /// Ref of this location relative to `root`, if it lies below it.
    pub fn relative_to(&self, root: &Path) -> Option<String> {
        NormalizedPath::new(&self.absolute).relative_to(&NormalizedPath::new(root))
    }
}

impl std::fmt::Display for PathRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.absolute.display())
    }
}

fn expand_tilde(input: &Path, home: &Path) -> PathBuf {
    let text = input.to_string_lossy();
    if text == "~" {
        home.to_path_buf()
    } else if let Some(rest) = text.strip_prefix("~/") {
        home.join(rest)
    } else {
        input.to_path_buf()
    }
}
