//! Normalized path handling and ref validation

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A `/`-separated path with dot segments resolved.
///
/// Normalization is purely lexical: `.` segments and empty segments are
/// dropped and `..` pops the previous segment. An absolute path never climbs
/// above `/`; a relative path silently drops leading `..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self { inner: clean(&raw) }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment, resolving dot segments in the result.
    pub fn join(&self, segment: &str) -> Self {
        if segment.is_empty() {
            return self.clone();
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) if idx > 0 => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Whether this path is absolute.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Path of `self` relative to `root`, if `self` lies strictly below it.
    pub fn relative_to(&self, root: &NormalizedPath) -> Option<String> {
        let prefix = if root.inner.ends_with('/') {
            root.inner.clone()
        } else {
            format!("{}/", root.inner)
        };
        self.inner
            .strip_prefix(&prefix)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

fn clean(raw: &str) -> String {
    let absolute = raw.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in raw.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    let body = parts.join("/");
    if absolute { format!("/{body}") } else { body }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

/// Validate a home-relative ref as stored in the index.
///
/// A ref is a non-empty, relative, `/`-separated path without `.`, `..` or
/// empty segments, so joining it to any root stays below that root.
pub fn validate_ref(reference: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidRef {
        reference: reference.to_string(),
        reason: reason.to_string(),
    };

    if reference.is_empty() {
        return Err(invalid("ref is empty"));
    }
    if reference.starts_with('/') {
        return Err(invalid("ref must be relative"));
    }
    for segment in reference.split('/') {
        match segment {
            "" => return Err(invalid("ref contains an empty segment")),
            "." | ".." => return Err(invalid("ref contains a dot segment")),
            _ => {}
        }
    }
    Ok(())
}

/// Convert a relative filesystem path into a ref.
pub fn ref_from_relative(relative: &Path) -> Result<String> {
    let mut segments = Vec::new();
    for component in relative.components() {
        let segment = component.as_os_str().to_str().ok_or_else(|| Error::InvalidRef {
            reference: relative.to_string_lossy().into_owned(),
            reason: "ref is not valid UTF-8".to_string(),
        })?;
        segments.push(segment);
    }
    let reference = segments.join("/");
    validate_ref(&reference)?;
    Ok(reference)
}
