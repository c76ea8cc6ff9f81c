//! Recursive discovery of regular files below a directory

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::path::ref_from_relative;
use crate::{Error, Result};

/// Walk `root` and return the `/`-separated relative path of every regular
/// file below it, sorted.
///
/// Directories whose absolute path is listed in `prune` are skipped together
/// with their contents. Symbolic links and special files abort the walk with
/// [`Error::OutOfScope`].
pub fn walk_files(root: &Path, prune: &[PathBuf]) -> Result<Vec<String>> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !prune.iter().any(|p| p.as_path() == entry.path()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            return Err(Error::out_of_scope(
                entry.path(),
                "symbolic links cannot be tracked",
            ));
        }
        if !file_type.is_file() {
            return Err(Error::out_of_scope(
                entry.path(),
                "not a regular file or directory",
            ));
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::out_of_scope(entry.path(), "escaped the walk root"))?;
        files.push(ref_from_relative(relative)?);
    }

    tracing::debug!(root = %root.display(), count = files.len(), "Walked directory");
    Ok(files)
}
