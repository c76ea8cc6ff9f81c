//! Hard-link management between the system and the repository mirror
//!
//! Every tracked file exists twice: once at its system location under the
//! home directory ("mine") and once inside the repository ("theirs"). Both
//! directory entries point at the same inode, so an edit through either is
//! visible through the other until one side is replaced.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::{EntryKind, probe};
use crate::path::NormalizedPath;
use crate::{Error, Result};

/// Creates and removes hard links below a scope directory.
#[derive(Debug, Clone)]
pub struct Linker {
    scope: PathBuf,
}

impl Linker {
    /// Create a linker that refuses to touch anything outside `scope`.
    pub fn new(scope: impl Into<PathBuf>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// The directory every link endpoint must lie under.
    pub fn scope(&self) -> &Path {
        &self.scope
    }

    /// Hard-link `src` to `dest`.
    ///
    /// With `force`, an existing `dest` is removed first. Missing parent
    /// directories of `dest` are created. The source is validated before
    /// anything is removed; if removal succeeds and linking then fails, `dest`
    /// is gone and no link exists.
    pub fn link(&self, src: &Path, dest: &Path, force: bool) -> Result<()> {
        self.ensure_in_scope(src)?;
        self.ensure_in_scope(dest)?;

        match probe(src)? {
            EntryKind::File => {}
            EntryKind::Missing => {
                return Err(Error::LinkFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    source: std::io::Error::new(ErrorKind::NotFound, "source does not exist"),
                });
            }
            _ => return Err(Error::out_of_scope(src, "link source is not a regular file")),
        }

        if force {
            match probe(dest)? {
                EntryKind::Missing => {}
                EntryKind::File | EntryKind::Symlink => {
                    tracing::debug!(dest = %dest.display(), "Removing link destination");
                    fs::remove_file(dest).map_err(|e| Error::UnlinkFailed {
                        path: dest.to_path_buf(),
                        source: e,
                    })?;
                }
                _ => {
                    return Err(Error::out_of_scope(
                        dest,
                        "refusing to replace a directory or special file",
                    ));
                }
            }
        }

        if let Some(parent) = dest.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        fs::hard_link(src, dest).map_err(|e| Error::LinkFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(src = %src.display(), dest = %dest.display(), force, "Created hard link");
        Ok(())
    }

    /// Remove the directory entry at `dest`.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn unlink(&self, dest: &Path) -> Result<bool> {
        self.ensure_in_scope(dest)?;

        match probe(dest)? {
            EntryKind::Missing => Ok(false),
            EntryKind::File | EntryKind::Symlink => {
                fs::remove_file(dest).map_err(|e| Error::UnlinkFailed {
                    path: dest.to_path_buf(),
                    source: e,
                })?;
                tracing::debug!(dest = %dest.display(), "Unlinked");
                Ok(true)
            }
            _ => Err(Error::out_of_scope(dest, "can only unlink regular files")),
        }
    }

    fn ensure_in_scope(&self, path: &Path) -> Result<()> {
        let normalized = NormalizedPath::new(path);
        if normalized
            .relative_to(&NormalizedPath::new(&self.scope))
            .is_none()
        {
            return Err(Error::out_of_scope(
                path,
                format!("path must be located under {}", self.scope.display()),
            ));
        }
        Ok(())
    }
}

/// Whether `a` and `b` are the same inode on the same device.
#[cfg(unix)]
pub fn same_inode(a: &Path, b: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let meta_a = fs::symlink_metadata(a).map_err(|e| Error::io(a, e))?;
    let meta_b = fs::symlink_metadata(b).map_err(|e| Error::io(b, e))?;
    Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn link_creates_parent_directories() {
        let home = TempDir::new().unwrap();
        let src = home.path().join(".vimrc");
        fs::write(&src, "set nu").unwrap();
        let dest = home.path().join("dotfiles/deep/.vimrc");

        Linker::new(home.path()).link(&src, &dest, false).unwrap();

        assert!(same_inode(&src, &dest).unwrap());
    }

    #[test]
    fn link_without_force_refuses_existing_destination() {
        let home = TempDir::new().unwrap();
        let src = home.path().join("a");
        let dest = home.path().join("b");
        fs::write(&src, "a").unwrap();
        fs::write(&dest, "b").unwrap();

        let err = Linker::new(home.path()).link(&src, &dest, false).unwrap_err();
        assert!(matches!(err, Error::LinkFailed { .. }));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "b");
    }

    #[test]
    fn forced_link_replaces_destination() {
        let home = TempDir::new().unwrap();
        let src = home.path().join("a");
        let dest = home.path().join("b");
        fs::write(&src, "a").unwrap();
        fs::write(&dest, "b").unwrap();

        Linker::new(home.path()).link(&src, &dest, true).unwrap();

        assert!(same_inode(&src, &dest).unwrap());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "a");
    }

    #[test]
    fn forced_link_with_missing_source_keeps_destination() {
        let home = TempDir::new().unwrap();
        let dest = home.path().join("b");
        fs::write(&dest, "b").unwrap();

        let result = Linker::new(home.path()).link(&home.path().join("gone"), &dest, true);

        assert!(result.is_err());
        assert!(dest.exists());
    }

    #[test]
    fn unlink_reports_whether_something_was_removed() {
        let home = TempDir::new().unwrap();
        let file = home.path().join("f");
        fs::write(&file, "x").unwrap();
        let linker = Linker::new(home.path());

        assert!(linker.unlink(&file).unwrap());
        assert!(!linker.unlink(&file).unwrap());
    }

    #[test]
    fn paths_outside_scope_are_rejected() {
        let home = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let src = outside.path().join("x");
        fs::write(&src, "x").unwrap();

        let err = Linker::new(home.path())
            .link(&src, &home.path().join("x"), false)
            .unwrap_err();
        assert!(matches!(err, Error::OutOfScope { .. }));
    }
}
