//! Reconciliation: classify every known or discoverable ref
//!
//! Three stores are compared: the index (what should be linked), the
//! filesystem at the system and repository locations, and version control
//! (what is committed). The result is one [`RefStatus`] per divergent ref;
//! consistent refs produce nothing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use trakk_fs::io::{is_write_temp, probe};
use trakk_fs::{EntryKind, TrakkPath, is_vcs_metadata, same_inode, walk_files};
use trakk_git::VcsPort;

use super::status::RefStatus;
use crate::Result;
use crate::index::IndexStore;

/// Computes statuses from a snapshot of the three stores.
pub struct Reconciler<'a, V: VcsPort> {
    home: &'a Path,
    index_path: &'a Path,
    index: &'a IndexStore,
    vcs: &'a V,
}

impl<'a, V: VcsPort> Reconciler<'a, V> {
    pub fn new(home: &'a Path, index_path: &'a Path, index: &'a IndexStore, vcs: &'a V) -> Self {
        Self {
            home,
            index_path,
            index,
            vcs,
        }
    }

    /// Classify everything, in discovery order.
    ///
    /// Indexed refs come first (index order), then unindexed files below
    /// directory refs, then unindexed repository files, then refs only
    /// version control still knows about.
    ///
    /// # Errors
    ///
    /// Fails fast with an out-of-scope error when a symlink, directory or
    /// special file sits where a tracked file is expected, and on any
    /// version-control failure.
    pub fn compute_all_statuses(&self) -> Result<Vec<RefStatus>> {
        let mut dirty = self.vcs.uncommitted_refs()?;
        let mut statuses = Vec::new();

        for reference in self.index.list_refs() {
            if let Some(status) = self.classify_link(reference, &dirty)? {
                statuses.push(status);
            }
            dirty.remove(reference);
        }

        statuses.extend(self.expand_directory_refs(&mut dirty)?);

        let repo = self.index.repository_root();
        for reference in walk_files(repo, &[repo.join(TrakkPath::GitDir)])? {
            if is_vcs_metadata(&reference) || self.index.contains(&reference) {
                continue;
            }
            dirty.remove(&reference);
            let theirs = repo.join(&reference);
            tracing::debug!(reference = %reference, "Untracked repository file");
            statuses.push(RefStatus::untracked(reference, theirs));
        }

        for reference in dirty {
            if is_vcs_metadata(&reference) {
                continue;
            }
            let (mine, theirs) = self.locations(&reference);
            tracing::debug!(reference = %reference, "Dirty in version control only");
            statuses.push(RefStatus::uncommitted(reference, mine, theirs));
        }

        tracing::debug!(count = statuses.len(), "Computed statuses");
        Ok(statuses)
    }

    /// Classify one indexed ref against the filesystem and the dirty set.
    ///
    /// | theirs | mine | same inode | dirty | result |
    /// |---|---|---|---|---|
    /// | no | yes | | | C |
    /// | no | no | | | E |
    /// | yes | no | | | D |
    /// | yes | yes | no | | B |
    /// | yes | yes | yes | yes | A |
    /// | yes | yes | yes | no | none |
    pub fn classify_link(
        &self,
        reference: &str,
        dirty: &BTreeSet<String>,
    ) -> Result<Option<RefStatus>> {
        let (mine, theirs) = self.locations(reference);
        let mine_exists = expect_file_slot(&mine)?;
        let theirs_exists = expect_file_slot(&theirs)?;

        let status = match (theirs_exists, mine_exists) {
            (false, true) => Some(RefStatus::missing_in_repository(reference, mine, theirs)),
            (false, false) => Some(RefStatus::vanished(reference, mine, theirs)),
            (true, false) => Some(RefStatus::missing_in_system(reference, mine, theirs)),
            (true, true) => {
                if !same_inode(&mine, &theirs)? {
                    Some(RefStatus::inode_mismatch(reference, mine, theirs))
                } else if dirty.contains(reference) {
                    Some(RefStatus::uncommitted(reference, mine, theirs))
                } else {
                    None
                }
            }
        };

        if let Some(status) = &status {
            tracing::debug!(reference, kind = %status.kind(), "Classified ref");
        }
        Ok(status)
    }

    /// Classify a single ref the way a full computation would.
    ///
    /// An unindexed ref with a repository copy is untracked. An unindexed
    /// file below a directory ref is classified like an indexed one. Any
    /// other unindexed ref yields `Ok(None)` and is left to the caller to
    /// reject.
    pub fn classify(&self, reference: &str) -> Result<Option<RefStatus>> {
        if !self.index.contains(reference) {
            let (mine, theirs) = self.locations(reference);
            if expect_file_slot(&theirs)? {
                return Ok(Some(RefStatus::untracked(reference, theirs)));
            }
            if !(self.under_directory_ref(reference) && expect_file_slot(&mine)?) {
                return Ok(None);
            }
        }
        let dirty = self.vcs.uncommitted_refs()?;
        self.classify_link(reference, &dirty)
    }

    /// Whether `reference` lies below one of the index's directory refs.
    pub fn under_directory_ref(&self, reference: &str) -> bool {
        self.index.list_dirs().any(|dir| {
            reference
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// System and repository locations of `reference`.
    pub fn locations(&self, reference: &str) -> (PathBuf, PathBuf) {
        (
            self.home.join(reference),
            self.index.repository_root().join(reference),
        )
    }

    /// Files below directory refs that are neither indexed nor mirrored.
    ///
    /// These were created in a tracked directory after it was added; they
    /// are classified like indexed refs, which makes them C. Each classified
    /// ref leaves `dirty`. The repository and the index file (with its
    /// write temporaries) are never candidates.
    fn expand_directory_refs(&self, dirty: &mut BTreeSet<String>) -> Result<Vec<RefStatus>> {
        let repo = self.index.repository_root();
        let prune = [repo.to_path_buf(), self.index_path.to_path_buf()];
        let mut seen = BTreeSet::new();
        let mut statuses = Vec::new();

        for dir in self.index.list_dirs() {
            let root = self.home.join(dir);
            match probe(&root)? {
                EntryKind::Directory => {}
                EntryKind::Missing => continue,
                _ => {
                    return Err(trakk_fs::Error::out_of_scope(
                        &root,
                        "directory ref is no longer a directory",
                    )
                    .into());
                }
            }

            for relative in walk_files(&root, &prune)? {
                let reference = format!("{dir}/{relative}");
                if self.index.contains(&reference)
                    || repo.join(&reference).exists()
                    || is_write_temp(self.index_path, &self.home.join(&reference))
                    || !seen.insert(reference.clone())
                {
                    continue;
                }
                if let Some(status) = self.classify_link(&reference, dirty)? {
                    statuses.push(status);
                }
                dirty.remove(&reference);
            }
        }
        Ok(statuses)
    }
}

/// Whether a tracked-file location is occupied, rejecting anything but a
/// regular file.
fn expect_file_slot(path: &Path) -> Result<bool> {
    match probe(path)? {
        EntryKind::Missing => Ok(false),
        EntryKind::File => Ok(true),
        EntryKind::Symlink => Err(trakk_fs::Error::out_of_scope(
            path,
            "symbolic links cannot be tracked",
        )
        .into()),
        EntryKind::Directory => Err(trakk_fs::Error::out_of_scope(
            path,
            "expected a regular file but found a directory",
        )
        .into()),
        EntryKind::Other => Err(trakk_fs::Error::out_of_scope(
            path,
            "not a regular file",
        )
        .into()),
    }
}
