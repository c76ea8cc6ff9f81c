//! git2-backed implementation of the version-control port

use std::collections::BTreeSet;
use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{DiffFormat, DiffOptions, ErrorCode, Repository, Status, StatusOptions, Tree};
use trakk_fs::NormalizedPath;

use crate::{Error, Result, provider::VcsPort};

/// A git repository with a working tree, opened at its root.
pub struct GitRepository {
    root: NormalizedPath,
    repo: Repository,
}

impl GitRepository {
    /// Open the repository whose working tree is exactly `root`.
    ///
    /// Parent directories are not searched.
    pub fn open(root: &Path) -> Result<Self> {
        let repo = Repository::open(root).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository {
                path: root.to_path_buf(),
            },
            _ => Error::Git(e),
        })?;
        if repo.is_bare() {
            return Err(Error::NotARepository {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            root: NormalizedPath::new(root),
            repo,
        })
    }

    /// Initialize a new repository at `root`, or reopen an existing one.
    pub fn init(root: &Path) -> Result<Self> {
        let repo = Repository::init(root)?;
        tracing::info!(root = %root.display(), "Initialized git repository");
        Ok(Self {
            root: NormalizedPath::new(root),
            repo,
        })
    }

    /// Whether `root` holds a repository that [`GitRepository::open`] accepts.
    pub fn exists_at(root: &Path) -> bool {
        Self::open(root).is_ok()
    }

    /// Working tree root.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl VcsPort for GitRepository {
    fn uncommitted_refs(&self) -> Result<BTreeSet<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .include_unmodified(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut dirty = BTreeSet::new();
        for entry in statuses.iter() {
            let status = entry.status();
            if status == Status::CURRENT || status.contains(Status::IGNORED) {
                continue;
            }
            if let Some(path) = entry.path() {
                dirty.insert(path.to_string());
            }
        }

        tracing::debug!(count = dirty.len(), "Collected uncommitted refs");
        Ok(dirty)
    }

    fn diff_patch(&self, reference: &str) -> Result<String> {
        let head_tree = self.head_tree()?;

        let mut opts = DiffOptions::new();
        opts.pathspec(reference)
            .disable_pathspec_match(true)
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .show_untracked_content(true);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut opts))?;

        let mut patch = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;
        Ok(patch)
    }

    fn checkout(&self, reference: &str) -> Result<bool> {
        let Some(head_tree) = self.head_tree()? else {
            return Ok(false);
        };
        match head_tree.get_path(Path::new(reference)) {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        let mut builder = CheckoutBuilder::new();
        builder.force().disable_pathspec_match(true).path(reference);
        self.repo.checkout_head(Some(&mut builder))?;

        tracing::info!(reference, "Checked out ref from HEAD");
        Ok(true)
    }
}
