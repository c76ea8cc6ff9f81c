//! The command surface: one handle owning index, linker and version control

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use trakk_fs::io::{is_write_temp, probe};
use trakk_fs::{EntryKind, Linker, NormalizedPath, PathRef, TrakkPath, same_inode, walk_files};
use trakk_git::{GitRepository, VcsPort};

use crate::environment::Environment;
use crate::index::{IndexFile, IndexStore};
use crate::sync::{
    Prompter, Reconciler, RefStatus, Repairer, ShowReport, SyncOptions, SyncReport, sort_by_kind,
};
use crate::{Error, Result};

/// Outcome of [`Workspace::init`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// An index with a working repository was already in place
    Existing { repository: PathBuf },
    /// A new index was written and a repository initialized
    Created { repository: PathBuf },
}

/// Everything a command needs, constructed at command start.
///
/// Generic over the version-control port so the engine can run against a
/// fake in tests.
pub struct Workspace<V: VcsPort = GitRepository> {
    env: Environment,
    index: IndexStore,
    linker: Linker,
    vcs: V,
}

impl Workspace<GitRepository> {
    /// Load the index and open its repository.
    ///
    /// # Errors
    ///
    /// [`Error::NotInitialized`] when there is no index file yet.
    pub fn open(env: Environment) -> Result<Self> {
        let index = IndexStore::open(env.index_path())?;
        let repo = NormalizedPath::new(index.repository_root());
        if repo.relative_to(&NormalizedPath::new(env.home())).is_none() {
            return Err(Error::InvalidIndex {
                path: env.index_path().to_path_buf(),
                message: format!("repository {repo} is not located under the home directory"),
            });
        }
        let vcs = GitRepository::open(index.repository_root())?;
        Ok(Self::with_vcs(env, index, vcs))
    }

    /// Create the index and the repository at `path`.
    ///
    /// Succeeds without changes when an index already points at a working
    /// repository. Otherwise `path` must lie under the home directory and be
    /// missing or a directory without files outside `.git`. Refs of an
    /// existing index whose repository is gone are carried over.
    pub fn init(env: &Environment, path: &Path) -> Result<InitOutcome> {
        let previous = match IndexStore::open(env.index_path()) {
            Ok(index) => {
                if GitRepository::exists_at(index.repository_root()) {
                    return Ok(InitOutcome::Existing {
                        repository: index.repository_root().to_path_buf(),
                    });
                }
                Some(index.file().clone())
            }
            Err(Error::NotInitialized { .. }) => None,
            Err(e) => return Err(e),
        };

        let target = PathRef::resolve(path, env.home(), env.cwd())?;
        let root = target.absolute();
        match probe(root)? {
            EntryKind::Missing => {
                fs::create_dir_all(root).map_err(|e| trakk_fs::Error::io(root, e))?;
            }
            EntryKind::Directory => {
                if !walk_files(root, &[root.join(TrakkPath::GitDir)])?.is_empty() {
                    return Err(Error::RepositoryNotEmpty {
                        path: root.to_path_buf(),
                    });
                }
            }
            _ => {
                return Err(
                    trakk_fs::Error::out_of_scope(root, "repository must be a directory").into(),
                );
            }
        }

        let mut file = IndexFile::new(root);
        if let Some(previous) = previous {
            file.refs = previous.refs;
            file.dirs = previous.dirs;
        }
        IndexStore::create(env.index_path(), file)?;
        GitRepository::init(root)?;

        Ok(InitOutcome::Created {
            repository: root.to_path_buf(),
        })
    }
}

impl<V: VcsPort> Workspace<V> {
    /// Assemble a workspace from already-opened parts.
    pub fn with_vcs(env: Environment, index: IndexStore, vcs: V) -> Self {
        let linker = Linker::new(env.home());
        Self {
            env,
            index,
            linker,
            vcs,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn index(&self) -> &IndexStore {
        &self.index
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    fn reconciler(&self) -> Reconciler<'_, V> {
        Reconciler::new(self.env.home(), self.env.index_path(), &self.index, &self.vcs)
    }

    /// Every divergent ref, in discovery order.
    pub fn compute_all_statuses(&self) -> Result<Vec<RefStatus>> {
        self.reconciler().compute_all_statuses()
    }

    /// Every divergent ref, sorted by kind for display.
    pub fn status(&self) -> Result<Vec<RefStatus>> {
        let mut statuses = self.compute_all_statuses()?;
        sort_by_kind(&mut statuses);
        Ok(statuses)
    }

    /// Repair `statuses`, asking `prompter` where a choice is needed.
    pub fn sync<P: Prompter + ?Sized>(
        &mut self,
        statuses: Vec<RefStatus>,
        prompter: &mut P,
        options: SyncOptions,
    ) -> Result<SyncReport> {
        Repairer::new(&mut self.index, &self.linker, prompter, options).sync(statuses)
    }

    /// Diagnose one ref, named by its system or repository path.
    pub fn show(&self, input: &Path) -> Result<ShowReport> {
        let (reference, is_dir) = self.resolve_ref(input)?;
        if is_dir {
            return Err(trakk_fs::Error::out_of_scope(input, "show expects a file").into());
        }

        let status = self.reconciler().classify(&reference)?;
        if status.is_none() && !self.index.contains(&reference) {
            return Err(Error::NotTracked { reference });
        }

        ShowReport::build(&reference, status, || Ok(self.vcs.diff_patch(&reference)?))
    }

    /// Track files and directories.
    ///
    /// Every input is resolved before anything is mutated. Directories
    /// expand to the regular files below them and are recorded as directory
    /// refs. Each new ref is indexed first and linked second.
    pub fn add(&mut self, inputs: &[PathBuf]) -> Result<SyncReport> {
        let repo = self.index.repository_root().to_path_buf();
        let mut targets = Vec::new();
        for input in inputs {
            let target = PathRef::resolve(input, self.env.home(), self.env.cwd())?;
            self.check_addable(&target)?;
            targets.push(target);
        }

        let prune = [repo, self.env.index_path().to_path_buf()];
        let mut files = BTreeSet::new();
        let mut dirs = Vec::new();
        for target in &targets {
            if target.is_dir() {
                for relative in walk_files(target.absolute(), &prune)? {
                    let reference = format!("{}/{relative}", target.reference());
                    if !is_write_temp(self.env.index_path(), &self.env.home().join(&reference)) {
                        files.insert(reference);
                    }
                }
                dirs.push(target.reference().to_string());
            } else {
                files.insert(target.reference().to_string());
            }
        }

        let mut report = SyncReport::success();
        for reference in files {
            if self.index.contains(&reference) {
                report.skip(format!("File already tracked: ~/{reference}"));
                continue;
            }
            self.index.add(&reference)?;

            let (mine, theirs) = self.locations(&reference);
            match self.linker.link(&mine, &theirs, false) {
                Ok(()) => report.action(format!("Tracking ~/{reference}")),
                Err(e) => {
                    tracing::warn!(reference = %reference, error = %e, "Link failed");
                    report.error(format!("{reference}: {e}"));
                }
            }
        }

        for dir in dirs {
            if self.index.add_dir(&dir)? {
                report.action(format!("Tracking directory ~/{dir}"));
            }
        }
        Ok(report)
    }

    /// Stop tracking refs named by system or repository path.
    ///
    /// The repository copy is unlinked and the system copy kept. A repository
    /// copy that is the only copy left is kept as well.
    pub fn remove(&mut self, inputs: &[PathBuf]) -> Result<SyncReport> {
        let mut refs = BTreeSet::new();
        let mut dirs = Vec::new();
        for input in inputs {
            let (reference, is_dir) = self.resolve_ref(input)?;
            if is_dir || self.index.contains_dir(&reference) {
                let prefix = format!("{reference}/");
                refs.extend(
                    self.index
                        .list_refs()
                        .filter(|r| r.starts_with(&prefix))
                        .map(str::to_string),
                );
                dirs.push(reference);
            } else {
                refs.insert(reference);
            }
        }

        let mut report = SyncReport::success();
        for reference in refs {
            if self.index.remove(&reference)? {
                report.action(format!("Removed ~/{reference} from the index"));
            } else {
                report.skip(format!("Not tracked: {reference}"));
            }

            let (mine, theirs) = self.locations(&reference);
            if !mine.exists() && theirs.exists() {
                report.skip(format!(
                    "Kept {}: the system copy is missing",
                    theirs.display()
                ));
                continue;
            }
            match self.linker.unlink(&theirs) {
                Ok(true) => report.action(format!("Unlinked {}", theirs.display())),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(reference = %reference, error = %e, "Unlink failed");
                    report.error(format!("{reference}: {e}"));
                }
            }
        }

        for dir in dirs {
            if self.index.remove_dir(&dir)? {
                report.action(format!("Removed directory ~/{dir} from the index"));
            }
        }
        Ok(report)
    }

    /// Tracked refs as `~/<ref>`, sorted.
    pub fn list(&self) -> Vec<String> {
        self.index.list_refs().map(|r| format!("~/{r}")).collect()
    }

    /// Put the repository's version of refs back onto the system.
    ///
    /// A ref whose copies are distinct inodes (or whose system copy is gone)
    /// is relinked from the repository. A linked ref with uncommitted changes
    /// is checked out from HEAD and then relinked, since checkout replaces
    /// the repository file.
    pub fn restore(&mut self, inputs: &[PathBuf]) -> Result<SyncReport> {
        let mut refs = BTreeSet::new();
        for input in inputs {
            let (reference, _) = self.resolve_ref(input)?;
            if !self.index.contains(&reference) {
                return Err(Error::NotTracked { reference });
            }
            refs.insert(reference);
        }

        let dirty = self.vcs.uncommitted_refs()?;
        let mut report = SyncReport::success();
        for reference in refs {
            let (mine, theirs) = self.locations(&reference);
            if !theirs.is_file() {
                report.error(format!("{reference}: no repository copy to restore from"));
                continue;
            }

            let linked = if mine.exists() {
                match same_inode(&mine, &theirs) {
                    Ok(same) => same,
                    Err(e) => {
                        report.error(format!("{reference}: {e}"));
                        continue;
                    }
                }
            } else {
                false
            };

            if linked {
                if !dirty.contains(&reference) {
                    report.skip(format!("{reference}: already matches HEAD"));
                    continue;
                }
                if !self.vcs.checkout(&reference)? {
                    report.skip(format!("{reference}: not committed, nothing to restore"));
                    continue;
                }
            }

            match self.linker.link(&theirs, &mine, true) {
                Ok(()) => {
                    tracing::info!(reference = %reference, "Restored");
                    report.action(format!("Restored ~/{reference}"));
                }
                Err(e) => {
                    tracing::warn!(reference = %reference, error = %e, "Restore failed");
                    report.error(format!("{reference}: {e}"));
                }
            }
        }
        Ok(report)
    }

    fn locations(&self, reference: &str) -> (PathBuf, PathBuf) {
        (
            self.env.home().join(reference),
            self.index.repository_root().join(reference),
        )
    }

    /// Resolve a system or repository path to its ref and directory flag.
    fn resolve_ref(&self, input: &Path) -> Result<(String, bool)> {
        let target = PathRef::resolve(input, self.env.home(), self.env.cwd())?;
        let repo = self.index.repository_root();
        if let Some(reference) = target.relative_to(repo) {
            trakk_fs::validate_ref(&reference)?;
            return Ok((reference, target.is_dir()));
        }
        if NormalizedPath::new(target.absolute()) == NormalizedPath::new(repo) {
            return Err(trakk_fs::Error::out_of_scope(
                target.absolute(),
                "the repository root is not a ref",
            )
            .into());
        }
        Ok((target.reference().to_string(), target.is_dir()))
    }

    fn check_addable(&self, target: &PathRef) -> Result<()> {
        let repo = self.index.repository_root();
        let reason = if !target.absolute().exists() {
            Some("does not exist")
        } else if target.is_under(repo)
            || NormalizedPath::new(target.absolute()) == NormalizedPath::new(repo)
        {
            Some("is inside the repository; add the system copy instead")
        } else if NormalizedPath::new(target.absolute())
            == NormalizedPath::new(self.env.index_path())
        {
            Some("is the trakk index")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(trakk_fs::Error::out_of_scope(target.absolute(), reason).into()),
            None => Ok(()),
        }
    }
}
