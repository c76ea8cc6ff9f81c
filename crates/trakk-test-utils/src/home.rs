//! [`TestHome`] builder for trakk scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git;

/// Name of the repository directory created inside the test home.
pub const REPO_DIR: &str = "dotfiles";

/// Name of the index file written into the test home.
pub const INDEX_FILE: &str = ".trakk.toml";

/// A temporary home directory holding a git repository at `~/dotfiles` and,
/// once [`TestHome::track`] has been called, an index file at `~/.trakk.toml`.
///
/// # Example
///
/// ```rust,no_run
/// use trakk_test_utils::TestHome;
///
/// let home = TestHome::new();
/// home.write_mine(".bashrc", "alias ll='ls -l'");
/// home.link(".bashrc");
/// home.track(&[".bashrc"]);
/// home.commit_all("track bashrc");
/// home.assert_linked(".bashrc");
/// ```
pub struct TestHome {
    _temp_dir: TempDir,
    home: PathBuf,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    /// Create a home directory with an initialised, empty repository.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        // Canonical form so paths compare equal to what the code under test
        // derives (macOS tempdirs live behind a /var symlink).
        let home = temp_dir.path().canonicalize().unwrap();
        let repo = home.join(REPO_DIR);
        fs::create_dir_all(&repo).unwrap();
        git::real_git_repo(&repo);
        Self {
            _temp_dir: temp_dir,
            home,
        }
    }

    /// The home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The repository root.
    pub fn repo(&self) -> PathBuf {
        self.home.join(REPO_DIR)
    }

    /// Location of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.home.join(INDEX_FILE)
    }

    /// System location of `reference`.
    pub fn mine(&self, reference: &str) -> PathBuf {
        self.home.join(reference)
    }

    /// Repository location of `reference`.
    pub fn theirs(&self, reference: &str) -> PathBuf {
        self.repo().join(reference)
    }

    /// Write the system copy of `reference`, creating parent directories.
    pub fn write_mine(&self, reference: &str, content: &str) {
        write_with_parents(&self.mine(reference), content);
    }

    /// Write the repository copy of `reference`, creating parent directories.
    pub fn write_theirs(&self, reference: &str, content: &str) {
        write_with_parents(&self.theirs(reference), content);
    }

    /// Hard-link the system copy of `reference` into the repository.
    pub fn link(&self, reference: &str) {
        let theirs = self.theirs(reference);
        if let Some(parent) = theirs.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::hard_link(self.mine(reference), theirs).unwrap();
    }

    /// Write the index file listing `refs` (and no directory refs).
    pub fn track(&self, refs: &[&str]) {
        self.track_with_dirs(refs, &[]);
    }

    /// Write the index file listing `refs` and directory refs `dirs`.
    pub fn track_with_dirs(&self, refs: &[&str], dirs: &[&str]) {
        let quote = |items: &[&str]| {
            items
                .iter()
                .map(|r| format!("\"{r}\""))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let content = format!(
            "version = 1\nrepository = \"{}\"\nrefs = [{}]\ndirs = [{}]\n",
            self.repo().display(),
            quote(refs),
            quote(dirs)
        );
        fs::write(self.index_path(), content).unwrap();
    }

    /// Read the raw index file.
    pub fn read_index(&self) -> String {
        fs::read_to_string(self.index_path()).unwrap()
    }

    /// Commit everything in the repository working tree.
    pub fn commit_all(&self, message: &str) {
        git::commit_all(&self.repo(), message);
    }

    /// Assert that mine and theirs of `reference` are one inode.
    ///
    /// # Panics
    /// Panics if either side is missing or they are distinct files.
    pub fn assert_linked(&self, reference: &str) {
        use std::os::unix::fs::MetadataExt;

        let mine = fs::metadata(self.mine(reference))
            .unwrap_or_else(|e| panic!("{reference}: system copy unreadable: {e}"));
        let theirs = fs::metadata(self.theirs(reference))
            .unwrap_or_else(|e| panic!("{reference}: repository copy unreadable: {e}"));
        assert!(
            mine.dev() == theirs.dev() && mine.ino() == theirs.ino(),
            "Expected {reference} to be hard-linked"
        );
    }

    /// Assert that the system copy of `reference` holds exactly `content`.
    pub fn assert_mine(&self, reference: &str, content: &str) {
        let actual = fs::read_to_string(self.mine(reference))
            .unwrap_or_else(|e| panic!("{reference}: system copy unreadable: {e}"));
        assert_eq!(actual, content, "system copy of {reference}");
    }

    /// Assert that neither copy of `reference` exists.
    pub fn assert_absent(&self, reference: &str) {
        assert!(!self.mine(reference).exists(), "{reference} exists in home");
        assert!(!self.theirs(reference).exists(), "{reference} exists in repository");
    }
}

fn write_with_parents(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
