//! Git repository fixtures.
//!
//! Choose the lowest-realism fixture that satisfies the test: a fake `.git`
//! directory is enough to trip path checks but cannot be opened by git2.

use std::fs;
use std::path::Path;

/// Creates a `.git` directory that is **not** a valid repository.
///
/// Realism level: **FAKE**. Use for tests asserting that something which
/// merely looks like a repository is rejected.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "garbage\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Initialises a real git repository using `git2` (empty history).
///
/// Realism level: **REAL**.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Stages every file in the working tree (deletions included) and commits.
///
/// Works on an unborn branch, in which case the commit has no parent.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(path: &Path, message: &str) {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("commit_all: failed to open {}: {e}", path.display()));
    let mut index = repo.index().unwrap_or_else(|e| panic!("commit_all: index: {e}"));
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap_or_else(|e| panic!("commit_all: add_all: {e}"));
    index
        .update_all(["*"], None)
        .unwrap_or_else(|e| panic!("commit_all: update_all: {e}"));
    index
        .write()
        .unwrap_or_else(|e| panic!("commit_all: write index: {e}"));
    let tree_id = index
        .write_tree()
        .unwrap_or_else(|e| panic!("commit_all: write tree: {e}"));
    let tree = repo
        .find_tree(tree_id)
        .unwrap_or_else(|e| panic!("commit_all: find tree: {e}"));
    let sig = git2::Signature::now("Test User", "test@test.com")
        .unwrap_or_else(|e| panic!("commit_all: signature: {e}"));

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_all: commit: {e}"));
}

/// Stages a single file without committing it.
///
/// # Panics
/// Panics if any git operation fails.
pub fn stage(path: &Path, reference: &str) {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("stage: failed to open {}: {e}", path.display()));
    let mut index = repo.index().unwrap_or_else(|e| panic!("stage: index: {e}"));
    index
        .add_path(Path::new(reference))
        .unwrap_or_else(|e| panic!("stage: add {reference}: {e}"));
    index
        .write()
        .unwrap_or_else(|e| panic!("stage: write index: {e}"));
}
