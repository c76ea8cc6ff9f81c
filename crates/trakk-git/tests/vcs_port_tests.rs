use std::collections::BTreeSet;
use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use trakk_git::{Error, GitRepository, VcsPort};
use trakk_test_utils::git::{commit_all, fake_git_dir, real_git_repo, stage};

fn refs(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn repo_with_commit() -> (TempDir, GitRepository) {
    let temp = TempDir::new().unwrap();
    real_git_repo(temp.path());
    fs::create_dir_all(temp.path().join(".config/git")).unwrap();
    fs::write(temp.path().join(".bashrc"), "alias ll='ls -l'\n").unwrap();
    fs::write(temp.path().join(".config/git/config"), "[user]\n").unwrap();
    commit_all(temp.path(), "Initial commit");
    let repo = GitRepository::open(temp.path()).unwrap();
    (temp, repo)
}

#[test]
fn test_open_missing_repository() {
    let temp = TempDir::new().unwrap();
    let result = GitRepository::open(temp.path());
    assert!(matches!(result, Err(Error::NotARepository { .. })));
    assert!(!GitRepository::exists_at(temp.path()));
}

#[test]
fn test_open_rejects_fake_git_dir() {
    let temp = TempDir::new().unwrap();
    fake_git_dir(temp.path());
    assert!(!GitRepository::exists_at(temp.path()));
}

#[test]
fn test_init_creates_openable_repository() {
    let temp = TempDir::new().unwrap();
    GitRepository::init(temp.path()).unwrap();
    assert!(GitRepository::exists_at(temp.path()));
}

#[test]
fn test_clean_repository_has_no_dirty_refs() {
    let (_temp, repo) = repo_with_commit();
    assert_eq!(repo.uncommitted_refs().unwrap(), BTreeSet::new());
}

#[test]
fn test_dirty_refs_cover_unstaged_staged_and_untracked() {
    let (temp, repo) = repo_with_commit();
    fs::write(temp.path().join(".bashrc"), "alias la='ls -a'\n").unwrap();
    fs::write(temp.path().join(".config/git/config"), "[core]\n").unwrap();
    stage(temp.path(), ".config/git/config");
    fs::create_dir_all(temp.path().join(".config/nvim")).unwrap();
    fs::write(temp.path().join(".config/nvim/init.lua"), "").unwrap();

    assert_eq!(
        repo.uncommitted_refs().unwrap(),
        refs(&[".bashrc", ".config/git/config", ".config/nvim/init.lua"])
    );
}

#[test]
fn test_deleted_file_is_dirty() {
    let (temp, repo) = repo_with_commit();
    fs::remove_file(temp.path().join(".bashrc")).unwrap();

    assert_eq!(repo.uncommitted_refs().unwrap(), refs(&[".bashrc"]));
}

#[test]
fn test_ignored_files_are_not_dirty() {
    let (temp, repo) = repo_with_commit();
    fs::write(temp.path().join(".gitignore"), "*.swp\n").unwrap();
    commit_all(temp.path(), "ignore swap files");
    fs::write(temp.path().join(".bashrc.swp"), "").unwrap();

    assert_eq!(repo.uncommitted_refs().unwrap(), BTreeSet::new());
}

#[test]
fn test_unborn_repository_reports_untracked_files() {
    let temp = TempDir::new().unwrap();
    real_git_repo(temp.path());
    fs::write(temp.path().join(".zshrc"), "").unwrap();
    let repo = GitRepository::open(temp.path()).unwrap();

    assert_eq!(repo.uncommitted_refs().unwrap(), refs(&[".zshrc"]));
}

#[test]
fn test_diff_patch_shows_modification() {
    let (temp, repo) = repo_with_commit();
    fs::write(temp.path().join(".bashrc"), "alias la='ls -a'\n").unwrap();

    let patch = repo.diff_patch(".bashrc").unwrap();

    assert!(patch.contains("-alias ll='ls -l'"), "{patch}");
    assert!(patch.contains("+alias la='ls -a'"), "{patch}");
}

#[test]
fn test_diff_patch_is_limited_to_the_ref() {
    let (temp, repo) = repo_with_commit();
    fs::write(temp.path().join(".bashrc"), "changed\n").unwrap();

    assert_eq!(repo.diff_patch(".config/git/config").unwrap(), "");
}

#[test]
fn test_diff_patch_includes_untracked_content() {
    let (temp, repo) = repo_with_commit();
    fs::write(temp.path().join(".profile"), "export EDITOR=vi\n").unwrap();

    let patch = repo.diff_patch(".profile").unwrap();
    assert!(patch.contains("+export EDITOR=vi"), "{patch}");
}

#[test]
fn test_checkout_restores_committed_content() {
    let (temp, repo) = repo_with_commit();
    fs::write(temp.path().join(".bashrc"), "broken\n").unwrap();

    assert!(repo.checkout(".bashrc").unwrap());

    assert_eq!(
        fs::read_to_string(temp.path().join(".bashrc")).unwrap(),
        "alias ll='ls -l'\n"
    );
    assert_eq!(repo.uncommitted_refs().unwrap(), BTreeSet::new());
}

#[test]
fn test_checkout_leaves_other_refs_alone() {
    let (temp, repo) = repo_with_commit();
    fs::write(temp.path().join(".bashrc"), "broken\n").unwrap();
    fs::write(temp.path().join(".config/git/config"), "edited\n").unwrap();

    repo.checkout(".bashrc").unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join(".config/git/config")).unwrap(),
        "edited\n"
    );
}

#[test]
fn test_checkout_unknown_ref_returns_false() {
    let (_temp, repo) = repo_with_commit();
    assert!(!repo.checkout(".not-committed").unwrap());
}

#[test]
fn test_checkout_without_head_returns_false() {
    let temp = TempDir::new().unwrap();
    real_git_repo(temp.path());
    let repo = GitRepository::open(temp.path()).unwrap();
    assert!(!repo.checkout(".bashrc").unwrap());
}
