//! Classification of refs into status kinds

mod common;

use std::fs;
use std::os::unix::fs::symlink;

use common::{FakeVcs, fake_workspace, git_workspace, kinds};
use pretty_assertions::assert_eq;
use rstest::rstest;
use trakk_core::{Environment, Error, IndexStore, RefStatus, StatusKind, Workspace};
use trakk_test_utils::TestHome;

#[derive(Debug, Clone, Copy)]
enum Layout {
    Neither,
    MineOnly,
    TheirsOnly,
    Separate,
    Linked,
}

fn lay_out(home: &TestHome, reference: &str, layout: Layout) {
    match layout {
        Layout::Neither => {}
        Layout::MineOnly => home.write_mine(reference, "mine"),
        Layout::TheirsOnly => home.write_theirs(reference, "theirs"),
        Layout::Separate => {
            home.write_mine(reference, "mine");
            home.write_theirs(reference, "theirs");
        }
        Layout::Linked => {
            home.write_mine(reference, "shared");
            home.link(reference);
        }
    }
}

#[rstest]
#[case::vanished(Layout::Neither, false, Some('E'))]
#[case::vanished_even_if_dirty(Layout::Neither, true, Some('E'))]
#[case::missing_in_repository(Layout::MineOnly, false, Some('C'))]
#[case::missing_in_system(Layout::TheirsOnly, false, Some('D'))]
#[case::missing_in_system_dirty(Layout::TheirsOnly, true, Some('D'))]
#[case::inode_mismatch(Layout::Separate, false, Some('B'))]
#[case::inode_mismatch_wins_over_dirty(Layout::Separate, true, Some('B'))]
#[case::uncommitted(Layout::Linked, true, Some('A'))]
#[case::consistent(Layout::Linked, false, None)]
fn classify_link_truth_table(
    #[case] layout: Layout,
    #[case] dirty: bool,
    #[case] expected: Option<char>,
) {
    let home = TestHome::new();
    lay_out(&home, "notes.txt", layout);
    home.track(&["notes.txt"]);

    let vcs = if dirty {
        FakeVcs::dirty(&["notes.txt"])
    } else {
        FakeVcs::default()
    };
    let workspace = fake_workspace(&home, vcs);

    let statuses = workspace.compute_all_statuses().unwrap();
    let actual: Vec<char> = statuses.iter().map(|s| s.kind().letter()).collect();
    assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
}

#[test]
fn committed_linked_ref_is_consistent() {
    let home = TestHome::new();
    home.write_mine("notes.txt", "hello");
    home.link("notes.txt");
    home.track(&["notes.txt"]);
    home.commit_all("track notes");

    let workspace = git_workspace(&home);
    assert_eq!(kinds(&workspace), vec![]);
}

#[test]
fn editing_a_linked_ref_makes_it_uncommitted() {
    let home = TestHome::new();
    home.write_mine("notes.txt", "hello");
    home.link("notes.txt");
    home.track(&["notes.txt"]);
    home.commit_all("track notes");

    // Writing through the system path changes the shared inode.
    fs::write(home.mine("notes.txt"), "hello again").unwrap();

    let workspace = git_workspace(&home);
    assert_eq!(kinds(&workspace), vec![('A', "notes.txt".to_string())]);
}

#[test]
fn unindexed_repository_file_is_untracked_once() {
    let home = TestHome::new();
    home.write_theirs("c.txt", "upstream");
    home.track(&[]);

    // c.txt is also untracked for git, but only one status is reported.
    let workspace = git_workspace(&home);
    let statuses = workspace.compute_all_statuses().unwrap();
    assert_eq!(statuses.len(), 1);
    assert!(matches!(
        &statuses[0],
        RefStatus::Untracked { reference, .. } if reference == "c.txt"
    ));
    assert_eq!(statuses[0].mine(), None);
}

#[test]
fn nested_untracked_file_uses_slash_separated_ref() {
    let home = TestHome::new();
    home.write_theirs(".config/app/settings.toml", "x = 1");
    home.track(&[]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    assert_eq!(
        kinds(&workspace),
        vec![('F', ".config/app/settings.toml".to_string())]
    );
}

#[test]
fn git_metadata_is_never_reported() {
    let home = TestHome::new();
    home.track(&[]);

    let vcs = FakeVcs::dirty(&[".git", ".git/index"]);
    let workspace = fake_workspace(&home, vcs);
    assert_eq!(kinds(&workspace), vec![]);
}

#[test]
fn dirty_ref_unknown_to_the_index_is_uncommitted() {
    let home = TestHome::new();
    home.track(&[]);

    // Deleted from the working tree but still in HEAD.
    let workspace = fake_workspace(&home, FakeVcs::dirty(&["old.txt"]));
    let statuses = workspace.compute_all_statuses().unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].kind(), StatusKind::Uncommitted);
    assert_eq!(statuses[0].display_path(), home.mine("old.txt"));
}

#[test]
fn symlink_at_tracked_location_fails_fast() {
    let home = TestHome::new();
    home.write_mine("target.txt", "data");
    symlink(home.mine("target.txt"), home.mine("notes.txt")).unwrap();
    home.write_theirs("notes.txt", "data");
    home.track(&["notes.txt"]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    let err = workspace.compute_all_statuses().unwrap_err();
    assert!(
        matches!(err, Error::Fs(trakk_fs::Error::OutOfScope { .. })),
        "{err}"
    );
}

#[test]
fn directory_at_tracked_location_fails_fast() {
    let home = TestHome::new();
    fs::create_dir_all(home.mine("notes.txt")).unwrap();
    home.track(&["notes.txt"]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    assert!(matches!(
        workspace.compute_all_statuses(),
        Err(Error::Fs(trakk_fs::Error::OutOfScope { .. }))
    ));
}

#[test]
fn symlink_inside_repository_fails_fast() {
    let home = TestHome::new();
    home.write_theirs("real.txt", "data");
    symlink(home.theirs("real.txt"), home.theirs("alias.txt")).unwrap();
    home.track(&["real.txt"]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    assert!(workspace.compute_all_statuses().is_err());
}

#[test]
fn new_file_in_directory_ref_needs_adding() {
    let home = TestHome::new();
    home.write_mine(".config/app/a.conf", "a");
    home.link(".config/app/a.conf");
    home.write_mine(".config/app/b.conf", "b");
    home.track_with_dirs(&[".config/app/a.conf"], &[".config/app"]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    assert_eq!(
        kinds(&workspace),
        vec![('C', ".config/app/b.conf".to_string())]
    );
}

#[test]
fn removed_file_in_directory_ref_is_reported_once() {
    let home = TestHome::new();
    home.write_mine(".config/app/a.conf", "a");
    home.write_mine(".config/app/b.conf", "b");
    home.track(&[]);

    let mut workspace = git_workspace(&home);
    workspace.add(&[home.mine(".config/app")]).unwrap();
    home.commit_all("track app");
    workspace.remove(&[home.mine(".config/app/b.conf")]).unwrap();

    // The repository copy is gone, so git also sees b.conf as deleted.
    assert_eq!(
        kinds(&workspace),
        vec![('C', ".config/app/b.conf".to_string())]
    );
}

#[test]
fn dirty_file_in_directory_ref_is_not_also_uncommitted() {
    let home = TestHome::new();
    home.write_mine(".config/app/a.conf", "a");
    home.link(".config/app/a.conf");
    home.write_mine(".config/app/b.conf", "b");
    home.track_with_dirs(&[".config/app/a.conf"], &[".config/app"]);

    let workspace = fake_workspace(&home, FakeVcs::dirty(&[".config/app/b.conf"]));
    assert_eq!(
        kinds(&workspace),
        vec![('C', ".config/app/b.conf".to_string())]
    );
}

#[test]
fn index_inside_directory_ref_is_not_a_candidate() {
    let home = TestHome::new();
    home.write_mine(".config/trakk/theme.toml", "dark");
    home.link(".config/trakk/theme.toml");
    home.track_with_dirs(&[".config/trakk/theme.toml"], &[".config/trakk"]);

    let index_path = home.mine(".config/trakk/index.toml");
    fs::rename(home.index_path(), &index_path).unwrap();
    home.write_mine(".config/trakk/.index.toml.4242.tmp", "partial");

    let env = Environment::new(home.home(), Some(index_path.clone()), home.home());
    let index = IndexStore::open(&index_path).unwrap();
    let workspace = Workspace::with_vcs(env, index, FakeVcs::default());
    assert_eq!(kinds(&workspace), vec![]);
}

#[test]
fn backslash_in_file_name_is_an_ordinary_ref() {
    let home = TestHome::new();
    home.write_theirs("notes\\old.txt", "archived");
    home.write_theirs("c.txt", "upstream");
    home.track(&[]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    assert_eq!(
        kinds(&workspace),
        vec![
            ('F', "c.txt".to_string()),
            ('F', "notes\\old.txt".to_string()),
        ]
    );
}

#[test]
fn missing_directory_ref_is_ignored() {
    let home = TestHome::new();
    home.track_with_dirs(&[], &[".config/gone"]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    assert_eq!(kinds(&workspace), vec![]);
}

#[test]
fn status_is_sorted_by_kind() {
    let home = TestHome::new();
    home.write_theirs("d.txt", "upstream");
    home.write_mine("c.txt", "local");
    home.write_theirs("f.txt", "stray");
    home.track(&["d.txt", "c.txt", "e.txt"]);

    let workspace = fake_workspace(&home, FakeVcs::default());
    let letters: Vec<char> = kinds(&workspace).into_iter().map(|(k, _)| k).collect();
    assert_eq!(letters, vec!['C', 'D', 'E', 'F']);
}

#[test]
fn computing_statuses_does_not_touch_the_filesystem() {
    let home = TestHome::new();
    home.write_mine("c.txt", "local");
    home.write_theirs("d.txt", "upstream");
    home.track(&["c.txt", "d.txt"]);
    let index_before = home.read_index();

    let workspace = fake_workspace(&home, FakeVcs::default());
    workspace.compute_all_statuses().unwrap();

    assert_eq!(home.read_index(), index_before);
    assert!(!home.theirs("c.txt").exists());
    assert!(!home.mine("d.txt").exists());
}
