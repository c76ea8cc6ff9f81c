use pretty_assertions::assert_eq;
use rstest::rstest;
use trakk_fs::{NormalizedPath, validate_ref};

#[test]
fn test_backslash_is_part_of_the_name() {
    let path = NormalizedPath::new("/home/me/notes\\old.txt");
    assert_eq!(path.as_str(), "/home/me/notes\\old.txt");
    assert_eq!(path.file_name(), Some("notes\\old.txt"));
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("/home/me");
    assert_eq!(base.join(".config/nvim").as_str(), "/home/me/.config/nvim");
}

#[test]
fn test_join_resolves_traversal_for_boundary_checks() {
    let home = NormalizedPath::new("/home/me");
    let escaped = home.join("../../etc/passwd");

    assert_eq!(escaped.as_str(), "/etc/passwd");
    assert_eq!(escaped.relative_to(&home), None);
}

#[test]
fn test_parent_and_file_name() {
    let path = NormalizedPath::new("/home/me/.trakk.toml");
    assert_eq!(path.file_name(), Some(".trakk.toml"));
    assert_eq!(path.extension(), Some("toml"));
    assert_eq!(path.parent().unwrap().as_str(), "/home/me");
    assert_eq!(NormalizedPath::new("/x").parent().unwrap().as_str(), "/");
}

#[test]
fn test_dotfile_has_no_extension() {
    assert_eq!(NormalizedPath::new("/home/me/.bashrc").extension(), None);
}

#[rstest]
#[case(".bashrc")]
#[case(".config/nvim/init.lua")]
#[case("dotfiles/.git-hooks/pre-commit")]
#[case("notes\\old.txt")]
fn test_valid_refs(#[case] reference: &str) {
    assert!(validate_ref(reference).is_ok());
}

#[rstest]
#[case("")]
#[case("/abs")]
#[case("a//b")]
#[case("./a")]
#[case("a/..")]
#[case("a/")]
fn test_invalid_refs(#[case] reference: &str) {
    assert!(validate_ref(reference).is_err());
}
