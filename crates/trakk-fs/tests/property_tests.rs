use proptest::prelude::*;
use trakk_fs::{NormalizedPath, validate_ref};

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains("//"));
        prop_assert!(!as_str.split('/').any(|seg| seg == "." || seg == ".."));

        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_joined_path_is_normalized(a in "\\PC*", b in "\\PC*") {
        let joined = NormalizedPath::new(&a).join(&b);
        prop_assert_eq!(joined.clone(), NormalizedPath::new(joined.as_str()));
    }

    #[test]
    fn test_relative_ref_never_escapes_root(s in "[a-z./]{1,24}") {
        let root = NormalizedPath::new("/home/me");
        let joined = root.join(&s);
        if let Some(reference) = joined.relative_to(&root) {
            prop_assert!(validate_ref(&reference).is_ok());
            prop_assert_eq!(root.join(&reference), joined);
        }
    }
}
