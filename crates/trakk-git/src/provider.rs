//! Version-control port trait

use std::collections::BTreeSet;

use crate::Result;

/// Narrow query interface the reconciliation engine needs from version
/// control.
///
/// Refs are `/`-separated paths relative to the repository root, which is
/// also their path relative to the home directory.
pub trait VcsPort {
    /// Refs with changes relative to the last commit: unstaged, staged and
    /// untracked. Ignored files are not reported.
    fn uncommitted_refs(&self) -> Result<BTreeSet<String>>;

    /// Patch text of `reference` against HEAD. Empty when it is clean.
    fn diff_patch(&self, reference: &str) -> Result<String>;

    /// Restore `reference` in the working tree from HEAD.
    ///
    /// Returns `false` when HEAD does not contain the ref (or there is no
    /// HEAD yet).
    fn checkout(&self, reference: &str) -> Result<bool>;
}
