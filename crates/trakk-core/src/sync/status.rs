//! Divergence states produced by reconciliation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The kind of a [`RefStatus`], ordered for display (A first, F last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// A: linked and identical, but not committed
    Uncommitted,
    /// B: both copies exist as distinct inodes
    InodeMismatch,
    /// C: system copy present, repository copy missing
    MissingInRepository,
    /// D: repository copy present, system copy missing
    MissingInSystem,
    /// E: listed in the index, absent everywhere
    Vanished,
    /// F: in the repository tree but not in the index
    Untracked,
}

impl StatusKind {
    pub const ALL: [StatusKind; 6] = [
        StatusKind::Uncommitted,
        StatusKind::InodeMismatch,
        StatusKind::MissingInRepository,
        StatusKind::MissingInSystem,
        StatusKind::Vanished,
        StatusKind::Untracked,
    ];

    /// Single-letter code (`A` to `F`).
    pub fn letter(self) -> char {
        match self {
            StatusKind::Uncommitted => 'A',
            StatusKind::InodeMismatch => 'B',
            StatusKind::MissingInRepository => 'C',
            StatusKind::MissingInSystem => 'D',
            StatusKind::Vanished => 'E',
            StatusKind::Untracked => 'F',
        }
    }

    /// Human-readable reason.
    pub fn reason(self) -> &'static str {
        match self {
            StatusKind::Uncommitted => "Has changes not committed to version control",
            StatusKind::InodeMismatch => "Inode mismatch for ref",
            StatusKind::MissingInRepository => {
                "Ref does not exist in repository but is present in system"
            }
            StatusKind::MissingInSystem => "New incoming (non existing in system) upstream ref",
            StatusKind::Vanished => "Ref does not exist in either repository OR system",
            StatusKind::Untracked => "Untracked file",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The two candidate locations of a ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefPaths {
    pub reference: String,
    /// System location under the home directory
    pub mine: PathBuf,
    /// Mirrored location inside the repository
    pub theirs: PathBuf,
}

/// How the index, the two filesystem locations and version control disagree
/// about one ref.
///
/// Built only through the per-kind constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefStatus {
    Uncommitted(RefPaths),
    InodeMismatch(RefPaths),
    MissingInRepository(RefPaths),
    MissingInSystem(RefPaths),
    Vanished(RefPaths),
    /// Discovered by walking the repository, so there is no system side.
    Untracked { reference: String, theirs: PathBuf },
}

fn paths(reference: impl Into<String>, mine: impl Into<PathBuf>, theirs: impl Into<PathBuf>) -> RefPaths {
    RefPaths {
        reference: reference.into(),
        mine: mine.into(),
        theirs: theirs.into(),
    }
}

impl RefStatus {
    pub fn uncommitted(
        reference: impl Into<String>,
        mine: impl Into<PathBuf>,
        theirs: impl Into<PathBuf>,
    ) -> Self {
        Self::Uncommitted(paths(reference, mine, theirs))
    }

    pub fn inode_mismatch(
        reference: impl Into<String>,
        mine: impl Into<PathBuf>,
        theirs: impl Into<PathBuf>,
    ) -> Self {
        Self::InodeMismatch(paths(reference, mine, theirs))
    }

    pub fn missing_in_repository(
        reference: impl Into<String>,
        mine: impl Into<PathBuf>,
        theirs: impl Into<PathBuf>,
    ) -> Self {
        Self::MissingInRepository(paths(reference, mine, theirs))
    }

    pub fn missing_in_system(
        reference: impl Into<String>,
        mine: impl Into<PathBuf>,
        theirs: impl Into<PathBuf>,
    ) -> Self {
        Self::MissingInSystem(paths(reference, mine, theirs))
    }

    pub fn vanished(
        reference: impl Into<String>,
        mine: impl Into<PathBuf>,
        theirs: impl Into<PathBuf>,
    ) -> Self {
        Self::Vanished(paths(reference, mine, theirs))
    }

    pub fn untracked(reference: impl Into<String>, theirs: impl Into<PathBuf>) -> Self {
        Self::Untracked {
            reference: reference.into(),
            theirs: theirs.into(),
        }
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            RefStatus::Uncommitted(_) => StatusKind::Uncommitted,
            RefStatus::InodeMismatch(_) => StatusKind::InodeMismatch,
            RefStatus::MissingInRepository(_) => StatusKind::MissingInRepository,
            RefStatus::MissingInSystem(_) => StatusKind::MissingInSystem,
            RefStatus::Vanished(_) => StatusKind::Vanished,
            RefStatus::Untracked { .. } => StatusKind::Untracked,
        }
    }

    pub fn reason(&self) -> &'static str {
        self.kind().reason()
    }

    pub fn reference(&self) -> &str {
        match self {
            RefStatus::Untracked { reference, .. } => reference,
            RefStatus::Uncommitted(p)
            | RefStatus::InodeMismatch(p)
            | RefStatus::MissingInRepository(p)
            | RefStatus::MissingInSystem(p)
            | RefStatus::Vanished(p) => &p.reference,
        }
    }

    /// System location; `None` for untracked repository files.
    pub fn mine(&self) -> Option<&Path> {
        self.ref_paths().map(|p| p.mine.as_path())
    }

    /// Repository location.
    pub fn theirs(&self) -> &Path {
        match self {
            RefStatus::Untracked { theirs, .. } => theirs,
            RefStatus::Uncommitted(p)
            | RefStatus::InodeMismatch(p)
            | RefStatus::MissingInRepository(p)
            | RefStatus::MissingInSystem(p)
            | RefStatus::Vanished(p) => &p.theirs,
        }
    }

    /// The location shown for this status in listings.
    ///
    /// Kinds whose system copy matters show mine; the rest show theirs.
    pub fn display_path(&self) -> &Path {
        match self {
            RefStatus::Uncommitted(p)
            | RefStatus::MissingInRepository(p)
            | RefStatus::Vanished(p) => &p.mine,
            RefStatus::InodeMismatch(p) | RefStatus::MissingInSystem(p) => &p.theirs,
            RefStatus::Untracked { theirs, .. } => theirs,
        }
    }

    /// Both locations, for every kind that has a system side.
    pub fn ref_paths(&self) -> Option<&RefPaths> {
        match self {
            RefStatus::Uncommitted(p)
            | RefStatus::InodeMismatch(p)
            | RefStatus::MissingInRepository(p)
            | RefStatus::MissingInSystem(p)
            | RefStatus::Vanished(p) => Some(p),
            RefStatus::Untracked { .. } => None,
        }
    }
}

impl std::fmt::Display for RefStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefStatus::InodeMismatch(p) => write!(
                f,
                "mine: {} -> theirs: {}",
                p.mine.display(),
                p.theirs.display()
            ),
            other => write!(f, "{}", other.display_path().display()),
        }
    }
}

/// Sort statuses by kind, keeping discovery order within a kind.
pub fn sort_by_kind(statuses: &mut [RefStatus]) {
    statuses.sort_by_key(RefStatus::kind);
}
