//! Diagnostic view of a single ref

use std::path::{Path, PathBuf};

use similar::TextDiff;
use trakk_fs::io;

use super::status::{RefStatus, StatusKind};
use crate::Result;

/// A labelled dump of one copy of a ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDump {
    pub path: PathBuf,
    pub content: String,
}

impl FileDump {
    fn read(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(Self {
            path: path.to_path_buf(),
            content: io::read_lossy(path)?,
        }))
    }
}

/// What `show` has to say about a ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowDetail {
    /// No divergence
    Consistent,
    /// A: the version-control patch
    Patch(String),
    /// B, C, D: whichever copies exist; B also carries a theirs -> mine diff
    Files {
        mine: Option<FileDump>,
        theirs: Option<FileDump>,
        diff: Option<String>,
    },
    /// E, F: the reason is all there is
    Reason,
}

/// Result of `show` for one ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowReport {
    pub reference: String,
    pub status: Option<RefStatus>,
    pub detail: ShowDetail,
}

impl ShowReport {
    pub fn kind(&self) -> Option<StatusKind> {
        self.status.as_ref().map(RefStatus::kind)
    }

    /// Build the report for `status`; `patch` is only consulted for A.
    pub fn build(
        reference: &str,
        status: Option<RefStatus>,
        patch: impl FnOnce() -> Result<String>,
    ) -> Result<Self> {
        let detail = match &status {
            None => ShowDetail::Consistent,
            Some(RefStatus::Uncommitted(_)) => ShowDetail::Patch(patch()?),
            Some(
                RefStatus::InodeMismatch(p)
                | RefStatus::MissingInRepository(p)
                | RefStatus::MissingInSystem(p),
            ) => {
                let mine = FileDump::read(&p.mine)?;
                let theirs = FileDump::read(&p.theirs)?;
                let diff = match (&status, &mine, &theirs) {
                    (Some(RefStatus::InodeMismatch(_)), Some(m), Some(t)) => {
                        Some(unified_diff(t, m))
                    }
                    _ => None,
                };
                ShowDetail::Files { mine, theirs, diff }
            }
            Some(RefStatus::Vanished(_) | RefStatus::Untracked { .. }) => ShowDetail::Reason,
        };

        Ok(Self {
            reference: reference.to_string(),
            status,
            detail,
        })
    }
}

fn unified_diff(theirs: &FileDump, mine: &FileDump) -> String {
    TextDiff::from_lines(&theirs.content, &mine.content)
        .unified_diff()
        .header(
            &format!("theirs: {}", theirs.path.display()),
            &format!("mine: {}", mine.path.display()),
        )
        .to_string()
}
