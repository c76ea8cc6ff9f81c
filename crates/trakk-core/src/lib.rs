//! Index, reconciliation and repair engine for trakk
//!
//! trakk keeps chosen files under the home directory hard-linked into a git
//! repository. This crate decides, for every tracked or discoverable file,
//! how the index, the two filesystem locations and git disagree, and repairs
//! each disagreement.
//!
//! # Architecture
//!
//! ```text
//!                  trakk-cli
//!                      |
//!                 trakk-core
//!        (Workspace, Reconciler, Repairer)
//!                 /        \
//!           trakk-fs     trakk-git
//!      (PathRef, Linker)  (VcsPort)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use trakk_core::{Environment, Workspace};
//!
//! fn example() -> trakk_core::Result<()> {
//!     let env = Environment::detect(None, None)?;
//!     let workspace = Workspace::open(env)?;
//!     for status in workspace.status()? {
//!         println!("{} {}", status.kind(), status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod environment;
pub mod error;
pub mod index;
pub mod render;
pub mod sync;
pub mod workspace;

pub use environment::Environment;
pub use error::{Error, Result};
pub use index::{IndexFile, IndexStore};
pub use sync::{
    Choice, LinePrompter, Prompter, RefStatus, ShowDetail, ShowReport, StatusKind, SyncOptions,
    SyncReport,
};
pub use workspace::{InitOutcome, Workspace};
