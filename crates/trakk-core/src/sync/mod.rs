//! Reconciliation and repair
//!
//! - [`reconcile`]: classify refs into [`RefStatus`] values
//! - [`repair`]: resolve statuses, prompting through a [`Prompter`]
//! - [`show`]: diagnostic view of one ref

pub mod prompt;
pub mod reconcile;
pub mod repair;
pub mod report;
pub mod show;
pub mod status;

pub use prompt::{Choice, LinePrompter, MAX_PROMPT_ATTEMPTS, Prompter, choose};
pub use reconcile::Reconciler;
pub use repair::Repairer;
pub use report::{SyncOptions, SyncReport};
pub use show::{FileDump, ShowDetail, ShowReport};
pub use status::{RefPaths, RefStatus, StatusKind, sort_by_kind};
