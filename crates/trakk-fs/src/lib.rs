//! Filesystem layer for trakk
//!
//! Path normalization, home-relative refs, hard-link management, atomic
//! config I/O and repository walking.

#[cfg(not(unix))]
compile_error!("trakk relies on hard links and inode identity and only supports unix targets");

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod linker;
pub mod path;
pub mod pathref;
pub mod walk;

pub use config::ConfigStore;
pub use constants::{TrakkPath, is_vcs_metadata};
pub use error::{Error, Result};
pub use io::EntryKind;
pub use linker::{Linker, same_inode};
pub use path::{NormalizedPath, ref_from_relative, validate_ref};
pub use pathref::PathRef;
pub use walk::walk_files;
