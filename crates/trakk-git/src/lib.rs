//! Version-control port for trakk
//!
//! The core only asks three questions of version control: which refs are
//! dirty, what a ref's patch looks like and whether a ref can be checked out
//! from HEAD. [`VcsPort`] is that seam; [`GitRepository`] answers it with git2.

pub mod error;
pub mod provider;
pub mod repository;

pub use error::{Error, Result};
pub use provider::VcsPort;
pub use repository::GitRepository;
