//! Command context: where home and the index are
//!
//! Built once per invocation from the global flags, then used to open the
//! workspace a command operates on.

use std::path::PathBuf;

use trakk_core::{Environment, Workspace};

use crate::error::Result;

/// Global flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    home: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl Context {
    pub fn new(home: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        Self { home, config }
    }

    /// Resolve home, index path and working directory.
    pub fn environment(&self) -> Result<Environment> {
        Ok(Environment::detect(self.home.clone(), self.config.clone())?)
    }

    /// Open the workspace; fails with a hint to run `trakk init` when no
    /// index exists yet.
    pub fn workspace(&self) -> Result<Workspace> {
        Ok(Workspace::open(self.environment()?)?)
    }
}
