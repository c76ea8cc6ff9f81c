//! Process environment: home directory, index location and working directory

use std::path::{Path, PathBuf};

use trakk_fs::{NormalizedPath, TrakkPath};

use crate::{Error, Result};

/// Locations every command needs, resolved once at command start.
///
/// All paths are absolute. The home directory and working directory are
/// canonicalized so lexical comparisons against user input are meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    home: PathBuf,
    index_path: PathBuf,
    cwd: PathBuf,
}

impl Environment {
    /// Build an environment from explicit locations.
    ///
    /// `index_path` defaults to `~/.trakk.toml`. A relative index path is taken
    /// relative to `cwd`.
    pub fn new(home: impl Into<PathBuf>, index_path: Option<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let cwd = cwd.into();
        let index_path = match index_path {
            Some(path) if path.is_absolute() => path,
            Some(path) => cwd.join(path),
            None => home.join(TrakkPath::IndexFile),
        };
        Self {
            home: NormalizedPath::new(home).to_native(),
            index_path: NormalizedPath::new(index_path).to_native(),
            cwd: NormalizedPath::new(cwd).to_native(),
        }
    }

    /// Detect the environment of the current process.
    ///
    /// `home` overrides the user's home directory (`dirs::home_dir`).
    pub fn detect(home: Option<PathBuf>, index_path: Option<PathBuf>) -> Result<Self> {
        let home = match home {
            Some(home) => home,
            None => dirs::home_dir().ok_or(Error::HomeNotFound)?,
        };
        let home = canonicalize(&home)?;
        let cwd = canonicalize(&std::env::current_dir()?)?;

        let env = Self::new(home, index_path, cwd);
        tracing::debug!(
            home = %env.home.display(),
            index = %env.index_path.display(),
            cwd = %env.cwd.display(),
            "Detected environment"
        );
        Ok(env)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::Fs(trakk_fs::Error::io(path, e)))
}
