//! TOML configuration loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Loads and saves serde types as TOML files.
///
/// Loads read under a shared lock; saves go through [`io::write_atomic`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a `.toml` file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        check_extension(path)?;
        let content = io::read_text_locked(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a `.toml` file atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        check_extension(path)?;
        let content = toml::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        })?;
        io::write_atomic(path, content.as_bytes())
    }
}

fn check_extension(path: &NormalizedPath) -> Result<()> {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(()),
        other => Err(Error::UnsupportedFormat {
            extension: other.unwrap_or("").to_string(),
        }),
    }
}
