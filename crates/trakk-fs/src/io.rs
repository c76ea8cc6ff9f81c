//! Atomic writes, content comparison and entry probing

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// What currently occupies a filesystem location.
///
/// Symlinks are reported as such and never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn exists(self) -> bool {
        self != EntryKind::Missing
    }
}

/// Inspect `path` without following symlinks.
pub fn probe(path: &Path) -> Result<EntryKind> {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let file_type = meta.file_type();
            Ok(if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(EntryKind::Missing),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Whether `candidate` is a temp file [`write_atomic`] creates for `target`,
/// whichever process wrote it.
pub fn is_write_temp(target: &Path, candidate: &Path) -> bool {
    if target.parent() != candidate.parent() {
        return false;
    }
    let Some(name) = candidate.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let prefix = format!(".{}.", file_name_of(target));
    name.strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(".tmp"))
        .is_some_and(|pid| !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit()))
}

fn file_name_of(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default()
}

/// Write content atomically to a file with locking.
///
/// Writes to a temp file in the same directory under an exclusive advisory
/// lock, syncs it, then renames it over the target.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(".{}.{}.tmp", file_name_of(&native_path), std::process::id());
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Read text content under a shared advisory lock.
pub fn read_text_locked(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let file = File::open(&native_path).map_err(|e| Error::io(&native_path, e))?;
    file.lock_shared().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    // Read through the locked handle; the lock drops with the file.
    let mut content = String::new();
    (&file)
        .read_to_string(&mut content)
        .map_err(|e| Error::io(&native_path, e))?;
    Ok(content)
}

/// Read a file for display, replacing invalid UTF-8.
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Compare two files byte for byte.
pub fn contents_equal(a: &Path, b: &Path) -> Result<bool> {
    let len_a = fs::metadata(a).map_err(|e| Error::io(a, e))?.len();
    let len_b = fs::metadata(b).map_err(|e| Error::io(b, e))?.len();
    if len_a != len_b {
        return Ok(false);
    }

    let mut reader_a = BufReader::new(File::open(a).map_err(|e| Error::io(a, e))?);
    let mut reader_b = BufReader::new(File::open(b).map_err(|e| Error::io(b, e))?);
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];

    loop {
        let read = reader_a.read(&mut buf_a).map_err(|e| Error::io(a, e))?;
        if read == 0 {
            return Ok(true);
        }
        reader_b
            .read_exact(&mut buf_b[..read])
            .map_err(|e| Error::io(b, e))?;
        if buf_a[..read] != buf_b[..read] {
            return Ok(false);
        }
    }
}
