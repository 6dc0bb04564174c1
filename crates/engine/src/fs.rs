//! Filesystem collaborator used for staleness decisions and cleanup.
//!
//! The engine never writes files itself; task actions do. It only reads
//! existence and modification-time metadata, and deletes files on behalf
//! of cleanup tasks. The trait exists so tests and embedders can supply
//! fake filesystems.

use gantry_core::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

pub trait FileSystem: Send + Sync {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// The file's last modification time. `Ok(None)` when the file does
    /// not exist; `Err` only for real I/O failures.
    fn modified(&self, path: &Path) -> Result<Option<SystemTime>>;

    /// Delete the file at `path`. A missing file is not an error.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// The host filesystem via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> Result<Option<SystemTime>> {
        match fs::metadata(path) {
            Ok(metadata) => {
                let mtime = metadata
                    .modified()
                    .map_err(|e| Error::file_system(path, "modified", e))?;
                Ok(Some(mtime))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::file_system(path, "metadata", e)),
        }
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::file_system(path, "remove", e)),
        }
    }
}
