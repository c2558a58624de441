//! Directory-backed object store.
//!
//! Maps `container/key` addresses onto a directory tree under a fixed root.
//! Writes go through a temp-file-and-rename sequence so a reader never
//! observes a torn record, even if the writer crashes mid-write: the target
//! path either holds the previous complete object or the new one.

use super::{Address, ObjectStore};
use crate::error::{HaspError, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// An [`ObjectStore`] backed by a directory tree.
///
/// Suitable for coordination across processes on one machine or over a
/// shared filesystem whose rename semantics are trustworthy. Keys may
/// contain `/`, which nest as subdirectories.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            HaspError::StorageUnavailable(format!(
                "failed to create store root '{}': {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    /// The root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, address: &Address) -> PathBuf {
        self.root.join(&address.container).join(&address.key)
    }
}

impl ObjectStore for FsStore {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>> {
        match fs::read(self.object_path(address)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HaspError::StorageUnavailable(format!(
                "failed to read '{}': {}",
                address, e
            ))),
        }
    }

    fn put(&self, address: &Address, bytes: &[u8]) -> Result<()> {
        let path = self.object_path(address);

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                HaspError::StorageUnavailable(format!(
                    "failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(&path, address)?;
        write_and_sync(&temp_path, bytes, address)?;

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            HaspError::StorageUnavailable(format!("failed to replace '{}': {}", address, e))
        })?;

        // Sync the directory entry as well so the rename itself is durable.
        if let Some(parent) = path.parent()
            && let Ok(dir) = File::open(parent)
        {
            let _ = dir.sync_all();
        }

        Ok(())
    }
}

/// Temp file path in the same directory as the target, so the final rename
/// never crosses a filesystem boundary.
fn temp_path_for(target: &Path, address: &Address) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            HaspError::StorageUnavailable(format!("invalid object path for '{}'", address))
        })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, bytes: &[u8], address: &Address) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        HaspError::StorageUnavailable(format!(
            "failed to create temp file for '{}': {}",
            address, e
        ))
    })?;

    file.write_all(bytes)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            HaspError::StorageUnavailable(format!(
                "failed to write temp file for '{}': {}",
                address, e
            ))
        })
}
