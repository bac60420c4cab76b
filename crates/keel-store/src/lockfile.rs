use std::io::Write;
use std::path::{Path, PathBuf};

use crate::StoreError;

/// Exclusive write access to a file. Content is staged in a sibling `.lock`
/// file; [`commit`](LockFile::commit) renames it over the target so readers
/// never observe a partial write. Dropping without committing discards the
/// staged content and releases the lock.
pub struct LockFile {
    target: PathBuf,
    lock_path: PathBuf,
    handle: Option<std::fs::File>,
}

impl LockFile {
    pub fn acquire(target: &Path) -> Result<Self, StoreError> {
        let lock_path = target.with_extension("lock");
        // Try to create exclusively
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(handle) => Ok(Self {
                target: target.to_path_buf(),
                lock_path,
                handle: Some(handle),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StoreError::LockContention(target.to_path_buf()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), StoreError> {
        match self.handle.as_mut() {
            Some(handle) => {
                handle.write_all(data)?;
                Ok(())
            }
            None => Err(StoreError::LockContention(self.target.clone())),
        }
    }

    /// Atomically replace the target with the staged content.
    pub fn commit(mut self) -> Result<(), StoreError> {
        if let Some(handle) = self.handle.take() {
            handle.sync_all()?;
        }
        std::fs::rename(&self.lock_path, &self.target)?;
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = std::fs::remove_file(&self.lock_path);
        }
    }
}
