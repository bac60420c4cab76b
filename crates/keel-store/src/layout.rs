use std::path::{Path, PathBuf};

use crate::StoreError;

#[derive(Debug, Clone)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn keel_dir(&self) -> PathBuf {
        self.root.join(".keel")
    }

    pub fn refs_dir(&self) -> PathBuf {
        self.keel_dir().join("refs")
    }

    /// One log file per reference, mirroring the ref's path under refs/.
    pub fn logs_dir(&self) -> PathBuf {
        self.keel_dir().join("logs")
    }

    pub fn create_dirs(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.refs_dir().join("heads"))?;
        std::fs::create_dir_all(self.logs_dir().join("heads"))?;
        Ok(())
    }
}
