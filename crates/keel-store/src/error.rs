use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not a keel repository: {0}")]
    NotARepository(PathBuf),
    #[error("ref not found: {0}")]
    RefNotFound(String),
    #[error("missing object: {0}")]
    MissingObject(keel_core::ObjectId),
    #[error("lock contention on {0}")]
    LockContention(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("core error: {0}")]
    Core(#[from] keel_core::CoreError),
}
