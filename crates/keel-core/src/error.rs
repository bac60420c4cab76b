use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid object ID: {0}")]
    InvalidObjectId(String),
    #[error("log index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid timezone offset: {0}")]
    InvalidTimezone(String),
}
