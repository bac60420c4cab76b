pub mod error;
pub mod id;
pub mod reflog;
pub mod timezone;

pub use error::CoreError;
pub use id::ObjectId;
pub use reflog::{RefLog, RefLogEntry};
pub use timezone::{format_timezone, parse_timezone};
