pub mod error;
pub mod layout;
pub mod lockfile;
pub mod manager;
pub mod reflog;
pub mod refs;
pub mod walk;

pub use error::StoreError;
pub use manager::RefLogManager;
pub use walk::{EntryQueue, ObjectSource, ReflogQueue, WalkEntry};
