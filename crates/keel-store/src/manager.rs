use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use keel_core::{CoreError, ObjectId, RefLog, RefLogEntry};

use crate::layout::RepoLayout;
use crate::reflog;
use crate::refs;
use crate::walk::{ObjectSource, ReflogQueue};
use crate::StoreError;

/// Per-repository reflog access: one [`RefLog`] per reference name, read
/// from disk on first use and cached for the manager's lifetime.
///
/// The cache is never invalidated; if another process rewrites a log file
/// while this manager is alive, the cached copy goes stale. Callers are
/// expected to serialize writers per reference.
pub struct RefLogManager {
    layout: RepoLayout,
    logs: HashMap<String, RefLog>,
}

impl RefLogManager {
    pub fn init(root: &Path) -> Result<Self, StoreError> {
        let layout = RepoLayout::new(root);
        layout.create_dirs()?;
        Ok(Self {
            layout,
            logs: HashMap::new(),
        })
    }

    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let layout = RepoLayout::new(root);
        if !layout.keel_dir().exists() {
            return Err(StoreError::NotARepository(root.to_path_buf()));
        }
        Ok(Self {
            layout,
            logs: HashMap::new(),
        })
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    fn valid_ref(&self, ref_name: &str) -> Result<(), StoreError> {
        if refs::ref_exists(&self.layout, ref_name) {
            Ok(())
        } else {
            Err(StoreError::RefNotFound(ref_name.to_string()))
        }
    }

    fn load(&mut self, ref_name: &str) -> Result<&mut RefLog, StoreError> {
        match self.logs.entry(ref_name.to_string()) {
            Entry::Occupied(occupied) => Ok(occupied.into_mut()),
            Entry::Vacant(vacant) => {
                let log = reflog::read_reflog_file(&self.layout, ref_name)?;
                tracing::debug!(ref_name, entries = log.len(), "loaded reflog");
                Ok(vacant.insert(log))
            }
        }
    }

    /// The value `ref_name` held `index` updates ago. Index 0 is answered
    /// from the live reference itself, not from the log, so it stays
    /// authoritative even when the cached log lags behind.
    pub fn get_sha_by_index(
        &mut self,
        ref_name: &str,
        index: usize,
    ) -> Result<ObjectId, StoreError> {
        self.valid_ref(ref_name)?;
        if index == 0 {
            return refs::read_ref(&self.layout, ref_name)?
                .ok_or_else(|| StoreError::RefNotFound(ref_name.to_string()));
        }
        let log = self.load(ref_name)?;
        Ok(log.get_sha_by_index(index)?)
    }

    pub fn get_log_by_index(
        &mut self,
        ref_name: &str,
        index: usize,
    ) -> Result<RefLogEntry, StoreError> {
        self.valid_ref(ref_name)?;
        let log = self.load(ref_name)?;
        let len = log.len();
        log.get(index)
            .cloned()
            .ok_or(StoreError::Core(CoreError::IndexOutOfRange { index, len }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_entry(
        &mut self,
        ref_name: &str,
        old: ObjectId,
        new: ObjectId,
        user: &str,
        time: u64,
        tz_offset: i32,
        message: &str,
    ) -> Result<(), StoreError> {
        self.valid_ref(ref_name)?;
        let log = self.load(ref_name)?;
        log.add_entry(old, new, user, time, tz_offset, false, message);
        Ok(())
    }

    pub fn delete_entry(
        &mut self,
        ref_name: &str,
        index: usize,
        rewrite: bool,
    ) -> Result<RefLogEntry, StoreError> {
        self.valid_ref(ref_name)?;
        let log = self.load(ref_name)?;
        Ok(log.delete_entry(index, rewrite)?)
    }

    /// Persist a cached log back to its file. A ref whose log was never
    /// touched has nothing to flush.
    pub fn flush(&mut self, ref_name: &str) -> Result<(), StoreError> {
        if let Some(log) = self.logs.get(ref_name) {
            reflog::write_reflog_file(&self.layout, ref_name, log)?;
        }
        Ok(())
    }

    /// Move `ref_name` to `new`, recording the update: the reference's
    /// current value (or the zero sentinel for a new reference) becomes the
    /// entry's `old`, and both the ref file and the log file are written.
    pub fn update_ref(
        &mut self,
        ref_name: &str,
        new: ObjectId,
        user: &str,
        time: u64,
        tz_offset: i32,
        message: &str,
    ) -> Result<(), StoreError> {
        let old = refs::read_ref(&self.layout, ref_name)?.unwrap_or(ObjectId::ZERO);
        refs::write_ref(&self.layout, ref_name, &new)?;
        self.add_entry(ref_name, old, new, user, time, tz_offset, message)?;
        self.flush(ref_name)
    }

    /// Traverse the objects named by `ref_name`'s log, newest value first.
    pub fn walk<S>(
        &mut self,
        store: &S,
        ref_name: &str,
    ) -> Result<ReflogQueue<S::Object>, StoreError>
    where
        S: ObjectSource,
    {
        self.valid_ref(ref_name)?;
        let shas = self.load(ref_name)?.shas();
        ReflogQueue::new(store, shas)
    }
}
