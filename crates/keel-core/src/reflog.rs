use serde::{Deserialize, Serialize};

use crate::id::ObjectId;
use crate::CoreError;

/// One recorded update of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefLogEntry {
    pub old: ObjectId,
    pub new: ObjectId,
    pub user: String,
    pub time: u64,
    pub tz_offset: i32,
    pub tz_negative_zero: bool,
    pub message: String,
}

/// Ordered history of the values a reference has held. Index 0 is the most
/// recent update; higher indices are older. Adjacent entries share a value:
/// `entries[i].old == entries[i + 1].new`. Mutation goes through
/// [`add_entry`](RefLog::add_entry) and [`delete_entry`](RefLog::delete_entry)
/// so that callers cannot reorder entries underneath the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefLog {
    entries: Vec<RefLogEntry>,
}

impl RefLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries must already be in log order, index 0 most recent.
    pub fn from_entries(entries: Vec<RefLogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RefLogEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RefLogEntry> {
        self.entries.iter()
    }

    /// The value the reference held at position `index` in its history:
    /// index 0 is the current value (`entries[0].new`), index i > 0 is the
    /// value before the i most recent updates (`entries[i - 1].old`).
    pub fn get_sha_by_index(&self, index: usize) -> Result<ObjectId, CoreError> {
        let len = self.entries.len();
        if index == 0 {
            return self
                .entries
                .first()
                .map(|e| e.new)
                .ok_or(CoreError::IndexOutOfRange { index, len });
        }
        self.entries
            .get(index - 1)
            .map(|e| e.old)
            .ok_or(CoreError::IndexOutOfRange { index, len })
    }

    /// Every value the reference has held, newest first, ending in the
    /// oldest recorded `old` (often the zero sentinel). Recomputed per call.
    pub fn shas(&self) -> Vec<ObjectId> {
        match self.entries.first() {
            None => Vec::new(),
            Some(first) => std::iter::once(first.new)
                .chain(self.entries.iter().map(|e| e.old))
                .collect(),
        }
    }

    /// Record a reference update at the front of the log. `old` is taken on
    /// trust; the caller supplies the reference's previous value to keep the
    /// chain intact.
    #[allow(clippy::too_many_arguments)]
    pub fn add_entry(
        &mut self,
        old: ObjectId,
        new: ObjectId,
        user: &str,
        time: u64,
        tz_offset: i32,
        tz_negative_zero: bool,
        message: &str,
    ) {
        self.entries.insert(
            0,
            RefLogEntry {
                old,
                new,
                user: user.to_string(),
                time,
                tz_offset,
                tz_negative_zero,
                message: message.to_string(),
            },
        );
    }

    /// Remove the entry at `index`, returning it. With `rewrite`, the `old`
    /// of the surviving newer neighbor is re-pointed across the gap so the
    /// chain invariant holds; without it the gap is left as-is for the
    /// caller to deal with. Removing index 0 never needs repair.
    pub fn delete_entry(&mut self, index: usize, rewrite: bool) -> Result<RefLogEntry, CoreError> {
        let len = self.entries.len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        if rewrite && index != 0 {
            let replacement = if index == len - 1 {
                self.entries[index].old
            } else {
                self.entries[index + 1].new
            };
            self.entries[index - 1].old = replacement;
        }
        Ok(self.entries.remove(index))
    }
}
