use std::collections::VecDeque;

use keel_core::ObjectId;

use crate::StoreError;

/// Object-store contract the walker resolves identifiers through.
pub trait ObjectSource {
    type Object;

    fn resolve(&self, id: &ObjectId) -> Result<Option<Self::Object>, StoreError>;
}

/// One resolved step of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry<O> {
    pub id: ObjectId,
    pub object: O,
}

/// The minimal pull contract a traversal engine drives: one entry per pull,
/// `None` once exhausted.
pub trait EntryQueue {
    type Object;

    fn next_entry(&mut self) -> Option<WalkEntry<Self::Object>>;
}

/// Strict FIFO queue over the objects a reflog names, in log order (newest
/// reference value first). All identifiers are resolved up front: a zero
/// sentinel is skipped silently (the value a reference held before it
/// existed names no object), any other unresolvable id aborts construction.
#[derive(Debug)]
pub struct ReflogQueue<O> {
    queue: VecDeque<WalkEntry<O>>,
}

impl<O> ReflogQueue<O> {
    pub fn new<S>(
        store: &S,
        ids: impl IntoIterator<Item = ObjectId>,
    ) -> Result<Self, StoreError>
    where
        S: ObjectSource<Object = O>,
    {
        let mut queue = VecDeque::new();
        for id in ids {
            if id.is_zero() {
                continue;
            }
            match store.resolve(&id)? {
                Some(object) => queue.push_back(WalkEntry { id, object }),
                None => return Err(StoreError::MissingObject(id)),
            }
        }
        Ok(Self { queue })
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<O> EntryQueue for ReflogQueue<O> {
    type Object = O;

    fn next_entry(&mut self) -> Option<WalkEntry<O>> {
        self.queue.pop_front()
    }
}

impl<O> Iterator for ReflogQueue<O> {
    type Item = WalkEntry<O>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}
