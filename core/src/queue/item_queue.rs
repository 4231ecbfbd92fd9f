use std::{collections::VecDeque, sync::Mutex};

use super::error::QueueError;

/// A mutex-guarded FIFO handing payload items from the RTI callback thread
/// to the simulator thread.
///
/// The queue owns its items: `pop` removes and returns ownership, and the
/// caller dropping the item destroys it. A walking consumer may advance the
/// logical head with `next` and later `rewind` to the original head, so
/// unconsumed items are never lost. Single-producer/single-consumer is the
/// expected load, but any number of producers is tolerated.
pub struct ItemQueue<T> {
    inner: Mutex<QueueInner<T>>,
}

struct QueueInner<T> {
    items: VecDeque<T>,
    /// Index of the logical head. Non-zero only while a walk is in
    /// progress; `rewind` restores it to the real head.
    cursor: usize,
}

impl<T> ItemQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(QueueInner {
                items: VecDeque::new(),
                cursor: 0,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, QueueInner<T>>, QueueError> {
        self.inner.lock().map_err(|_| QueueError::LockPoisoned)
    }

    /// Append an item at the tail, taking ownership.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        let mut inner = self.lock()?;
        inner.items.push_back(item);
        Ok(())
    }

    /// Remove and return the logical head. `Ok(None)` on an empty queue.
    pub fn pop(&self) -> Result<Option<T>, QueueError> {
        let mut inner = self.lock()?;
        let cursor = inner.cursor;
        if cursor >= inner.items.len() {
            return Ok(None);
        }
        Ok(inner.items.remove(cursor))
    }

    /// Inspect the logical head without removing it.
    pub fn front<R>(&self, inspect: impl FnOnce(&T) -> R) -> Result<Option<R>, QueueError> {
        let inner = self.lock()?;
        Ok(inner.items.get(inner.cursor).map(inspect))
    }

    /// Advance the logical head one item, recording the original head on
    /// the first advance. Returns false when already past the last item.
    pub fn next(&self) -> Result<bool, QueueError> {
        let mut inner = self.lock()?;
        if inner.cursor < inner.items.len() {
            inner.cursor += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Restore the logical head to the original head so a subsequent full
    /// drain sees every unconsumed item.
    pub fn rewind(&self) -> Result<(), QueueError> {
        let mut inner = self.lock()?;
        inner.cursor = 0;
        Ok(())
    }

    /// Number of items reachable from the logical head.
    pub fn size(&self) -> Result<usize, QueueError> {
        let inner = self.lock()?;
        Ok(inner.items.len() - inner.cursor)
    }

    pub fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.size()? == 0)
    }
}

impl<T> Default for ItemQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
