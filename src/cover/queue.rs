// src/cover/queue.rs
// =============================================================================
// A bucket priority queue specialised for greedy set cover.
//
// How it works:
// - Every set's priority is its current size (how many still-uncovered
//   elements it holds)
// - buckets[p] holds every stored set whose size is p, ordered by the set's
//   own Ord, so the top of the queue is the smallest value in the last bucket
// - The highest priority is simply the last bucket, so peek is O(1)
// - Deleting the top set folds its elements into the covered accumulator,
//   strips those elements from every other set, and moves each set that
//   shrank down into its new bucket
//
// Storage:
// - Set payloads live in an arena (`entries`) addressed by a stable SetId
// - Each bucket maps the set's current value to its id, so a bucket never
//   holds two equal values; inserting a value equal to a stored one replaces
//   that entry instead of adding a second
//
// Reference: https://en.wikipedia.org/wiki/Bucket_queue#Greedy_set_cover
// =============================================================================

use std::collections::BTreeMap;

use super::error::QueueError;
use super::set::CoverableSet;

/// Stable handle to a set stored in a [`BucketQueue`].
///
/// Ids are never reused, even after the set they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetId(usize);

#[derive(Debug, Clone)]
struct Entry<T> {
    // The value with already-covered elements removed. Also its bucket key.
    set: T,
    // Bucket this entry lives in; always equals set.size() between operations.
    priority: usize,
}

#[derive(Debug, Clone)]
pub struct BucketQueue<T> {
    entries: Vec<Option<Entry<T>>>,
    buckets: Vec<BTreeMap<T, SetId>>,
    covered: T,
    len: usize,
}

impl<T: CoverableSet> Default for BucketQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CoverableSet> BucketQueue<T> {
    pub fn new() -> Self {
        BucketQueue {
            entries: Vec::new(),
            buckets: Vec::new(),
            covered: T::default(),
            len: 0,
        }
    }

    /// Builds a queue holding every set in `sets`.
    ///
    /// O(number of sets) insertions, as long as `size()` is O(1).
    pub fn from_sets<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut queue = Self::new();
        for set in sets {
            queue.insert(set);
        }
        queue
    }

    /// Stores `set` in the bucket matching its size, growing the bucket list
    /// if needed.
    ///
    /// If a value equal to `set` is currently stored, that entry is
    /// overwritten by `set` and its existing id is returned. The comparison
    /// is against each entry's current value, after any elements already
    /// covered have been stripped from it.
    pub fn insert(&mut self, set: T) -> SetId {
        let priority = set.size();

        // Equal value already stored: overwrite it in place
        if let Some(&id) = self.buckets.get(priority).and_then(|bucket| bucket.get(&set)) {
            let bucket = &mut self.buckets[priority];
            bucket.remove(&set);
            bucket.insert(set.clone(), id);
            if let Some(entry) = self.entries[id.0].as_mut() {
                entry.set = set;
            }
            return id;
        }

        // Otherwise give it a fresh slot in the arena
        let id = SetId(self.entries.len());
        self.entries.push(Some(Entry { set, priority }));
        self.len += 1;
        self.attach(id)
    }

    /// Returns the set with the highest priority, or `None` once the queue is
    /// exhausted.
    ///
    /// Among equal priorities the smallest value under `Ord` wins.
    pub fn peek_highest_priority(&self) -> Option<&T> {
        self.buckets
            .last()?
            .first_key_value()
            .map(|(set, _)| set)
    }

    /// Removes the highest-priority set and returns it, after folding its
    /// elements into the covered set and lowering the priority of every
    /// remaining set that shared any of them.
    ///
    /// Returns `Ok(None)` without doing anything if the queue is exhausted.
    pub fn delete_highest_priority(&mut self) -> Result<Option<T>, QueueError> {
        // Same choice as peek: the smallest value in the top bucket
        let Some(id) = self.top_id() else {
            return Ok(None);
        };
        let priority = self.buckets.len() - 1;

        match self.entries.get(id.0).and_then(Option::as_ref) {
            Some(entry) if entry.priority == priority => {}
            _ => return Err(QueueError::NotFound { priority }),
        }

        self.detach(id);
        // Free its arena slot; the id is never handed out again
        let chosen = self.entries[id.0]
            .take()
            .ok_or(QueueError::NotFound { priority })?;
        self.len -= 1;

        // Everything the chosen set held is now covered
        self.covered.add_elements(&chosen.set);

        // Only sets still sitting in a bucket can hold covered elements
        let resident: Vec<SetId> = self
            .buckets
            .iter()
            .flat_map(|bucket| bucket.values().copied())
            .collect();

        for id in resident {
            let Some(entry) = self.entries[id.0].as_mut() else {
                continue;
            };
            // Strip what is already covered; untouched sets stay where they are
            let mut updated = entry.set.clone();
            if updated.remove_elements(&self.covered) == 0 {
                continue;
            }

            // Re-key in its current bucket first, so decrease_priority finds
            // the entry under its new value
            let old = entry.priority;
            self.buckets[old].remove(&entry.set);
            self.buckets[old].insert(updated.clone(), id);
            entry.set = updated;

            let new = entry.set.size();
            self.decrease_priority(id, old, new)?;
        }

        Ok(Some(chosen.set))
    }

    /// Moves the set `id` from bucket `old_priority` to bucket `new_priority`.
    ///
    /// `new_priority` must not exceed `old_priority` and must equal the set's
    /// current size. Nothing is changed when an error is returned.
    ///
    /// If the new bucket already holds a value equal to this set, the two
    /// collapse into the one already there and `id` stops naming anything.
    pub fn decrease_priority(
        &mut self,
        id: SetId,
        old_priority: usize,
        new_priority: usize,
    ) -> Result<(), QueueError> {
        // Nothing to move
        if new_priority == old_priority {
            return Ok(());
        }
        if new_priority > old_priority {
            return Err(QueueError::PriorityIncrease {
                old: old_priority,
                new: new_priority,
            });
        }
        if old_priority >= self.buckets.len() {
            return Err(QueueError::OutOfRange {
                priority: old_priority,
                len: self.buckets.len(),
            });
        }

        // The entry must really be filed under old_priority
        let size = match self.entries.get(id.0).and_then(Option::as_ref) {
            Some(entry)
                if entry.priority == old_priority
                    && self.buckets[old_priority].get(&entry.set) == Some(&id) =>
            {
                entry.set.size()
            }
            _ => return Err(QueueError::NotFound { priority: old_priority }),
        };
        if size != new_priority {
            return Err(QueueError::PriorityMismatch {
                new: new_priority,
                size,
            });
        }

        // Every check passed, so it is safe to move the entry now
        self.detach(id);
        self.attach(id);
        Ok(())
    }

    /// Union of every set deleted so far.
    pub fn covered_elements(&self) -> &T {
        &self.covered
    }

    pub fn into_covered_elements(self) -> T {
        self.covered
    }

    pub fn get(&self, id: SetId) -> Option<&T> {
        self.entries
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|entry| &entry.set)
    }

    pub fn priority_of(&self, id: SetId) -> Option<usize> {
        self.entries
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|entry| entry.priority)
    }

    pub fn highest_priority(&self) -> Option<usize> {
        self.buckets.len().checked_sub(1)
    }

    /// Number of sets currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn top_id(&self) -> Option<SetId> {
        self.buckets
            .last()?
            .first_key_value()
            .map(|(_, &id)| id)
    }

    // Takes `id` out of its bucket, trimming empty top buckets.
    fn detach(&mut self, id: SetId) {
        let Some(entry) = self.entries[id.0].as_ref() else {
            return;
        };
        let priority = entry.priority;
        self.buckets[priority].remove(&entry.set);

        // Only the top bucket can leave empty buckets above the new maximum
        if priority + 1 == self.buckets.len() {
            self.trim_buckets();
        }
    }

    // Files `id` under the bucket matching its current size and returns the
    // id that now holds the value. When an equal value is already there, the
    // resident keeps its place and `id` is retired.
    fn attach(&mut self, id: SetId) -> SetId {
        let Some(entry) = self.entries[id.0].as_mut() else {
            return id;
        };
        // Grow the bucket list if this set is bigger than anything stored
        let priority = entry.set.size();
        if priority >= self.buckets.len() {
            self.buckets.resize_with(priority + 1, BTreeMap::new);
        }

        if let Some(&resident) = self.buckets[priority].get(&entry.set) {
            self.entries[id.0] = None;
            self.len -= 1;
            return resident;
        }

        entry.priority = priority;
        self.buckets[priority].insert(entry.set.clone(), id);
        id
    }

    fn trim_buckets(&mut self) {
        while matches!(self.buckets.last(), Some(bucket) if bucket.is_empty()) {
            self.buckets.pop();
        }
    }
}
