//! Bounded entity storage with liveness flags
//!
//! Records are never removed mid-tick. Systems flip the liveness flag and a
//! single `compact` pass at the end of the tick purges the dead, so iteration
//! during collision handling never shifts indices.

/// Entities that can be logically deleted
pub trait Live {
    fn is_alive(&self) -> bool;
    fn kill(&mut self);
}

/// An unordered, optionally bounded collection of entity records
#[derive(Debug, Clone, PartialEq)]
pub struct Population<T> {
    items: Vec<T>,
    limit: usize,
}

impl<T: Live> Population<T> {
    /// Population that accepts at most `limit` records (live or not yet purged)
    pub fn bounded(limit: usize) -> Self {
        Self {
            items: Vec::with_capacity(limit.min(256)),
            limit,
        }
    }

    /// Population with no size bound
    pub fn unbounded() -> Self {
        Self {
            items: Vec::new(),
            limit: usize::MAX,
        }
    }

    /// Maximum number of records
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Add a record. Returns false (and drops the record) when full.
    pub fn push(&mut self, item: T) -> bool {
        if self.items.len() >= self.limit {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Add every record that fits; returns how many were accepted
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let mut accepted = 0;
        for item in items {
            if !self.push(item) {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Live records
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_alive())
    }

    /// Live records, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().filter(|item| item.is_alive())
    }

    /// Number of live records
    pub fn live_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of stored records, including dead ones awaiting compaction
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when no live record remains
    pub fn all_dead(&self) -> bool {
        self.items.iter().all(|item| !item.is_alive())
    }

    /// Purge dead records. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.is_alive());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
