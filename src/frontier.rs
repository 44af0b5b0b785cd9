//! Growable max-heap used as the traversal frontier of best-first search.

use crate::heap::{self, Entry};

/// Resizable max-heap of `(priority, item)` entries with no eviction.
///
/// Storage doubles when full and survives [`clear`](Self::clear), so one
/// frontier can serve any number of searches without reallocating once it has
/// grown to the working size.
#[derive(Clone, Debug)]
pub struct Frontier<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Frontier<T> {
    /// Creates an empty frontier with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts an entry, doubling the backing storage if it is full.
    pub fn push(&mut self, priority: f64, item: T) {
        let capacity = self.entries.capacity();
        if self.entries.len() == capacity {
            self.entries.reserve_exact(capacity.max(1));
        }
        heap::push(&mut self.entries, Entry::new(priority, item));
    }

    /// Removes and returns the largest-priority entry.
    pub fn pop(&mut self) -> Option<Entry<T>> {
        heap::pop(&mut self.entries)
    }

    /// Returns the largest-priority entry without removing it.
    pub fn peek(&self) -> Option<&Entry<T>> {
        self.entries.first()
    }

    /// Empties the frontier without releasing storage.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries the current storage can hold before the next resize.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::with_capacity(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_pops_descending_across_resizes() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut frontier = Frontier::with_capacity(1);
        let mut pushed = Vec::new();
        for item in 0..1000u32 {
            let priority: f64 = rng.random_range(-50.0..50.0);
            frontier.push(priority, item);
            pushed.push(priority);
        }
        assert_eq!(frontier.len(), 1000);
        assert!(frontier.capacity() >= 1000);

        pushed.sort_by(|a, b| b.total_cmp(a));
        let mut popped = Vec::new();
        while let Some(entry) = frontier.pop() {
            popped.push(entry.priority);
        }
        assert_eq!(popped, pushed, "Frontier should pop by descending priority");
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut frontier = Frontier::with_capacity(4);
        for item in 0..100 {
            frontier.push(item as f64, item);
        }
        let grown = frontier.capacity();
        frontier.clear();
        assert!(frontier.is_empty());
        assert_eq!(frontier.capacity(), grown, "clear() should not release storage");

        frontier.push(1.0, 1);
        assert_eq!(frontier.capacity(), grown);
        assert_eq!(frontier.peek().map(|e| e.item), Some(1));
    }

    #[test]
    fn test_keeps_duplicates() {
        let mut frontier = Frontier::default();
        frontier.push(2.0, 'a');
        frontier.push(2.0, 'a');
        assert_eq!(frontier.len(), 2, "Frontier does not deduplicate");
    }

    #[test]
    fn test_zero_capacity_grows() {
        let mut frontier = Frontier::with_capacity(0);
        frontier.push(3.0, ());
        frontier.push(4.0, ());
        assert_eq!(frontier.pop().map(|e| e.priority), Some(4.0));
        assert_eq!(frontier.pop().map(|e| e.priority), Some(3.0));
        assert!(frontier.pop().is_none());
    }
}
