//! Fixed-capacity selector that keeps the `k` smallest priorities pushed into it.

use crate::heap::{self, Entry};

/// Bounded max-heap keeping the `k` entries with the smallest priority.
///
/// The worst (largest) kept priority sits at the root, so [`peek`](Self::peek)
/// is the current pruning bound of a nearest-neighbor search and
/// [`pop`](Self::pop) drains from worst to best.
///
/// # Examples
/// ```
/// use photon_kdtree::TopK;
///
/// let mut top = TopK::new(2);
/// top.push(5.0, 'a');
/// top.push(1.0, 'b');
/// top.push(3.0, 'c'); // evicts 'a'
///
/// assert!(top.is_full());
/// assert_eq!(top.peek().map(|e| e.item), Some('c'));
/// assert_eq!(top.into_sorted_vec().iter().map(|e| e.item).collect::<String>(), "bc");
/// ```
#[derive(Clone, Debug)]
pub struct TopK<T> {
    entries: Vec<Entry<T>>,
    capacity: usize,
}

impl<T> TopK<T> {
    /// Creates an empty selector holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Offers an entry.
    ///
    /// Dropped if an entry with the same priority and the same item is already
    /// kept. The duplicate scan is linear; `k` is expected to stay in the tens.
    /// When full, an entry that does not beat the worst kept priority is
    /// ignored; otherwise the worst entry is evicted to make room.
    pub fn push(&mut self, priority: f64, item: T)
    where
        T: PartialEq,
    {
        if priority >= self.bound() {
            return;
        }
        if self
            .entries
            .iter()
            .any(|e| e.priority == priority && e.item == item)
        {
            return;
        }
        if self.is_full() {
            let _evicted = heap::pop(&mut self.entries);
        }
        heap::push(&mut self.entries, Entry::new(priority, item));
    }

    /// Removes and returns the worst (largest-priority) entry.
    pub fn pop(&mut self) -> Option<Entry<T>> {
        heap::pop(&mut self.entries)
    }

    /// Returns the worst entry without removing it.
    pub fn peek(&self) -> Option<&Entry<T>> {
        self.entries.first()
    }

    /// Priority an entry must beat to be kept: the worst kept priority once
    /// full, infinity before that.
    pub fn bound(&self) -> f64 {
        if self.is_full() {
            self.peek().map_or(f64::NEG_INFINITY, |e| e.priority)
        } else {
            f64::INFINITY
        }
    }

    /// True once `capacity` entries are held.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drains the selector into a vector ordered from best to worst.
    pub fn into_sorted_vec(mut self) -> Vec<Entry<T>> {
        let mut sorted = Vec::with_capacity(self.entries.len());
        while let Some(entry) = self.pop() {
            sorted.push(entry);
        }
        sorted.reverse();
        sorted
    }
}
