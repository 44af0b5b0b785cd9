//! Binary max-heap primitives shared by [`TopK`](crate::TopK) and [`Frontier`](crate::Frontier).
//!
//! Both queues keep the largest priority at the root. Index arithmetic is 1-based
//! (parent of `i` is `i / 2`, children are `2i` and `2i + 1`) and mapped onto a
//! 0-based `Vec` by the `slot` helpers below.

/// A queue entry: a priority and the payload it orders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry<T> {
    /// Ordering key. The heap root holds the largest priority.
    pub priority: f64,
    /// Opaque payload.
    pub item: T,
}

impl<T> Entry<T> {
    /// Creates a new entry.
    pub fn new(priority: f64, item: T) -> Self {
        Self { priority, item }
    }
}

#[inline]
fn slot(i: usize) -> usize {
    i - 1
}

#[inline]
fn priority_at<T>(entries: &[Entry<T>], i: usize) -> f64 {
    entries[slot(i)].priority
}

/// Moves the entry at 1-based position `i` up until its parent is not smaller.
pub(crate) fn sift_up<T>(entries: &mut [Entry<T>], mut i: usize) {
    while i != 1 {
        let parent = i >> 1;
        if priority_at(entries, i) <= priority_at(entries, parent) {
            break;
        }
        entries.swap(slot(i), slot(parent));
        i = parent;
    }
}

/// Moves the entry at 1-based position `i` down until neither child is larger.
pub(crate) fn sift_down<T>(entries: &mut [Entry<T>], mut i: usize) {
    let len = entries.len();
    loop {
        let left = i << 1;
        let right = left + 1;
        let mut largest = i;

        if left <= len && priority_at(entries, left) > priority_at(entries, largest) {
            largest = left;
        }
        if right <= len && priority_at(entries, right) > priority_at(entries, largest) {
            largest = right;
        }
        if largest == i {
            return;
        }
        entries.swap(slot(i), slot(largest));
        i = largest;
    }
}

/// Appends `entry` and restores heap order.
pub(crate) fn push<T>(entries: &mut Vec<Entry<T>>, entry: Entry<T>) {
    entries.push(entry);
    let last = entries.len();
    sift_up(entries, last);
}

/// Removes the root (largest priority) and restores heap order.
pub(crate) fn pop<T>(entries: &mut Vec<Entry<T>>) -> Option<Entry<T>> {
    if entries.is_empty() {
        return None;
    }
    // Last entry takes the root slot, then sinks.
    let top = entries.swap_remove(0);
    if !entries.is_empty() {
        sift_down(entries, 1);
    }
    Some(top)
}
