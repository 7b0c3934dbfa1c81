//! A binary heap with stable keys, O(1) membership and in-place
//! reprioritisation.
//!
//! [`std::collections::BinaryHeap`] cannot tell whether an element is
//! queued, nor raise an element's priority without pushing a duplicate.
//! [`IndexedHeap`] keeps a side array mapping each element's key to its
//! slot in the backing storage, so both are O(1) / O(log n).

/// An element that can live in an [`IndexedHeap`].
///
/// The element that should be served first must compare as the *greatest*.
pub trait HeapItem: Ord + Copy {
    /// Stable key identifying the logical element, in `0..capacity`.
    fn key(&self) -> usize;
}

/// Fixed-capacity binary max-heap addressed by element key.
///
/// Invariant: `items[slots[e.key()]] == e` for every queued element `e`.
#[derive(Debug, Clone)]
pub struct IndexedHeap<T: HeapItem> {
    items: Vec<T>,
    slots: Vec<usize>,
}

impl<T: HeapItem> IndexedHeap<T> {
    /// Create an empty heap able to hold keys `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            slots: vec![usize::MAX; capacity],
        }
    }

    /// Maximum number of elements (and exclusive upper bound on keys).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every element. O(1): stale slot entries are left behind and
    /// rejected by [`contains`](Self::contains).
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The element that [`remove_first`](Self::remove_first) would return.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Whether an element with `key` is currently queued.
    #[inline]
    pub fn contains(&self, key: usize) -> bool {
        match self.slots.get(key) {
            Some(&slot) => self.items.get(slot).is_some_and(|e| e.key() == key),
            None => false,
        }
    }

    /// Insert `item`. O(log n).
    ///
    /// # Panics
    ///
    /// If the heap is full or the key is outside `0..capacity`. Either is a
    /// logic error in the caller.
    pub fn add(&mut self, item: T) {
        let key = item.key();
        assert!(
            key < self.slots.len(),
            "heap key {key} outside capacity {}",
            self.slots.len()
        );
        assert!(
            self.items.len() < self.slots.len(),
            "heap capacity {} exceeded",
            self.slots.len()
        );
        debug_assert!(!self.contains(key), "heap key {key} queued twice");
        let slot = self.items.len();
        self.items.push(item);
        self.slots[key] = slot;
        self.sift_up(slot);
    }

    /// Remove and return the highest-priority element. O(log n).
    pub fn remove_first(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.swap(0, last);
        let first = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        first
    }

    /// Replace the queued element sharing `item`'s key and restore heap
    /// order upwards. O(log n).
    ///
    /// Only improvements are supported: `item` must compare greater than or
    /// equal to the element it replaces.
    ///
    /// # Panics
    ///
    /// If no element with that key is queued.
    pub fn update_item(&mut self, item: T) {
        let key = item.key();
        assert!(self.contains(key), "heap key {key} is not queued");
        let slot = self.slots[key];
        debug_assert!(item >= self.items[slot], "heap priority decreased for key {key}");
        self.items[slot] = item;
        self.sift_up(slot);
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.items[slot] > self.items[parent] {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.items.len();
        loop {
            let left = slot * 2 + 1;
            if left >= len {
                return;
            }
            let right = left + 1;
            // Ties between siblings go to the left child.
            let child = if right < len && self.items[right] > self.items[left] {
                right
            } else {
                left
            };
            if self.items[child] > self.items[slot] {
                self.swap(slot, child);
                slot = child;
            } else {
                return;
            }
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        self.slots[self.items[a].key()] = a;
        self.slots[self.items[b].key()] = b;
    }
}
