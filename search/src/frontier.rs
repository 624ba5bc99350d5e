//! Best-first frontier with keyed removal.
//!
//! Uses a `BTreeMap` keyed by [`FrontierKey`] rather than a `BinaryHeap`:
//! relaxing a node that is still open changes its key, which needs
//! remove-by-key followed by re-insert. Keys are unique because creation
//! orders are.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use slidewise_kernel::pool::Handle;

use crate::node::FrontierKey;

/// Ordered open set of pooled node handles.
#[derive(Debug)]
pub struct BestFirstFrontier<T> {
    entries: BTreeMap<FrontierKey, Handle<T>>,
    high_water: u64,
}

impl<T> BestFirstFrontier<T> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            high_water: 0,
        }
    }

    /// Insert a handle under `key`.
    ///
    /// Returns `false` if the key is already present (nothing is inserted).
    pub fn push(&mut self, key: FrontierKey, handle: Handle<T>) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(slot) => {
                slot.insert(handle);
            }
        }
        let size = self.entries.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Pop the entry with the lowest key.
    #[must_use]
    pub fn pop(&mut self) -> Option<(FrontierKey, Handle<T>)> {
        self.entries.pop_first()
    }

    /// Remove the entry stored under `key`, returning its handle.
    pub fn remove(&mut self, key: FrontierKey) -> Option<Handle<T>> {
        self.entries.remove(&key)
    }

    /// Lowest key currently in the frontier.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.entries.keys().next().copied()
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

impl<T> Default for BestFirstFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}
