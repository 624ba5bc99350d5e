//! Generation-checked slot handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A typed reference to a slot in a [`super::NodePool`].
///
/// Handles are plain `Copy` values: `(page, index, generation)`. A handle is
/// only honoured while its generation matches the slot's current generation,
/// which changes every time the slot is released.
pub struct Handle<T> {
    pub(crate) page: u32,
    pub(crate) index: u32,
    pub(crate) generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(page: u32, index: u32, generation: u32) -> Self {
        Self {
            page,
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Page the slot lives in.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Slot index within its page.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation the slot had when this handle was issued.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether two handles address the same physical slot, ignoring generation.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.page == other.page && self.index == other.index
    }
}

// Manual impls: derives would require `T: Clone` etc.

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_slot(other) && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.page.hash(state);
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{}@{})", self.page, self.index, self.generation)
    }
}
