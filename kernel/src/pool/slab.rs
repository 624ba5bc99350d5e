//! `NodePool`: the paged slab itself.

use super::config::PoolConfig;
use super::error::PoolError;
use super::handle::Handle;

/// Physical address of a slot: `(page, index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotAddr {
    page: u32,
    index: u32,
}

/// Contents of a slot. The vacant variant carries the free-list link.
#[derive(Debug)]
enum Entry<T> {
    Vacant { next_free: Option<SlotAddr> },
    Occupied(T),
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

/// Paged slab allocator handing out [`Handle`]s to `T` records.
///
/// The pool exclusively owns every record it stores. Records leave the pool
/// either through [`NodePool::release`] (which hands the value back) or when
/// the pool is dropped, at which point each outstanding record is dropped
/// exactly once.
#[derive(Debug)]
pub struct NodePool<T> {
    pages: Vec<Vec<Slot<T>>>,
    free_head: Option<SlotAddr>,
    config: PoolConfig,
    live: usize,
    capacity: usize,
}

impl<T> NodePool<T> {
    /// Create a pool and reserve its first page.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] for an invalid `config` and
    /// [`PoolError::Exhausted`] if the first page cannot be reserved.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        // A vacant slot must be able to hold its free-list link.
        debug_assert!(std::mem::size_of::<Slot<T>>() >= std::mem::size_of::<Option<SlotAddr>>());

        let mut pool = Self {
            pages: Vec::new(),
            free_head: None,
            config,
            live: 0,
            capacity: 0,
        };
        pool.add_page(config.start_page_size)?;
        Ok(pool)
    }

    /// Store `value` in a free slot, growing the pool by one page if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] if a new page was needed and could
    /// not be reserved.
    pub fn allocate(&mut self, value: T) -> Result<Handle<T>, PoolError> {
        let addr = match self.free_head {
            Some(addr) => addr,
            None => self.grow()?,
        };
        let slot = &mut self.pages[addr.page as usize][addr.index as usize];
        let Entry::Vacant { next_free } = slot.entry else {
            unreachable!("free list head {addr:?} points at an occupied slot");
        };
        slot.entry = Entry::Occupied(value);
        self.free_head = next_free;
        self.live += 1;
        Ok(Handle::new(addr.page, addr.index, slot.generation))
    }

    /// Store `T::default()` in a free slot.
    ///
    /// # Errors
    ///
    /// Same as [`NodePool::allocate`].
    pub fn allocate_default(&mut self) -> Result<Handle<T>, PoolError>
    where
        T: Default,
    {
        self.allocate(T::default())
    }

    /// Return a slot to the free list, handing back the stored value.
    ///
    /// The handle (and every copy of it) is dead afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::StaleHandle`] if the handle was already released.
    pub fn release(&mut self, handle: Handle<T>) -> Result<T, PoolError> {
        let head = self.free_head;
        let slot = self
            .pages
            .get_mut(handle.page as usize)
            .and_then(|page| page.get_mut(handle.index as usize))
            .filter(|slot| {
                slot.generation == handle.generation && matches!(slot.entry, Entry::Occupied(_))
            })
            .ok_or(PoolError::StaleHandle)?;
        let Entry::Occupied(value) =
            std::mem::replace(&mut slot.entry, Entry::Vacant { next_free: head })
        else {
            unreachable!("slot occupancy checked above");
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free_head = Some(SlotAddr {
            page: handle.page,
            index: handle.index,
        });
        self.live -= 1;
        Ok(value)
    }

    /// Borrow the record behind a live handle.
    #[must_use]
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let slot = self
            .pages
            .get(handle.page as usize)?
            .get(handle.index as usize)?;
        match &slot.entry {
            Entry::Occupied(value) if slot.generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Mutably borrow the record behind a live handle.
    #[must_use]
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let slot = self
            .pages
            .get_mut(handle.page as usize)?
            .get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        match &mut slot.entry {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    /// Whether `handle` still refers to a live record.
    #[must_use]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live records.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live
    }

    /// Whether the pool holds no live records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total number of slots across all pages.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pages reserved so far.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Slot counts of each page, oldest first.
    pub fn page_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages.iter().map(Vec::len)
    }

    /// Bytes reserved for slot storage (excluding heap data owned by records).
    #[must_use]
    pub fn reserved_bytes(&self) -> usize {
        self.capacity * std::mem::size_of::<Slot<T>>()
    }

    /// The configuration this pool was built with.
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn grow(&mut self) -> Result<SlotAddr, PoolError> {
        let previous = self.pages.last().map_or(0, Vec::len);
        let size = self.config.next_page_size(previous);
        self.add_page(size)?;
        self.free_head.ok_or(PoolError::Exhausted {
            requested_slots: size,
        })
    }

    /// Reserve a page of `size` slots and splice it onto the front of the
    /// free list.
    fn add_page(&mut self, size: usize) -> Result<(), PoolError> {
        let exhausted = PoolError::Exhausted {
            requested_slots: size,
        };
        let page_index = u32::try_from(self.pages.len()).map_err(|_| exhausted.clone())?;
        let slot_count = u32::try_from(size).map_err(|_| exhausted.clone())?;

        let mut page: Vec<Slot<T>> = Vec::new();
        page.try_reserve_exact(size).map_err(|_| exhausted.clone())?;
        self.pages.try_reserve(1).map_err(|_| exhausted)?;

        for index in 0..slot_count {
            let next_free = if index + 1 < slot_count {
                Some(SlotAddr {
                    page: page_index,
                    index: index + 1,
                })
            } else {
                self.free_head
            };
            page.push(Slot {
                generation: 0,
                entry: Entry::Vacant { next_free },
            });
        }

        self.free_head = Some(SlotAddr {
            page: page_index,
            index: 0,
        });
        self.pages.push(page);
        self.capacity += size;
        Ok(())
    }
}
