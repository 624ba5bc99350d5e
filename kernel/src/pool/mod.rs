//! Paged slab allocator for fixed-size records.
//!
//! Storage is a list of pages. The first page holds
//! [`PoolConfig::start_page_size`] slots and each later page is
//! [`PoolConfig::grow_rate`] times the size of the one before it. Vacant
//! slots form a LIFO free list whose links live inside the vacant slots
//! themselves, so allocation and release are both O(1) and pages are only
//! returned to the system when the pool is dropped.
//!
//! Slots are addressed through [`Handle`]s that carry a generation counter.
//! Releasing a slot bumps its generation, so a released handle can never
//! observe the record that later reuses the slot.

pub mod config;
pub mod error;
pub mod handle;
pub mod slab;

pub use config::PoolConfig;
pub use error::PoolError;
pub use handle::Handle;
pub use slab::NodePool;
