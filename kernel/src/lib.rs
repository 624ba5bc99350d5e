//! Slidewise Kernel: node storage and content digests for the search layer.
//!
//! # API Surface
//!
//! - [`pool::NodePool`] -- paged slab allocator with generation-checked handles
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashes
//!
//! # Module Dependency Direction
//!
//! `pool` and `proof` are independent of each other and of every other
//! workspace crate.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod pool;
pub mod proof;
