//! Slidewise Search: deterministic best-first (A*) search over pooled nodes.
//!
//! This crate provides the search layer. It depends only on
//! `slidewise_kernel` (for node storage). It does NOT depend on
//! `slidewise_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! slidewise_kernel  ←  slidewise_search  ←  slidewise_harness
//! (pool, digests)      (frontier, A*)       (worlds, render, CLI)
//! ```
//!
//! # Key types
//!
//! - [`Problem`](contract::Problem) -- capability set a domain must provide
//! - [`AStar`](search::AStar) -- the resumable search driver
//! - [`SearchNode`](node::SearchNode) -- one explored position, stored in the pool
//! - [`BestFirstFrontier`](frontier::BestFirstFrontier) -- ordered open set
//! - [`SearchPolicy`](policy::SearchPolicy) -- reopen policy and pool sizing

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod search;

#[cfg(test)]
pub(crate) mod test_worlds;
