//! Shared helpers for the lock tests.
//!
//! - [`oracle`] -- breadth-first distances for unit-cost problems
//! - [`generate`] -- seeded random grids and scrambled boards

pub mod generate;
pub mod oracle;
