//! Proof module: domain-separated content hashing for reproducibility checks.

pub mod hash;
