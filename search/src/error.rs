//! Typed search errors.
//!
//! A search that finds no solution is NOT an error: it terminates with
//! [`crate::search::SearchStatus::Exhausted`]. `SearchError` covers
//! configuration problems, storage exhaustion and engine invariant faults.

use slidewise_kernel::pool::PoolError;

/// Failure of a search operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The search policy was rejected before any work was done.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The node pool failed (exhaustion, or a stale handle inside the engine).
    #[error("node pool failure: {0}")]
    Pool(#[from] PoolError),

    /// Path reconstruction hit a position missing from the visited registry,
    /// or walked longer than the registry allows. Indicates a broken engine
    /// invariant or a non-invertible problem contract.
    #[error("solution reconstruction failed: {detail}")]
    Reconstruction { detail: String },
}
