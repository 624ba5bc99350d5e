//! Search policy types.

use slidewise_kernel::pool::PoolConfig;

use crate::error::SearchError;

/// What to do when a cheaper path reaches a node that was already expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReopenPolicy {
    /// Update the closed node's cost and incoming move in place, but do not
    /// expand it again. Optimal only under a consistent heuristic; with an
    /// inconsistent or inadmissible heuristic the costs recorded for its
    /// descendants can stay stale and the reported path can be suboptimal.
    #[default]
    Never,
    /// Move the improved node back into the frontier so it is re-expanded.
    Reopen,
}

/// Search configuration: reopen policy and node-pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SearchPolicy {
    /// Handling of improved paths to closed nodes.
    pub reopen: ReopenPolicy,
    /// Page sizing of the node pool.
    pub pool: PoolConfig,
}

impl SearchPolicy {
    /// Validate the policy before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the pool configuration is
    /// unusable.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.pool
            .validate()
            .map_err(|err| SearchError::InvalidPolicy {
                detail: err.to_string(),
            })
    }
}
