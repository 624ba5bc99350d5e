//! Typed pool errors.

/// Failure of a [`super::NodePool`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The pool configuration is unusable.
    #[error("invalid pool configuration: {detail}")]
    InvalidConfig { detail: String },

    /// A new page could not be reserved. Fatal for the caller.
    #[error("node pool exhausted: could not reserve a page of {requested_slots} slots")]
    Exhausted { requested_slots: usize },

    /// The handle refers to a slot that was released (and possibly reused).
    #[error("stale pool handle: slot was released")]
    StaleHandle,
}
