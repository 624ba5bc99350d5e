//! Core search node and frontier key types.

use std::cmp::Ordering;

use slidewise_kernel::pool::Handle;

/// Path and heuristic cost. Must be non-negative and not NaN.
pub type Cost = f64;

/// Handle to a [`SearchNode`] stored in the engine's pool.
pub type NodeHandle<P, M> = Handle<SearchNode<P, M>>;

/// Whether a node is currently in the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Discovered, waiting in the frontier.
    Frontier,
    /// Popped and expanded (or popped as the goal).
    Closed,
}

/// One explored position.
///
/// Exactly one node exists per distinct position known to the engine. The
/// node is mutated in place when a cheaper path to its position is found.
/// There is no parent pointer: the path is rebuilt from `incoming_move` and
/// the problem's `invert`.
#[derive(Debug, Clone)]
pub struct SearchNode<P, M> {
    /// The state this node represents.
    pub position: P,
    /// Move that produced `position` on the cheapest known path (`None` for the source).
    pub incoming_move: Option<M>,
    /// Cheapest known cost from the source.
    pub g_cost: Cost,
    /// Heuristic estimate to the goal, refreshed whenever `g_cost` changes.
    pub h_cost: Cost,
    /// Open/closed state.
    pub membership: Membership,
    /// Registration counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<P, M> SearchNode<P, M> {
    /// `f_cost = g_cost + h_cost`, the frontier priority.
    #[must_use]
    pub fn f_cost(&self) -> Cost {
        self.g_cost + self.h_cost
    }

    /// The node's current frontier ordering key.
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            f_cost: self.f_cost(),
            creation_order: self.creation_order,
        }
    }
}

/// The frontier ordering key: `(f_cost, creation_order)`.
///
/// Lower `f_cost` first, then older `creation_order`. Creation orders are
/// unique, so two live nodes never compare equal.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: Cost,
    pub creation_order: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
