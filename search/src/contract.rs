//! Problem contract trait.

use std::fmt::Debug;
use std::hash::Hash;

use crate::node::Cost;

/// The capability set a search domain must implement.
///
/// # Contract
///
/// These are preconditions. The engine does not check them; a domain that
/// breaks one gets an unspecified (possibly wrong or incomplete) result.
///
/// - `enumerate_moves` must be deterministic: same position → same moves in
///   the same order. Reproducible runs depend on it.
/// - `invert` must be an exact left inverse of `apply`:
///   `invert(&apply(p, m), m) == p` for every legal `(p, m)`. Path
///   reconstruction walks backward with it.
/// - `step_cost` and `heuristic` must be non-negative. The reported path is
///   optimal only if `heuristic` never overestimates the remaining cost (and,
///   under the default reopen policy, is also consistent).
pub trait Problem {
    /// A search state. Equality and hashing identify duplicate states.
    type Position: Clone + Eq + Hash + Debug;

    /// A transition between positions.
    type Move: Clone + PartialEq + Debug;

    /// Short identifier used in logs and reports.
    fn problem_id(&self) -> &str;

    /// Append every legal move from `position` to `out`.
    fn enumerate_moves(&self, position: &Self::Position, out: &mut Vec<Self::Move>);

    /// The position reached by taking `mv` from `position`.
    fn apply(&self, position: &Self::Position, mv: &Self::Move) -> Self::Position;

    /// The position `mv` was taken from, given the position it led to.
    fn invert(&self, position_after: &Self::Position, mv: &Self::Move) -> Self::Position;

    /// Incremental cost of taking `mv` from `position`.
    fn step_cost(&self, position: &Self::Position, mv: &Self::Move) -> Cost;

    /// Estimated remaining cost from `position` to the nearest goal.
    fn heuristic(&self, position: &Self::Position) -> Cost;

    /// Whether `position` is a goal.
    fn is_goal(&self, position: &Self::Position) -> bool;
}
