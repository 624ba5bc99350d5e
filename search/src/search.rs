//! The A* driver: frontier, visited registry and node pool.
//!
//! # Step semantics
//!
//! Each [`AStar::step`] pops the lowest `(f_cost, creation_order)` node,
//! closes it, and either concludes (goal popped) or expands it. Every
//! successor is materialised as a candidate node in the pool, then resolved
//! against the visited registry:
//!
//! - unknown position: the candidate is kept and opened;
//! - known and open: a strictly cheaper candidate relaxes the known node in
//!   place (remove-then-reinsert in the frontier); the candidate is released;
//! - known and closed: a strictly cheaper candidate updates the known node
//!   in place. Under [`ReopenPolicy::Never`] it is NOT expanded again, so
//!   its descendants keep the costs they were given. Under
//!   [`ReopenPolicy::Reopen`] it goes back into the frontier. The candidate
//!   is released either way.
//!
//! The search is exhausted when the frontier is empty after an expansion.

use std::collections::HashMap;

use serde::Serialize;
use slidewise_kernel::pool::{NodePool, PoolError};
use tracing::{debug, error, trace};

use crate::contract::Problem;
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::node::{Cost, Membership, NodeHandle, SearchNode};
use crate::policy::{ReopenPolicy, SearchPolicy};

type NodeOf<P> = SearchNode<<P as Problem>::Position, <P as Problem>::Move>;
type HandleOf<P> = NodeHandle<<P as Problem>::Position, <P as Problem>::Move>;

/// Where the search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// More steps are needed.
    Running,
    /// A goal position was popped from the frontier.
    Solved,
    /// The frontier ran dry without reaching a goal.
    Exhausted,
}

impl SearchStatus {
    /// Whether the search has concluded.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Counters describing the work a search has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped from the frontier (including the goal).
    pub expansions: u64,
    /// Candidate successors materialised.
    pub generated: u64,
    /// Candidates whose position was already known.
    pub duplicates: u64,
    /// Open nodes given a cheaper path.
    pub relaxed_in_frontier: u64,
    /// Closed nodes given a cheaper path.
    pub relaxed_closed: u64,
    /// Closed nodes moved back into the frontier.
    pub reopened: u64,
    /// Largest frontier size seen.
    pub frontier_high_water: u64,
    /// Distinct positions registered.
    pub visited: u64,
    /// Pages reserved by the node pool.
    pub pool_pages: u64,
    /// Slots reserved by the node pool.
    pub pool_capacity: u64,
}

/// Resumable best-first search over a [`Problem`].
///
/// The engine borrows the problem for its whole lifetime and exclusively
/// owns every node it creates; dropping the engine drops them all.
pub struct AStar<'p, P: Problem> {
    problem: &'p P,
    policy: SearchPolicy,
    source: P::Position,
    pool: NodePool<NodeOf<P>>,
    frontier: BestFirstFrontier<NodeOf<P>>,
    visited: HashMap<P::Position, HandleOf<P>>,
    moves: Vec<P::Move>,
    found: Option<HandleOf<P>>,
    status: SearchStatus,
    next_creation_order: u64,
    stats: SearchStats,
}

impl<'p, P: Problem> AStar<'p, P> {
    /// Start a search from `source` with the default policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Pool`] if the pool cannot reserve its first page.
    pub fn new(problem: &'p P, source: P::Position) -> Result<Self, SearchError> {
        Self::with_policy(problem, source, SearchPolicy::default())
    }

    /// Start a search from `source` with an explicit policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy is rejected and
    /// [`SearchError::Pool`] if the pool cannot reserve its first page.
    pub fn with_policy(
        problem: &'p P,
        source: P::Position,
        policy: SearchPolicy,
    ) -> Result<Self, SearchError> {
        policy.validate()?;

        let mut pool = NodePool::new(policy.pool)?;
        let mut frontier = BestFirstFrontier::new();
        let mut visited = HashMap::new();

        let root = SearchNode {
            position: source.clone(),
            incoming_move: None,
            g_cost: 0.0,
            h_cost: problem.heuristic(&source),
            membership: Membership::Frontier,
            creation_order: 0,
        };
        let key = root.frontier_key();
        let handle = pool.allocate(root)?;
        frontier.push(key, handle);
        visited.insert(source.clone(), handle);

        debug!(
            problem = problem.problem_id(),
            reopen = ?policy.reopen,
            start_page_size = policy.pool.start_page_size,
            "search started"
        );

        Ok(Self {
            problem,
            policy,
            source,
            pool,
            frontier,
            visited,
            moves: Vec::new(),
            found: None,
            status: SearchStatus::Running,
            next_creation_order: 1,
            stats: SearchStats::default(),
        })
    }

    /// Perform one pop-and-expand unit of work.
    ///
    /// Returns `true` once the search has concluded (solved or exhausted).
    /// Calling `step` after that is a no-op that keeps returning `true`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Pool`] if a candidate node cannot be allocated.
    pub fn step(&mut self) -> Result<bool, SearchError> {
        if self.status.is_terminal() {
            return Ok(true);
        }
        let Some((key, handle)) = self.frontier.pop() else {
            self.finish(SearchStatus::Exhausted);
            return Ok(true);
        };
        self.stats.expansions += 1;

        let node = self.pool.get_mut(handle).ok_or(PoolError::StaleHandle)?;
        node.membership = Membership::Closed;
        if self.problem.is_goal(&node.position) {
            self.found = Some(handle);
            self.finish(SearchStatus::Solved);
            return Ok(true);
        }
        let position = node.position.clone();
        let g_cost = node.g_cost;
        trace!(f_cost = key.f_cost, g_cost, order = key.creation_order, "expand");

        let mut moves = std::mem::take(&mut self.moves);
        moves.clear();
        self.problem.enumerate_moves(&position, &mut moves);
        let expanded = moves
            .iter()
            .try_for_each(|mv| self.resolve_successor(&position, g_cost, mv));
        self.moves = moves;
        expanded?;

        if self.frontier.is_empty() {
            self.finish(SearchStatus::Exhausted);
            return Ok(true);
        }
        Ok(false)
    }

    /// Run [`AStar::step`] until the search concludes.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `step`.
    pub fn solve(&mut self) -> Result<SearchStatus, SearchError> {
        while !self.step()? {}
        Ok(self.status)
    }

    /// The move sequence from the source to the goal that was found.
    ///
    /// Returns `Ok(None)` if no goal has been reached (still running or
    /// exhausted). A source that is itself a goal yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Reconstruction`] if the backward walk reaches a
    /// position missing from the visited registry, or runs longer than the
    /// registry is large. Both mean an engine invariant or the problem's
    /// `invert` contract is broken.
    pub fn solution(&self) -> Result<Option<Vec<P::Move>>, SearchError> {
        let Some(goal) = self.found else {
            return Ok(None);
        };
        let mut current = self
            .pool
            .get(goal)
            .ok_or(PoolError::StaleHandle)?
            .position
            .clone();

        let mut moves = Vec::new();
        while current != self.source {
            if moves.len() >= self.visited.len() {
                error!(steps = moves.len(), "reconstruction did not reach the source");
                return Err(SearchError::Reconstruction {
                    detail: format!(
                        "walked {} moves without reaching the source ({} positions registered)",
                        moves.len(),
                        self.visited.len()
                    ),
                });
            }
            let Some(&handle) = self.visited.get(&current) else {
                error!(position = ?current, "reconstruction left the visited registry");
                return Err(SearchError::Reconstruction {
                    detail: format!("position {current:?} is not in the visited registry"),
                });
            };
            let node = self.pool.get(handle).ok_or(PoolError::StaleHandle)?;
            let Some(mv) = node.incoming_move.as_ref() else {
                return Err(SearchError::Reconstruction {
                    detail: format!("position {current:?} has no incoming move"),
                });
            };
            current = self.problem.invert(&current, mv);
            moves.push(mv.clone());
        }
        moves.reverse();
        Ok(Some(moves))
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Work counters, including current pool and registry sizes.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.frontier.high_water(),
            visited: self.visited.len() as u64,
            pool_pages: self.pool.page_count() as u64,
            pool_capacity: self.pool.capacity() as u64,
            ..self.stats
        }
    }

    /// The goal position that was reached, if any.
    #[must_use]
    pub fn found_goal(&self) -> Option<&P::Position> {
        self.found
            .and_then(|h| self.pool.get(h))
            .map(|node| &node.position)
    }

    /// Cost recorded on the goal node, if a goal was reached.
    ///
    /// Under [`ReopenPolicy::Never`] with an inconsistent heuristic this can
    /// exceed the cost of the path [`AStar::solution`] returns.
    #[must_use]
    pub fn solution_cost(&self) -> Option<Cost> {
        self.found
            .and_then(|h| self.pool.get(h))
            .map(|node| node.g_cost)
    }

    /// Number of open nodes.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of distinct positions registered.
    #[must_use]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// The node registered for `position`, if any.
    #[must_use]
    pub fn node(&self, position: &P::Position) -> Option<&NodeOf<P>> {
        self.visited.get(position).and_then(|&h| self.pool.get(h))
    }

    /// The node pool.
    #[must_use]
    pub fn pool(&self) -> &NodePool<NodeOf<P>> {
        &self.pool
    }

    /// The source position.
    #[must_use]
    pub fn source(&self) -> &P::Position {
        &self.source
    }

    /// The problem being searched.
    #[must_use]
    pub fn problem(&self) -> &'p P {
        self.problem
    }

    /// The policy in effect.
    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    fn resolve_successor(
        &mut self,
        parent: &P::Position,
        parent_g: Cost,
        mv: &P::Move,
    ) -> Result<(), SearchError> {
        let candidate = self.pool.allocate(SearchNode {
            position: self.problem.apply(parent, mv),
            incoming_move: Some(mv.clone()),
            g_cost: parent_g + self.problem.step_cost(parent, mv),
            h_cost: 0.0,
            membership: Membership::Frontier,
            creation_order: self.next_creation_order,
        })?;
        self.stats.generated += 1;

        let node = self.pool.get_mut(candidate).ok_or(PoolError::StaleHandle)?;
        let known = self.visited.get(&node.position).copied();
        let Some(known) = known else {
            node.h_cost = self.problem.heuristic(&node.position);
            let key = node.frontier_key();
            let position = node.position.clone();
            self.next_creation_order += 1;
            self.frontier.push(key, candidate);
            self.visited.insert(position, candidate);
            return Ok(());
        };

        self.stats.duplicates += 1;
        let SearchNode {
            g_cost,
            incoming_move,
            ..
        } = self.pool.release(candidate)?;

        let node = self.pool.get_mut(known).ok_or(PoolError::StaleHandle)?;
        if g_cost >= node.g_cost {
            return Ok(());
        }
        let old_key = node.frontier_key();
        node.g_cost = g_cost;
        node.h_cost = self.problem.heuristic(&node.position);
        node.incoming_move = incoming_move;
        let new_key = node.frontier_key();

        match node.membership {
            Membership::Frontier => {
                let removed = self.frontier.remove(old_key);
                debug_assert!(removed.is_some(), "open node missing from frontier");
                self.frontier.push(new_key, known);
                self.stats.relaxed_in_frontier += 1;
            }
            Membership::Closed => {
                self.stats.relaxed_closed += 1;
                if self.policy.reopen == ReopenPolicy::Reopen {
                    node.membership = Membership::Frontier;
                    self.frontier.push(new_key, known);
                    self.stats.reopened += 1;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        let stats = self.stats();
        debug!(
            problem = self.problem.problem_id(),
            ?status,
            expansions = stats.expansions,
            generated = stats.generated,
            visited = stats.visited,
            frontier_high_water = stats.frontier_high_water,
            pool_pages = stats.pool_pages,
            "search concluded"
        );
    }
}
