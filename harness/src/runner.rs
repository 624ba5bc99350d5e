//! Harness runner: drives a problem through the search engine.
//!
//! # Pipeline
//!
//! ```text
//! AStar::with_policy() → solve() → solution()
//!   → replay moves from the source (re-derive cost, confirm goal)
//!   → SearchRun
//! ```
//!
//! The runner uses only the public engine API. It does not implement any
//! search logic itself.

use std::time::{Duration, Instant};

use slidewise_search::contract::Problem;
use slidewise_search::error::SearchError;
use slidewise_search::node::Cost;
use slidewise_search::policy::SearchPolicy;
use slidewise_search::search::{AStar, SearchStats, SearchStatus};
use tracing::{info, warn};

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The engine failed.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// The reconstructed moves do not lead from the source to a goal.
    #[error("solution does not replay: {detail}")]
    Replay { detail: String },
    /// A report could not be serialised.
    #[error("cannot serialise report")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of one search.
#[derive(Debug, Clone)]
pub struct SearchRun<M> {
    /// Problem identifier.
    pub problem_id: String,
    /// Final engine status.
    pub status: SearchStatus,
    /// Moves from source to goal; `None` when no goal was reached.
    pub moves: Option<Vec<M>>,
    /// Summed step costs along `moves`.
    pub cost: Option<Cost>,
    /// Engine counters at the end of the search.
    pub stats: SearchStats,
    /// Wall-clock time spent searching and reconstructing.
    pub elapsed: Duration,
}

impl<M> SearchRun<M> {
    /// Whether a solution was found.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.moves.is_some()
    }
}

/// Solve `problem` from `source` under `policy`.
///
/// The returned moves are replayed from `source` before they are handed
/// back; the reported cost is the cost of that replay.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the engine fails and [`RunError::Replay`]
/// if the reconstructed path does not end in a goal.
pub fn run_search<P: Problem>(
    problem: &P,
    source: P::Position,
    policy: SearchPolicy,
) -> Result<SearchRun<P::Move>, RunError> {
    let started = Instant::now();
    let mut astar = AStar::with_policy(problem, source.clone(), policy)?;
    let status = astar.solve()?;
    let moves = astar.solution()?;
    let elapsed = started.elapsed();
    let stats = astar.stats();

    let cost = match &moves {
        Some(moves) => Some(replay(problem, source, moves)?),
        None => None,
    };
    if let (Some(replayed), Some(recorded)) = (cost, astar.solution_cost()) {
        if replayed < recorded {
            warn!(
                replayed,
                recorded,
                "goal cost is stale; a closed node was improved without reopening"
            );
        }
    }

    info!(
        problem = problem.problem_id(),
        ?status,
        moves = moves.as_ref().map_or(0, Vec::len),
        expansions = stats.expansions,
        visited = stats.visited,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "search finished"
    );

    Ok(SearchRun {
        problem_id: problem.problem_id().to_string(),
        status,
        moves,
        cost,
        stats,
        elapsed,
    })
}

/// Apply `moves` from `source`, checking each is offered and the last
/// position is a goal. Returns the summed step cost.
///
/// # Errors
///
/// Returns [`RunError::Replay`] on an unavailable move or a non-goal end.
pub fn replay<P: Problem>(problem: &P, source: P::Position, moves: &[P::Move]) -> Result<Cost, RunError> {
    let mut position = source;
    let mut offered = Vec::new();
    let mut cost = 0.0;
    for (i, mv) in moves.iter().enumerate() {
        offered.clear();
        problem.enumerate_moves(&position, &mut offered);
        if !offered.contains(mv) {
            return Err(RunError::Replay {
                detail: format!("move {i} ({mv:?}) is not available at {position:?}"),
            });
        }
        cost += problem.step_cost(&position, mv);
        position = problem.apply(&position, mv);
    }
    if !problem.is_goal(&position) {
        return Err(RunError::Replay {
            detail: format!("final position {position:?} is not a goal"),
        });
    }
    Ok(cost)
}
