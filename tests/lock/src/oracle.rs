//! Breadth-first distance oracle.
//!
//! Independent of the A* engine: it shares only the [`Problem`] contract,
//! so agreement between the two is evidence of optimality rather than of a
//! shared bug.

use std::collections::{HashSet, VecDeque};

use slidewise_search::contract::Problem;

/// Fewest moves from `source` to any goal, ignoring step costs and the
/// heuristic. `None` if no goal is reachable.
///
/// Explores the whole reachable space in the worst case, so keep it to
/// small instances.
pub fn bfs_distance<P: Problem>(problem: &P, source: P::Position) -> Option<usize> {
    if problem.is_goal(&source) {
        return Some(0);
    }
    let mut seen = HashSet::new();
    seen.insert(source.clone());
    let mut queue = VecDeque::from([(source, 0_usize)]);
    let mut moves = Vec::new();

    while let Some((position, depth)) = queue.pop_front() {
        moves.clear();
        problem.enumerate_moves(&position, &mut moves);
        for mv in &moves {
            let next = problem.apply(&position, mv);
            if problem.is_goal(&next) {
                return Some(depth + 1);
            }
            if seen.insert(next.clone()) {
                queue.push_back((next, depth + 1));
            }
        }
    }
    None
}

/// Number of positions reachable from `source`, including itself.
pub fn reachable_count<P: Problem>(problem: &P, source: P::Position) -> usize {
    let mut seen = HashSet::new();
    seen.insert(source.clone());
    let mut queue = VecDeque::from([source]);
    let mut moves = Vec::new();

    while let Some(position) = queue.pop_front() {
        moves.clear();
        problem.enumerate_moves(&position, &mut moves);
        for mv in &moves {
            let next = problem.apply(&position, mv);
            if seen.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}
