//! Small hand-built problems for engine unit tests.

use crate::contract::Problem;
use crate::node::Cost;

/// A directed edge `from → to` with a cost.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub cost: Cost,
}

/// Explicit weighted digraph. Positions are vertex indices, moves are edge
/// indices, so `invert` is exact by construction.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    pub edges: Vec<Edge>,
    pub heuristic: Vec<Cost>,
    pub goal: usize,
}

impl WeightedGraph {
    pub fn new(vertex_count: usize, goal: usize, edges: &[(usize, usize, Cost)]) -> Self {
        Self {
            edges: edges
                .iter()
                .map(|&(from, to, cost)| Edge { from, to, cost })
                .collect(),
            heuristic: vec![0.0; vertex_count],
            goal,
        }
    }

    pub fn with_heuristic(mut self, heuristic: &[Cost]) -> Self {
        self.heuristic = heuristic.to_vec();
        self
    }

    /// Sum of edge costs along a move sequence.
    pub fn path_cost(&self, moves: &[usize]) -> Cost {
        moves.iter().map(|&e| self.edges[e].cost).sum()
    }
}

impl Problem for WeightedGraph {
    type Position = usize;
    type Move = usize;

    fn problem_id(&self) -> &str {
        "weighted_graph"
    }

    fn enumerate_moves(&self, position: &usize, out: &mut Vec<usize>) {
        out.extend(
            self.edges
                .iter()
                .enumerate()
                .filter(|(_, e)| e.from == *position)
                .map(|(i, _)| i),
        );
    }

    fn apply(&self, _position: &usize, mv: &usize) -> usize {
        self.edges[*mv].to
    }

    fn invert(&self, _position_after: &usize, mv: &usize) -> usize {
        self.edges[*mv].from
    }

    fn step_cost(&self, _position: &usize, mv: &usize) -> Cost {
        self.edges[*mv].cost
    }

    fn heuristic(&self, position: &usize) -> Cost {
        self.heuristic.get(*position).copied().unwrap_or(0.0)
    }

    fn is_goal(&self, position: &usize) -> bool {
        *position == self.goal
    }
}

/// A graph whose `invert` lies: it always claims the move came from a vertex
/// the search never saw.
#[derive(Debug, Clone)]
pub struct BrokenInvert(pub WeightedGraph);

impl Problem for BrokenInvert {
    type Position = usize;
    type Move = usize;

    fn problem_id(&self) -> &str {
        "broken_invert"
    }

    fn enumerate_moves(&self, position: &usize, out: &mut Vec<usize>) {
        self.0.enumerate_moves(position, out);
    }

    fn apply(&self, position: &usize, mv: &usize) -> usize {
        self.0.apply(position, mv)
    }

    fn invert(&self, _position_after: &usize, _mv: &usize) -> usize {
        usize::MAX
    }

    fn step_cost(&self, position: &usize, mv: &usize) -> Cost {
        self.0.step_cost(position, mv)
    }

    fn heuristic(&self, position: &usize) -> Cost {
        self.0.heuristic(position)
    }

    fn is_goal(&self, position: &usize) -> bool {
        self.0.is_goal(position)
    }
}
