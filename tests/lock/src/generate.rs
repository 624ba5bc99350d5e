//! Seeded instance generators.
//!
//! Every generator takes the RNG by reference so one seed drives a whole
//! test and failures reproduce exactly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use slidewise_harness::worlds::{Board, BoardError, GridError, GridMap, GridPos, NPuzzle};
use slidewise_search::contract::Problem;

/// Deterministic RNG for `seed`.
#[must_use]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A `width` x `height` map where each cell is a wall with probability
/// `wall_chance` (clamped to `0.0..=1.0`). The target is left at `(0,0)`.
///
/// # Errors
///
/// Returns [`GridError`] if either dimension is zero.
pub fn random_grid(
    rng: &mut StdRng,
    width: usize,
    height: usize,
    wall_chance: f64,
) -> Result<GridMap, GridError> {
    let chance = wall_chance.clamp(0.0, 1.0);
    let text: String = (0..width * height)
        .map(|_| if rng.gen_bool(chance) { 'X' } else { '.' })
        .collect();
    GridMap::parse(width, &text)
}

/// A uniformly chosen open cell, or `None` on a fully walled map.
pub fn random_open_cell(rng: &mut StdRng, map: &GridMap) -> Option<GridPos> {
    let open: Vec<GridPos> = (0..map.height())
        .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
        .filter_map(|(x, y)| Some(GridPos::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?)))
        .filter(|&pos| map.is_open(pos))
        .collect();
    open.choose(rng).copied()
}

/// The solved board after `steps` uniformly random blank moves.
///
/// Walking from the solved board keeps the result solvable.
///
/// # Errors
///
/// Propagates [`BoardError`] from building the solved board.
pub fn scrambled_board(rng: &mut StdRng, puzzle: &NPuzzle, steps: usize) -> Result<Board, BoardError> {
    let mut board = puzzle.solved_board()?;
    let mut moves = Vec::new();
    for _ in 0..steps {
        moves.clear();
        puzzle.enumerate_moves(&board, &mut moves);
        if let Some(mv) = moves.choose(rng) {
            board = puzzle.apply(&board, mv);
        }
    }
    Ok(board)
}
