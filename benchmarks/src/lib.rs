//! Shared fixtures for the slidewise benchmark suites.

use slidewise_harness::worlds::{Board, GridMap, GridPos, NPuzzle, SlidingBlockPuzzle};

/// 8-puzzle boards by optimal solution length.
pub const EIGHT_PUZZLE_BOARDS: &[(&str, usize)] = &[
    ("126350478", 13),
    ("302651478", 21),
    ("874320651", 25),
    ("876543210", 30),
];

/// Nine-piece sliding-block layout with a 13-move recorded solution.
pub const YANK_LAYOUT: &str = "24600\n88611\n7..53\n\n..65.\n42600\n88311\n";

/// The 3x3 puzzle and a parsed board.
///
/// # Panics
///
/// Panics if `cells` is not a 3x3 board. Benchmark setup failures are fatal.
#[must_use]
pub fn eight_puzzle(cells: &str) -> (NPuzzle, Board) {
    let board = Board::parse(cells).expect("benchmark board parses");
    let puzzle = NPuzzle::for_board(3, &board).expect("benchmark board is 3x3");
    (puzzle, board)
}

/// An open `side` x `side` map with a wall column in the middle that has a
/// single gap at the bottom, target in the top-right corner.
///
/// # Panics
///
/// Panics if `side < 3`.
#[must_use]
pub fn walled_grid(side: usize) -> (GridMap, GridPos) {
    assert!(side >= 3, "grid side must be at least 3");
    let wall = side / 2;
    let text: String = (0..side * side)
        .map(|i| {
            let (x, y) = (i % side, i / side);
            if x == wall && y + 1 < side {
                'X'
            } else {
                '.'
            }
        })
        .collect();
    let corner = i32::try_from(side - 1).expect("grid side fits in i32");
    let map = GridMap::parse(side, &text)
        .and_then(|map| map.with_target(GridPos::new(corner, 0)))
        .expect("benchmark grid parses");
    (map, GridPos::new(0, 0))
}

/// The parsed [`YANK_LAYOUT`].
///
/// # Panics
///
/// Panics if the layout fails to parse.
#[must_use]
pub fn yank() -> SlidingBlockPuzzle {
    SlidingBlockPuzzle::parse(YANK_LAYOUT).expect("yank layout parses")
}
