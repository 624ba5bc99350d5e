//! Grid map regression lock.
//!
//! Fixed maps with recorded answers. The exact move sequences pin the
//! tie-breaking rule: among equal `f` costs the earliest-created node is
//! expanded first, and moves are generated left, right, up, down.

use slidewise_harness::runner::run_search;
use slidewise_harness::worlds::{GridMap, GridMove, GridPos};
use slidewise_search::policy::{ReopenPolicy, SearchPolicy};
use slidewise_search::search::SearchStatus;

const L: GridMove = GridMove::LEFT;
const R: GridMove = GridMove::RIGHT;
const U: GridMove = GridMove::UP;
const D: GridMove = GridMove::DOWN;

fn solve(rows: &[&str], from: (i32, i32), to: (i32, i32)) -> Option<Vec<GridMove>> {
    let map = GridMap::from_rows(rows)
        .unwrap()
        .with_target(GridPos::new(to.0, to.1))
        .unwrap();
    let run = run_search(&map, GridPos::new(from.0, from.1), SearchPolicy::default()).unwrap();
    run.moves
}

// ---------------------------------------------------------------------------
// 1. Small maps
// ---------------------------------------------------------------------------

/// Open 3x3 grid, corner to corner: 2 rows + 2 columns.
#[test]
fn open_grid_corner_to_corner() {
    let moves = solve(&["...", "...", "..."], (0, 0), (2, 2)).unwrap();
    assert_eq!(moves, vec![R, R, D, D]);
}

/// A full-width wall row separates source and target.
#[test]
fn full_wall_has_no_solution() {
    assert_eq!(solve(&["...", "XXX", "..."], (0, 0), (2, 2)), None);
}

/// Detour below a single wall cell.
#[test]
fn detour_around_wall() {
    let moves = solve(&[".X.", "...", "X.X"], (0, 0), (2, 0)).unwrap();
    assert_eq!(moves, vec![D, R, R, U]);
}

/// Target cell sealed off by walls on both open sides.
#[test]
fn sealed_target_has_no_solution() {
    assert_eq!(solve(&[".X.", "..X", "X.X"], (0, 0), (2, 0)), None);
}

/// Source equals target: solved with an empty path.
#[test]
fn source_is_target() {
    assert_eq!(solve(&["..", ".."], (1, 1), (1, 1)), Some(vec![]));
}

// ---------------------------------------------------------------------------
// 2. Larger maps
// ---------------------------------------------------------------------------

/// 7x4 map with two wall columns.
#[test]
fn seven_by_four_map() {
    let moves = solve(
        &["....XX.", ".XX.XX.", "...X..X", ".X....."],
        (0, 0),
        (6, 3),
    )
    .unwrap();
    assert_eq!(moves, vec![D, D, R, R, D, R, R, R, R]);
}

/// 8x5 map; spaces are open cells like any non-`X` character.
#[test]
fn eight_by_five_map() {
    let rows = [
        "....XX..",
        ". X...X.",
        ".XX.X.X.",
        "....X.X.",
        "..X.....",
    ];
    let moves = solve(&rows, (0, 2), (6, 0)).unwrap();
    assert_eq!(moves, vec![D, R, R, R, D, R, R, R, R, U, U, U, U, L]);
}

/// Both policies agree on a map whose heuristic is consistent.
#[test]
fn reopen_policy_does_not_change_grid_answers() {
    let map = GridMap::from_rows(&["....XX..", ". X...X.", ".XX.X.X.", "....X.X.", "..X....."])
        .unwrap()
        .with_target(GridPos::new(6, 0))
        .unwrap();
    let from = GridPos::new(0, 2);
    let never = run_search(&map, from, SearchPolicy::default()).unwrap();
    let reopen = run_search(
        &map,
        from,
        SearchPolicy {
            reopen: ReopenPolicy::Reopen,
            ..SearchPolicy::default()
        },
    )
    .unwrap();
    assert_eq!(never.status, SearchStatus::Solved);
    assert_eq!(never.moves, reopen.moves);
    assert_eq!(reopen.stats.reopened, 0);
}
