//! Sliding-block regression lock.
//!
//! The "yank" layout: nine pieces on a 5x3 board, eight of them with a
//! target box. The sliding-block heuristic is not admissible, so these
//! tests pin the recorded answer rather than claim it is shortest.
//!
//! Proves:
//! - The recorded 13-move solution and its expansion count.
//! - The solution replays from the source to a goal.
//! - Repeated runs and both reopen policies give the same moves.
//! - Layout digests ignore trailing blank lines.
//! - The SVG walkthrough has one frame per position.

use slidewise_harness::render::svg::{render_solution, SvgOptions};
use slidewise_harness::report::SolutionReport;
use slidewise_harness::runner::{replay, run_search};
use slidewise_harness::worlds::{format_moves, SlidingBlockPuzzle};
use slidewise_search::policy::{ReopenPolicy, SearchPolicy};

const YANK: &str = "24600\n88611\n7..53\n\n..65.\n42600\n88311\n";

const YANK_SOLUTION: &str = "7R2,8D,4LD,6L,7U2,5LU,3L2,1D,0D,7R2,5RU,6R,2RD";

fn yank() -> SlidingBlockPuzzle {
    SlidingBlockPuzzle::parse(YANK).unwrap()
}

// ---------------------------------------------------------------------------
// 1. Recorded solution
// ---------------------------------------------------------------------------

#[test]
fn yank_recorded_solution() {
    let puzzle = yank();
    let run = run_search(&puzzle, puzzle.source(), SearchPolicy::default()).unwrap();
    let moves = run.moves.unwrap();
    assert_eq!(format_moves(&moves), YANK_SOLUTION);
    assert_eq!(moves.len(), 13);
    assert_eq!(run.stats.expansions, 119);
    assert_eq!(run.stats.visited, 184);
}

#[test]
fn yank_solution_replays() {
    let puzzle = yank();
    let run = run_search(&puzzle, puzzle.source(), SearchPolicy::default()).unwrap();
    let moves = run.moves.unwrap();
    let cost = replay(&puzzle, puzzle.source(), &moves).unwrap();
    assert!((cost - 13.0).abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// 2. Determinism
// ---------------------------------------------------------------------------

/// Two runs over separately parsed puzzles produce identical digests.
#[test]
fn yank_is_deterministic() {
    let first = yank();
    let second = yank();
    let a = run_search(&first, first.source(), SearchPolicy::default()).unwrap();
    let b = run_search(&second, second.source(), SearchPolicy::default()).unwrap();
    assert_eq!(a.moves, b.moves);
    assert_eq!(a.stats.expansions, b.stats.expansions);

    let report_a = SolutionReport::new(&a).with_layout_digest(&first.layout_digest());
    let report_b = SolutionReport::new(&b).with_layout_digest(&second.layout_digest());
    assert_eq!(report_a.digest, report_b.digest);
    assert_eq!(report_a.layout_digest, report_b.layout_digest);
}

#[test]
fn yank_same_answer_with_reopen() {
    let puzzle = yank();
    let run = run_search(
        &puzzle,
        puzzle.source(),
        SearchPolicy {
            reopen: ReopenPolicy::Reopen,
            ..SearchPolicy::default()
        },
    )
    .unwrap();
    assert_eq!(format_moves(&run.moves.unwrap()), YANK_SOLUTION);
    assert_eq!(run.stats.expansions, 119);
}

#[test]
fn layout_digest_ignores_trailing_blank_lines() {
    let plain = SlidingBlockPuzzle::parse(YANK.trim_end()).unwrap();
    let padded = SlidingBlockPuzzle::parse(&format!("{YANK}\n\n")).unwrap();
    assert_eq!(plain.layout_digest(), yank().layout_digest());
    assert_eq!(padded.layout_digest(), yank().layout_digest());

    let moved = SlidingBlockPuzzle::parse("24600\n88611\n7.5.3\n").unwrap();
    assert_ne!(moved.layout_digest(), yank().layout_digest());
}

// ---------------------------------------------------------------------------
// 3. Rendering
// ---------------------------------------------------------------------------

/// Fourteen frames of nine pieces, plus one ghost outline per move.
#[test]
fn yank_walkthrough_frames() {
    let puzzle = yank();
    let run = run_search(&puzzle, puzzle.source(), SearchPolicy::default()).unwrap();
    let moves = run.moves.unwrap();
    let svg = render_solution(&puzzle, &puzzle.source(), &moves, &SvgOptions::default()).unwrap();
    assert_eq!(svg.matches("<title>Piece:").count(), 9 * 14 + 13);
    assert!(svg.contains("13: 2RD"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

/// Layout files load from disk the same as from text.
#[test]
fn yank_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yank.txt");
    std::fs::write(&path, YANK).unwrap();
    let puzzle = SlidingBlockPuzzle::from_path(&path).unwrap();
    assert_eq!(puzzle.layout_digest(), yank().layout_digest());
    assert_eq!(puzzle.pieces().len(), 9);
}
