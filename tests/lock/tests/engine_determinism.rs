//! In-process determinism lock.
//!
//! Proves:
//! - Fresh engines over equal problems produce identical move sequences,
//!   counters and solution digests.
//! - Driving the engine one `step` at a time reaches the same result as
//!   `solve`, and stepping past the end changes nothing.
//! - The JSON report exposes the fields downstream tooling relies on.

use lock_tests::generate::{scrambled_board, seeded};
use slidewise_harness::report::SolutionReport;
use slidewise_harness::runner::run_search;
use slidewise_harness::worlds::{Board, GridMap, GridPos, NPuzzle};
use slidewise_search::policy::SearchPolicy;
use slidewise_search::search::{AStar, SearchStatus};

// ---------------------------------------------------------------------------
// 1. Repeated runs
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_have_equal_digests() {
    let puzzle = NPuzzle::new(3, 3).unwrap();
    let mut rng = seeded(0xd373_0001);
    for _ in 0..5 {
        let board = scrambled_board(&mut rng, &puzzle, 40).unwrap();
        let a = run_search(&puzzle, board.clone(), SearchPolicy::default()).unwrap();
        let b = run_search(&puzzle, board.clone(), SearchPolicy::default()).unwrap();

        assert_eq!(a.moves, b.moves, "{board}");
        assert_eq!(a.stats.expansions, b.stats.expansions);
        assert_eq!(a.stats.generated, b.stats.generated);
        assert_eq!(a.stats.visited, b.stats.visited);
        assert_eq!(SolutionReport::new(&a).digest, SolutionReport::new(&b).digest);
    }
}

/// Boards that differ only in how they were written parse to the same
/// position and give the same answer.
#[test]
fn equal_boards_from_different_notation() {
    let puzzle = NPuzzle::new(3, 3).unwrap();
    let compact = Board::parse("413726580").unwrap();
    let separated = Board::parse("4,1,3,7,2,6,5,8,0").unwrap();
    assert_eq!(compact, separated);

    let a = run_search(&puzzle, compact, SearchPolicy::default()).unwrap();
    let b = run_search(&puzzle, separated, SearchPolicy::default()).unwrap();
    assert_eq!(a.moves, b.moves);
}

// ---------------------------------------------------------------------------
// 2. Stepping
// ---------------------------------------------------------------------------

#[test]
fn stepping_matches_solve() {
    let puzzle = NPuzzle::new(3, 3).unwrap();
    let board = Board::parse("126350478").unwrap();

    let mut solved = AStar::new(&puzzle, board.clone()).unwrap();
    assert_eq!(solved.solve().unwrap(), SearchStatus::Solved);

    let mut stepped = AStar::new(&puzzle, board).unwrap();
    let mut steps = 0_u64;
    while !stepped.step().unwrap() {
        steps += 1;
        assert_eq!(stepped.status(), SearchStatus::Running);
    }
    assert_eq!(steps + 1, stepped.stats().expansions);
    assert_eq!(stepped.solution().unwrap(), solved.solution().unwrap());

    let before = stepped.stats();
    assert!(stepped.step().unwrap());
    assert_eq!(stepped.stats(), before);
}

#[test]
fn exhausted_search_stays_exhausted() {
    let map = GridMap::from_rows(&[".X.", ".X.", ".X."])
        .unwrap()
        .with_target(GridPos::new(2, 0))
        .unwrap();
    let mut astar = AStar::new(&map, GridPos::new(0, 2)).unwrap();
    assert_eq!(astar.solve().unwrap(), SearchStatus::Exhausted);
    assert_eq!(astar.stats().visited, 3);
    assert_eq!(astar.solution().unwrap(), None);
    assert!(astar.step().unwrap());
    assert_eq!(astar.status(), SearchStatus::Exhausted);
}

// ---------------------------------------------------------------------------
// 3. Report shape
// ---------------------------------------------------------------------------

#[test]
fn json_report_fields() {
    let map = GridMap::from_rows(&["...", "...", "..."])
        .unwrap()
        .with_target(GridPos::new(2, 2))
        .unwrap();
    let run = run_search(&map, GridPos::new(0, 0), SearchPolicy::default()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&SolutionReport::new(&run).to_json().unwrap()).unwrap();

    assert_eq!(json["problem"], "grid_map");
    assert_eq!(json["status"], "solved");
    assert_eq!(json["solved"], true);
    assert_eq!(json["moves"], serde_json::json!(["R", "R", "D", "D"]));
    assert_eq!(json["move_count"], 4);
    assert_eq!(json["cost"], 4.0);
    for counter in [
        "expansions",
        "generated",
        "duplicates",
        "relaxed_in_frontier",
        "relaxed_closed",
        "reopened",
        "frontier_high_water",
        "visited",
        "pool_pages",
        "pool_capacity",
    ] {
        assert!(json["stats"][counter].is_u64(), "stats.{counter} missing");
    }
    assert!(json["elapsed_ms"].is_f64());
    assert!(json["digest"].as_str().is_some_and(|d| d.starts_with("sha256:")));
}
