//! Node pool lock: allocation, reuse and teardown through the public API.
//!
//! Proves:
//! - Pages grow geometrically from `(start_page_size, grow_rate)`.
//! - A released slot is reused before the pool grows, and the reused slot
//!   never aliases a live handle.
//! - Stale handles are rejected by every accessor.
//! - Dropping the pool drops each outstanding value exactly once.
//! - The engine's answers do not depend on pool sizing.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use slidewise_harness::runner::run_search;
use slidewise_harness::worlds::{Board, NPuzzle};
use slidewise_kernel::pool::{NodePool, PoolConfig, PoolError};
use slidewise_search::policy::SearchPolicy;

fn doubling() -> PoolConfig {
    PoolConfig {
        start_page_size: 1,
        grow_rate: 2.0,
    }
}

// ---------------------------------------------------------------------------
// 1. Growth and reuse
// ---------------------------------------------------------------------------

/// Four allocations into pages of 1, 2 and 4 slots.
#[test]
fn four_allocations_span_three_pages() {
    let mut pool = NodePool::new(doubling()).unwrap();
    let handles: Vec<_> = (0..4).map(|i| pool.allocate(i).unwrap()).collect();

    assert!(pool.page_count() >= 3);
    assert_eq!(pool.page_sizes().collect::<Vec<_>>(), vec![1, 2, 4]);
    assert_eq!(pool.capacity(), 7);
    assert_eq!(pool.live(), 4);

    let slots: HashSet<_> = handles.iter().map(|h| (h.page(), h.index())).collect();
    assert_eq!(slots.len(), 4, "no two live handles share a slot");
    for (i, handle) in handles.iter().enumerate() {
        assert_eq!(pool.get(*handle), Some(&i));
    }
}

#[test]
fn release_then_allocate_reuses_without_aliasing() {
    let mut pool = NodePool::new(doubling()).unwrap();
    let a = pool.allocate("a").unwrap();
    let b = pool.allocate("b").unwrap();
    let pages = pool.page_count();

    assert_eq!(pool.release(a), Ok("a"));
    let c = pool.allocate("c").unwrap();

    assert_eq!(pool.page_count(), pages, "freed slot reused before growing");
    assert!(c.same_slot(&a));
    assert_ne!(c, a);
    assert_eq!(pool.get(b), Some(&"b"));
    assert_eq!(pool.get(c), Some(&"c"));
}

#[test]
fn stale_handles_are_rejected() {
    let mut pool = NodePool::new(doubling()).unwrap();
    let a = pool.allocate(1_u32).unwrap();
    pool.release(a).unwrap();
    let _reuse = pool.allocate(2_u32).unwrap();

    assert_eq!(pool.get(a), None);
    assert_eq!(pool.get_mut(a), None);
    assert!(!pool.contains(a));
    assert_eq!(pool.release(a), Err(PoolError::StaleHandle));
}

#[test]
fn churn_keeps_live_count_and_capacity_bounded() {
    let mut pool = NodePool::new(doubling()).unwrap();
    let mut live = Vec::new();
    for round in 0..200_u32 {
        live.push(pool.allocate(round).unwrap());
        if round % 3 == 2 {
            let handle = live.remove(0);
            pool.release(handle).unwrap();
            let handle = live.remove(0);
            pool.release(handle).unwrap();
        }
    }
    assert_eq!(pool.live(), live.len());
    assert!(pool.capacity() < 2 * live.len() + 2);
    for handle in &live {
        assert!(pool.contains(*handle));
    }
}

// ---------------------------------------------------------------------------
// 2. Teardown
// ---------------------------------------------------------------------------

struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn teardown_drops_each_outstanding_value_once() {
    let drops = Rc::new(Cell::new(0));
    let mut pool = NodePool::new(doubling()).unwrap();
    let handles: Vec<_> = (0..10)
        .map(|_| pool.allocate(DropCounter(Rc::clone(&drops))).unwrap())
        .collect();

    drop(pool.release(handles[3]).unwrap());
    drop(pool.release(handles[7]).unwrap());
    assert_eq!(drops.get(), 2);

    drop(pool);
    assert_eq!(drops.get(), 10);
}

// ---------------------------------------------------------------------------
// 3. Engine independence from sizing
// ---------------------------------------------------------------------------

/// A one-slot first page forces many page additions during the search.
#[test]
fn search_result_independent_of_pool_sizing() {
    let board = Board::parse("302651478").unwrap();
    let puzzle = NPuzzle::for_board(3, &board).unwrap();

    let default = run_search(&puzzle, board.clone(), SearchPolicy::default()).unwrap();
    let tiny = run_search(
        &puzzle,
        board,
        SearchPolicy {
            pool: doubling(),
            ..SearchPolicy::default()
        },
    )
    .unwrap();

    assert_eq!(default.moves, tiny.moves);
    assert_eq!(default.stats.expansions, tiny.stats.expansions);
    assert!(tiny.stats.pool_pages > default.stats.pool_pages);
}
