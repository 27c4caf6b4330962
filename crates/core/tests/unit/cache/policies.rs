//! Cache Replacement Policy Tests.
//!
//! Verifies victim selection for LRU and FIFO in isolation. Sets are built by
//! hand so each test controls validity and both timestamps exactly.

use csim_core::cache::policies::{FifoPolicy, LruPolicy, ReplacementPolicy};
use csim_core::cache::{Block, CacheSet, Clock, Victim};

fn valid(tag: u32, arrival_time: u32, last_access_time: u32) -> Block {
    Block {
        valid: true,
        dirty: false,
        tag,
        arrival_time,
        last_access_time,
    }
}

// ══════════════════════════════════════════════════════════
// 1. Empty slots win
// ══════════════════════════════════════════════════════════

/// A fresh set always yields way 0, under either policy.
#[test]
fn empty_set_victim_is_first_way() {
    let set = CacheSet::new(4);
    assert_eq!(LruPolicy.select_victim(&set), Victim::Vacant(0));
    assert_eq!(FifoPolicy.select_victim(&set), Victim::Vacant(0));
}

/// The first invalid way is chosen even when a valid block is older.
#[test]
fn invalid_block_beats_any_valid_block() {
    let set = CacheSet::from_blocks(vec![
        valid(1, 0, 0),
        Block::default(),
        valid(2, 5, 5),
        Block::default(),
    ]);
    assert_eq!(LruPolicy.select_victim(&set), Victim::Vacant(1));
    assert_eq!(FifoPolicy.select_victim(&set), Victim::Vacant(1));
}

/// Stale timestamps on an invalid block do not matter.
#[test]
fn invalid_block_timestamps_are_ignored() {
    let stale = Block {
        valid: false,
        tag: 9,
        arrival_time: 1_000,
        last_access_time: 1_000,
        ..Block::default()
    };
    let set = CacheSet::from_blocks(vec![valid(1, 0, 0), stale]);
    assert_eq!(LruPolicy.select_victim(&set), Victim::Vacant(1));
}

// ══════════════════════════════════════════════════════════
// 2. LRU
// ══════════════════════════════════════════════════════════

#[test]
fn lru_picks_smallest_last_access() {
    let set = CacheSet::from_blocks(vec![
        valid(1, 0, 7),
        valid(2, 1, 3),
        valid(3, 2, 9),
        valid(4, 3, 4),
    ]);
    assert_eq!(LruPolicy.select_victim(&set), Victim::Occupied(1));
}

#[test]
fn lru_ties_go_to_lowest_way() {
    let set = CacheSet::from_blocks(vec![valid(1, 0, 5), valid(2, 1, 2), valid(3, 2, 2)]);
    assert_eq!(LruPolicy.select_victim(&set), Victim::Occupied(1));
}

#[test]
fn lru_hit_stamps_block_and_advances_clock() {
    let mut block = valid(1, 0, 0);
    let mut clock = Clock::new(10);
    LruPolicy.on_hit(&mut block, &mut clock);
    assert_eq!(block.last_access_time, 10);
    assert_eq!(block.arrival_time, 0, "arrival time is install-only");
    assert_eq!(clock.now(), 11);
}

// ══════════════════════════════════════════════════════════
// 3. FIFO
// ══════════════════════════════════════════════════════════

/// FIFO looks only at arrival time, even when recency says otherwise.
#[test]
fn fifo_picks_smallest_arrival() {
    let set = CacheSet::from_blocks(vec![
        valid(1, 4, 0),
        valid(2, 1, 50),
        valid(3, 2, 1),
    ]);
    assert_eq!(FifoPolicy.select_victim(&set), Victim::Occupied(1));
    assert_eq!(LruPolicy.select_victim(&set), Victim::Occupied(0));
}

#[test]
fn fifo_ties_go_to_lowest_way() {
    let set = CacheSet::from_blocks(vec![valid(1, 3, 0), valid(2, 3, 0)]);
    assert_eq!(FifoPolicy.select_victim(&set), Victim::Occupied(0));
}

#[test]
fn fifo_hit_changes_nothing() {
    let mut block = valid(1, 2, 2);
    let mut clock = Clock::new(10);
    FifoPolicy.on_hit(&mut block, &mut clock);
    assert_eq!(block, valid(1, 2, 2));
    assert_eq!(clock.now(), 10);
}

#[test]
fn single_way_set_always_evicts_way_zero() {
    let set = CacheSet::from_blocks(vec![valid(1, 8, 8)]);
    assert_eq!(LruPolicy.select_victim(&set), Victim::Occupied(0));
    assert_eq!(FifoPolicy.select_victim(&set), Victim::Occupied(0));
}
