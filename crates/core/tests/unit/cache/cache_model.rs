//! Cache Model (CacheModel) Unit Tests.
//!
//! Exercises the primitive steps the simulator composes: lookup, touch,
//! victim selection, install, and dirty bookkeeping. The model is built
//! directly from a `CacheConfig`; costs are not involved here.

use csim_core::cache::{Block, CacheModel, Clock, Evicted, Victim};
use csim_core::config::{AllocatePolicy, ReplacementPolicy, WritePolicy};

use crate::common::config;

fn model(
    num_sets: u32,
    num_blocks: u32,
    write: WritePolicy,
    policy: ReplacementPolicy,
) -> CacheModel {
    CacheModel::new(&config(
        num_sets,
        num_blocks,
        16,
        AllocatePolicy::WriteAllocate,
        write,
        policy,
    ))
}

#[test]
fn new_cache_is_empty_and_sized() {
    let cache = model(8, 4, WritePolicy::WriteBack, ReplacementPolicy::Lru);
    assert_eq!(cache.num_sets(), 8);
    assert_eq!(cache.set(7).blocks().len(), 4);
    assert_eq!(cache.resident_blocks(), 0);
    assert!(cache.set(0).blocks().iter().all(|b| *b == Block::default()));
    assert_eq!(cache.block(8, 0), None);
    assert_eq!(cache.block(0, 4), None);
}

#[test]
fn install_stamps_both_timestamps_and_ticks() {
    let mut cache = model(2, 2, WritePolicy::WriteBack, ReplacementPolicy::Lru);
    let mut clock = Clock::new(5);

    assert_eq!(cache.install(1, 0, 0xAB, &mut clock), None);
    assert_eq!(clock.now(), 6);
    assert_eq!(
        cache.block(1, 0),
        Some(&Block {
            valid: true,
            dirty: false,
            tag: 0xAB,
            arrival_time: 5,
            last_access_time: 5,
        })
    );
    assert_eq!(cache.lookup(1, 0xAB), Some(0));
    assert_eq!(cache.lookup(0, 0xAB), None, "other sets are unaffected");
}

#[test]
fn install_over_valid_block_reports_eviction_and_clears_dirty() {
    let mut cache = model(1, 1, WritePolicy::WriteBack, ReplacementPolicy::Lru);
    let mut clock = Clock::default();

    let _ = cache.install(0, 0, 1, &mut clock);
    cache.mark_dirty(0, 0);
    assert_eq!(cache.select_victim(0), Victim::Occupied(0));

    let evicted = cache.install(0, 0, 2, &mut clock);
    assert_eq!(
        evicted,
        Some(Evicted {
            tag: 1,
            dirty: true
        })
    );
    let block = cache.block(0, 0).unwrap();
    assert_eq!(block.tag, 2);
    assert!(!block.dirty);
}

#[test]
fn needs_flush_only_for_dirty_victims_under_write_back() {
    let mut wb = model(1, 1, WritePolicy::WriteBack, ReplacementPolicy::Lru);
    let mut clock = Clock::default();
    assert!(!wb.needs_flush(0, Victim::Vacant(0)), "empty slot");

    let _ = wb.install(0, 0, 1, &mut clock);
    assert!(!wb.needs_flush(0, Victim::Occupied(0)), "clean block");

    wb.mark_dirty(0, 0);
    assert!(wb.needs_flush(0, Victim::Occupied(0)));

    wb.mark_clean(0, 0);
    assert!(!wb.needs_flush(0, Victim::Occupied(0)));

    let mut wt = model(1, 1, WritePolicy::WriteThrough, ReplacementPolicy::Lru);
    let _ = wt.install(0, 0, 1, &mut clock);
    wt.mark_dirty(0, 0);
    assert!(
        !wt.needs_flush(0, Victim::Occupied(0)),
        "write-through never flushes on eviction"
    );
}

#[test]
fn touch_follows_configured_policy() {
    let mut lru = model(1, 2, WritePolicy::WriteBack, ReplacementPolicy::Lru);
    let mut fifo = model(1, 2, WritePolicy::WriteBack, ReplacementPolicy::Fifo);
    let mut lru_clock = Clock::default();
    let mut fifo_clock = Clock::default();

    for (cache, clock) in [(&mut lru, &mut lru_clock), (&mut fifo, &mut fifo_clock)] {
        let _ = cache.install(0, 0, 10, clock);
        let _ = cache.install(0, 1, 11, clock);
        cache.touch(0, 0, clock);
    }

    // LRU: way 0 was refreshed, so way 1 is now the oldest.
    assert_eq!(lru.select_victim(0), Victim::Occupied(1));
    assert_eq!(lru_clock.now(), 3);
    // FIFO: the hit is ignored, way 0 arrived first.
    assert_eq!(fifo.select_victim(0), Victim::Occupied(0));
    assert_eq!(fifo_clock.now(), 2);
}

#[test]
fn resident_blocks_counts_across_sets() {
    let mut cache = model(4, 2, WritePolicy::WriteThrough, ReplacementPolicy::Fifo);
    let mut clock = Clock::default();
    let _ = cache.install(0, 0, 1, &mut clock);
    let _ = cache.install(3, 1, 1, &mut clock);
    let _ = cache.install(3, 0, 2, &mut clock);
    assert_eq!(cache.resident_blocks(), 3);
    assert_eq!(cache.set(3).occupancy(), 2);
}
