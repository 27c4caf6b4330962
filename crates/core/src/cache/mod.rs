//! Set-Associative Cache Model.
//!
//! This module holds the state of the simulated cache: `num_sets` sets of
//! `num_blocks` blocks each, allocated once from a validated configuration and
//! mutated in place for the whole run. It exposes the primitive steps the load and
//! store state machines are built from (lookup, touch, victim selection, install,
//! dirty bookkeeping); cycle costs are charged elsewhere.
//!
//! Ordering between blocks is decided by a logical [`Clock`] owned by the
//! simulation driver and passed in by reference. The clock advances once per
//! install and once per LRU hit.

/// Cache replacement policy implementations (LRU, FIFO).
pub mod policies;

use self::policies::ReplacementPolicy;
use crate::config::CacheConfig;

/// One cache line slot.
///
/// When `valid` is false the remaining fields are stale and ignored by every
/// lookup and victim decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// Whether the block holds live data.
    pub valid: bool,
    /// Whether the block holds writes not yet propagated to memory (write-back only).
    pub dirty: bool,
    /// Tag of the resident address.
    pub tag: u32,
    /// Clock value at install time (FIFO key).
    pub arrival_time: u32,
    /// Clock value at the most recent install or LRU hit (LRU key).
    pub last_access_time: u32,
}

/// A fixed-size group of blocks sharing one set index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    blocks: Box<[Block]>,
}

/// Monotonic logical clock ordering installs and LRU hits.
///
/// This is not wall-clock time; it only orders events within a run. The counter
/// wraps at `u32::MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clock(u32);

/// Block chosen to receive an incoming line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Victim {
    /// An invalid block; filling it evicts nothing.
    Vacant(usize),
    /// A valid block whose current contents will be evicted.
    Occupied(usize),
}

/// Contents of a block displaced by an install.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evicted {
    /// Tag the block held.
    pub tag: u32,
    /// Whether it held unflushed writes.
    pub dirty: bool,
}

impl Clock {
    /// Creates a clock starting at `start`.
    pub const fn new(start: u32) -> Self {
        Self(start)
    }

    /// Current clock value.
    pub const fn now(self) -> u32 {
        self.0
    }

    /// Returns the current value and advances the clock by one.
    pub const fn tick(&mut self) -> u32 {
        let now = self.0;
        self.0 = self.0.wrapping_add(1);
        now
    }
}

impl Victim {
    /// Way index of the chosen block.
    pub const fn way(self) -> usize {
        match self {
            Self::Vacant(way) | Self::Occupied(way) => way,
        }
    }

    /// Whether installing here evicts a resident block.
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::Occupied(_))
    }
}

impl CacheSet {
    /// Creates a set of `num_blocks` invalid blocks.
    pub fn new(num_blocks: usize) -> Self {
        Self {
            blocks: vec![Block::default(); num_blocks].into_boxed_slice(),
        }
    }

    /// Creates a set holding `blocks` in way order.
    ///
    /// `blocks` must not be empty; every set has an associativity of at least one.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        debug_assert!(!blocks.is_empty(), "a cache set needs at least one block");
        Self {
            blocks: blocks.into_boxed_slice(),
        }
    }

    /// Blocks of the set in way order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block at `way`, if the way exists.
    pub fn block(&self, way: usize) -> Option<&Block> {
        self.blocks.get(way)
    }

    /// Returns the first way holding a valid block with `tag`.
    ///
    /// Install logic never places a tag in a set that already holds it, so at most
    /// one way can match.
    pub fn find(&self, tag: u32) -> Option<usize> {
        self.blocks.iter().position(|b| b.valid && b.tag == tag)
    }

    /// Number of valid blocks.
    pub fn occupancy(&self) -> usize {
        self.blocks.iter().filter(|b| b.valid).count()
    }
}

/// The full simulated cache.
pub struct CacheModel {
    sets: Vec<CacheSet>,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
    write_through: bool,
}

impl std::fmt::Debug for CacheModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheModel")
            .field("sets", &self.sets.len())
            .field("write_through", &self.write_through)
            .finish_non_exhaustive()
    }
}

impl CacheModel {
    /// Allocates every set and block described by `config`; all blocks start invalid.
    pub fn new(config: &CacheConfig) -> Self {
        let num_blocks = config.num_blocks() as usize;
        Self {
            sets: (0..config.num_sets())
                .map(|_| CacheSet::new(num_blocks))
                .collect(),
            policy: policies::from_config(config.replacement()),
            write_through: config.write_through(),
        }
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Set at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Indices produced by decoding an address
    /// with this cache's geometry are always in range.
    pub fn set(&self, index: u32) -> &CacheSet {
        &self.sets[index as usize]
    }

    /// Block at (`index`, `way`), if both exist.
    pub fn block(&self, index: u32, way: usize) -> Option<&Block> {
        self.sets.get(index as usize).and_then(|s| s.block(way))
    }

    /// Total number of valid blocks across all sets.
    pub fn resident_blocks(&self) -> usize {
        self.sets.iter().map(CacheSet::occupancy).sum()
    }

    /// Looks up `tag` in set `index`.
    pub fn lookup(&self, index: u32, tag: u32) -> Option<usize> {
        self.set(index).find(tag)
    }

    /// Records a hit on (`index`, `way`) with the configured policy.
    pub fn touch(&mut self, index: u32, way: usize, clock: &mut Clock) {
        let block = &mut self.sets[index as usize].blocks[way];
        self.policy.on_hit(block, clock);
    }

    /// Chooses the way in set `index` to receive a new block.
    pub fn select_victim(&self, index: u32) -> Victim {
        self.policy.select_victim(self.set(index))
    }

    /// Whether replacing `victim` requires writing its data back to memory first.
    ///
    /// True only for a valid, dirty block in a write-back cache. Must be asked
    /// before [`install`](Self::install) overwrites the block.
    pub fn needs_flush(&self, index: u32, victim: Victim) -> bool {
        let block = &self.set(index).blocks[victim.way()];
        block.valid && block.dirty && !self.write_through
    }

    /// Installs `tag` into (`index`, `way`) as a clean block stamped with the current
    /// clock value, then advances the clock.
    ///
    /// Returns the previous contents if a valid block was displaced.
    pub fn install(
        &mut self,
        index: u32,
        way: usize,
        tag: u32,
        clock: &mut Clock,
    ) -> Option<Evicted> {
        let block = &mut self.sets[index as usize].blocks[way];
        let evicted = block.valid.then_some(Evicted {
            tag: block.tag,
            dirty: block.dirty,
        });
        let now = clock.tick();
        *block = Block {
            valid: true,
            dirty: false,
            tag,
            arrival_time: now,
            last_access_time: now,
        };
        evicted
    }

    /// Marks (`index`, `way`) as holding unflushed writes.
    pub fn mark_dirty(&mut self, index: u32, way: usize) {
        self.sets[index as usize].blocks[way].dirty = true;
    }

    /// Marks (`index`, `way`) as consistent with memory.
    pub fn mark_clean(&mut self, index: u32, way: usize) {
        self.sets[index as usize].blocks[way].dirty = false;
    }
}
