//! Cycle cost accounting.
//!
//! Translates each step of the load/store state machines into cycles and
//! accumulates them, together with the access counters, in a [`Stats`] record.
//!
//! # Cost model
//!
//! - Any cache access (hit or the lookup preceding a miss): 1 cycle.
//! - One 4-byte memory transfer: 100 cycles; moving a whole block costs one
//!   transfer per word, i.e. `100 * (block_size / 4)`.
//! - Writing a single store through to memory: 100 cycles.

use crate::config::CacheConfig;
use crate::sim::trace::Operation;
use crate::stats::Stats;

/// Cycles for one cache access.
pub const HIT_CYCLES: u64 = 1;

/// Cycles for one word-sized memory transfer.
pub const MEMORY_ACCESS_CYCLES: u64 = 100;

/// Charges cycles and counts accesses for one simulation run.
#[derive(Debug, Clone)]
pub struct CostAccountant {
    stats: Stats,
    block_transfer: u64,
    write_through: bool,
}

impl CostAccountant {
    /// Creates an accountant with zeroed statistics for `config`.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            stats: Stats::default(),
            block_transfer: MEMORY_ACCESS_CYCLES * u64::from(config.block_words()),
            write_through: config.write_through(),
        }
    }

    /// Cycles to move one whole block between cache and memory.
    pub const fn block_transfer_cycles(&self) -> u64 {
        self.block_transfer
    }

    /// Counts a new access of kind `op`.
    pub const fn begin(&mut self, op: Operation) {
        match op {
            Operation::Load => self.stats.total_loads += 1,
            Operation::Store => self.stats.total_stores += 1,
        }
    }

    /// Load hit: one cache access.
    pub const fn load_hit(&mut self) {
        self.stats.load_hits += 1;
        self.stats.total_cycles += HIT_CYCLES;
    }

    /// Load miss: the access plus loading the block from memory.
    pub const fn load_miss(&mut self) {
        self.stats.load_misses += 1;
        self.stats.total_cycles += HIT_CYCLES + self.block_transfer;
    }

    /// Store hit: the access, plus a memory write under write-through.
    pub const fn store_hit(&mut self) {
        self.stats.store_hits += 1;
        self.stats.total_cycles += HIT_CYCLES;
        if self.write_through {
            self.stats.total_cycles += MEMORY_ACCESS_CYCLES;
        }
    }

    /// Store miss with write-allocate: the access plus loading the block.
    ///
    /// The write itself is charged separately by
    /// [`store_allocated`](Self::store_allocated) once the block is installed.
    pub const fn store_miss_allocate(&mut self) {
        self.stats.store_misses += 1;
        self.stats.total_cycles += HIT_CYCLES + self.block_transfer;
    }

    /// Completes an allocating store miss: a memory write under write-through,
    /// nothing under write-back (the block is left dirty instead).
    pub const fn store_allocated(&mut self) {
        if self.write_through {
            self.stats.total_cycles += MEMORY_ACCESS_CYCLES;
        }
    }

    /// Store miss with no-write-allocate: the access plus one direct memory write.
    pub const fn store_miss_no_allocate(&mut self) {
        self.stats.store_misses += 1;
        self.stats.total_cycles += HIT_CYCLES + MEMORY_ACCESS_CYCLES;
    }

    /// Writing a dirty victim back to memory before it is replaced.
    pub const fn flush_victim(&mut self) {
        self.stats.total_cycles += self.block_transfer;
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Consumes the accountant, returning its statistics.
    pub const fn into_stats(self) -> Stats {
        self.stats
    }
}
