//! Simulator: owns the cache, the logical clock, and the cost accountant for one run.
//!
//! Each trace record is processed to completion before the next one starts:
//! decode the address, look the tag up in its set, then walk the load or store
//! state machine, charging cycles at every step.

use std::io::BufRead;

use tracing::{info, trace};

use super::trace::{Operation, TraceReader, TraceRecord};
use crate::cache::{CacheModel, Clock, Victim};
use crate::common::addr::{Address, DecodedAddr};
use crate::common::error::Result;
use crate::config::CacheConfig;
use crate::cost::CostAccountant;
use crate::stats::Stats;

/// What a single access did to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident in `way`.
    Hit {
        /// Way that matched.
        way: usize,
    },
    /// The block was installed into `victim`.
    Miss {
        /// Way that received the block, and whether it was occupied.
        victim: Victim,
        /// Whether a dirty victim was written back first.
        flushed: bool,
    },
    /// A no-write-allocate store miss went straight to memory.
    Bypass,
}

impl AccessOutcome {
    /// Whether the access hit.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Top-level simulator for one run.
///
/// # Examples
///
/// ```
/// use csim_core::{CacheConfig, Simulator};
///
/// let config =
///     CacheConfig::from_args(&["1", "1", "4", "write-allocate", "write-through", "lru"]).unwrap();
/// let mut sim = Simulator::new(&config);
/// let trace = "l 0 0\nl 0 0\nl 4 0\n";
/// let stats = sim.run(trace.as_bytes()).unwrap();
/// assert_eq!(stats.load_hits, 1);
/// assert_eq!(stats.load_misses, 2);
/// ```
#[derive(Debug)]
pub struct Simulator {
    config: CacheConfig,
    cache: CacheModel,
    clock: Clock,
    accountant: CostAccountant,
}

impl Simulator {
    /// Creates a simulator with an empty cache sized from `config`.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            config: *config,
            cache: CacheModel::new(config),
            clock: Clock::default(),
            accountant: CostAccountant::new(config),
        }
    }

    /// Configuration this run uses.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Current cache state.
    pub const fn cache(&self) -> &CacheModel {
        &self.cache
    }

    /// Current logical clock.
    pub const fn clock(&self) -> Clock {
        self.clock
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &Stats {
        self.accountant.stats()
    }

    /// Ends the run, returning its statistics.
    pub fn into_stats(self) -> Stats {
        self.accountant.into_stats()
    }

    /// Tag and set index of `address` in this cache.
    pub fn decode(&self, address: Address) -> DecodedAddr {
        address.decode(self.config.geometry())
    }

    /// Replays one trace record.
    pub fn access(&mut self, record: TraceRecord) -> AccessOutcome {
        match record.op {
            Operation::Load => self.load(record.address.val()),
            Operation::Store => self.store(record.address.val()),
        }
    }

    /// Processes a load of `address`.
    ///
    /// A hit costs one cycle. A miss costs the access plus one block transfer from
    /// memory, plus another block transfer if the victim is dirty under write-back;
    /// the dirty check happens before the install overwrites the victim.
    pub fn load(&mut self, address: u32) -> AccessOutcome {
        self.accountant.begin(Operation::Load);
        let DecodedAddr { tag, index } = self.decode(Address::new(address));

        if let Some(way) = self.cache.lookup(index, tag) {
            self.accountant.load_hit();
            self.cache.touch(index, way, &mut self.clock);
            return AccessOutcome::Hit { way };
        }

        self.accountant.load_miss();
        let (victim, flushed) = self.allocate(index, tag);
        AccessOutcome::Miss { victim, flushed }
    }

    /// Processes a store to `address`.
    ///
    /// Hits cost one cycle and either write through (100 more cycles) or mark the
    /// block dirty. Misses either allocate like a load and then apply the write
    /// policy to the new block, or, under no-write-allocate, write straight to
    /// memory for 101 cycles without touching the cache.
    pub fn store(&mut self, address: u32) -> AccessOutcome {
        self.accountant.begin(Operation::Store);
        let DecodedAddr { tag, index } = self.decode(Address::new(address));

        if let Some(way) = self.cache.lookup(index, tag) {
            self.accountant.store_hit();
            self.cache.touch(index, way, &mut self.clock);
            if !self.config.write_through() {
                self.cache.mark_dirty(index, way);
            }
            return AccessOutcome::Hit { way };
        }

        if !self.config.write_allocate() {
            self.accountant.store_miss_no_allocate();
            return AccessOutcome::Bypass;
        }

        self.accountant.store_miss_allocate();
        let (victim, flushed) = self.allocate(index, tag);
        if self.config.write_through() {
            self.cache.mark_clean(index, victim.way());
        } else {
            self.cache.mark_dirty(index, victim.way());
        }
        self.accountant.store_allocated();
        AccessOutcome::Miss { victim, flushed }
    }

    /// Selects a victim in set `index`, writes it back if needed, and installs `tag`.
    fn allocate(&mut self, index: u32, tag: u32) -> (Victim, bool) {
        let victim = self.cache.select_victim(index);
        let flushed = self.cache.needs_flush(index, victim);
        if flushed {
            self.accountant.flush_victim();
        }
        let way = victim.way();
        if let Some(evicted) = self.cache.install(index, way, tag, &mut self.clock) {
            trace!(
                set = index,
                way,
                old_tag = evicted.tag,
                new_tag = tag,
                dirty = evicted.dirty,
                "evicted block"
            );
        }
        (victim, flushed)
    }

    /// Replays every record yielded by `records`.
    pub fn run_records<I>(&mut self, records: I) -> &Stats
    where
        I: IntoIterator<Item = TraceRecord>,
    {
        for record in records {
            let _ = self.access(record);
        }
        self.stats()
    }

    /// Replays a whole trace stream, skipping blank and malformed lines.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`](crate::common::SimError::Io) if reading the stream
    /// fails. Records processed before the failure remain counted.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<&Stats> {
        let mut records = TraceReader::new(reader);
        for record in records.by_ref() {
            let _ = self.access(record?);
        }

        let stats = self.accountant.stats();
        info!(
            lines = records.lines_read(),
            skipped = records.lines_skipped(),
            accesses = stats.total_accesses(),
            cycles = stats.total_cycles,
            "trace replay finished"
        );
        Ok(stats)
    }
}
