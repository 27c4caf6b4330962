//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome of a simulation run. It provides:
//! 1. **Access counts:** Loads and stores, each split into hits and misses.
//! 2. **Cycles:** The accumulated cost of every access, write-through, and write-back.
//! 3. **Reporting:** The seven-line plain-text report and a serializable form.

use std::fmt;

use serde::Serialize;

/// Counters accumulated over one simulation run.
///
/// All counters only ever increase. `total_cycles` is 64-bit so that even
/// billions of misses on large blocks cannot overflow it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Load records processed.
    pub total_loads: u64,
    /// Store records processed.
    pub total_stores: u64,
    /// Loads that found their block resident.
    pub load_hits: u64,
    /// Loads that had to fetch their block from memory.
    pub load_misses: u64,
    /// Stores that found their block resident.
    pub store_hits: u64,
    /// Stores whose block was not resident.
    pub store_misses: u64,
    /// Estimated cycles for the whole trace.
    pub total_cycles: u64,
}

impl Stats {
    /// Loads plus stores.
    pub const fn total_accesses(&self) -> u64 {
        self.total_loads + self.total_stores
    }

    /// Load hits plus store hits.
    pub const fn total_hits(&self) -> u64 {
        self.load_hits + self.store_hits
    }

    /// Load misses plus store misses.
    pub const fn total_misses(&self) -> u64 {
        self.load_misses + self.store_misses
    }

    /// Fraction of accesses that hit, in `[0.0, 1.0]`; 0.0 for an empty run.
    pub const fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.total_hits() as f64 / total as f64
        }
    }
}

impl fmt::Display for Stats {
    /// Writes the report: seven `key: value` lines in fixed order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total loads: {}", self.total_loads)?;
        writeln!(f, "Total stores: {}", self.total_stores)?;
        writeln!(f, "Load hits: {}", self.load_hits)?;
        writeln!(f, "Load misses: {}", self.load_misses)?;
        writeln!(f, "Store hits: {}", self.store_hits)?;
        writeln!(f, "Store misses: {}", self.store_misses)?;
        writeln!(f, "Total cycles: {}", self.total_cycles)
    }
}
