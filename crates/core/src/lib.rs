//! Trace-driven cache simulator library.
//!
//! This crate replays a stream of load/store records against a modeled
//! set-associative cache and accounts for the cycles each access costs:
//! 1. **Addressing:** Tag/index/offset decomposition of 32-bit addresses.
//! 2. **Configuration:** Validated cache geometry and write/allocate/eviction policies.
//! 3. **Cache:** Sets of blocks with dirty/valid bookkeeping and a logical clock.
//! 4. **Replacement:** LRU and FIFO victim selection.
//! 5. **Simulation:** Trace parsing, the load/store state machines, and cycle statistics.

/// Cache model (blocks, sets, logical clock, replacement policies).
pub mod cache;
/// Common types (addresses, geometry, errors).
pub mod common;
/// Cache configuration (dimensions, policy enums, validation).
pub mod config;
/// Cycle cost accounting for hits, misses, and write-backs.
pub mod cost;
/// Trace parsing and the simulation driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Validated cache configuration; construct with `CacheConfig::new` or `CacheConfig::from_args`.
pub use crate::config::CacheConfig;
/// Simulation driver owning the cache, clock, and statistics for one run.
pub use crate::sim::Simulator;
/// Final hit/miss/cycle counters of a run.
pub use crate::stats::Stats;
