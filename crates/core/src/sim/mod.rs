//! Trace input and the simulation driver.
//!
//! Provides the parser that turns trace lines into load/store records and the
//! [`Simulator`] that replays them against a cache.

/// Simulation driver: load/store state machines over the cache model.
pub mod simulator;

/// Trace record types and the lenient line parser.
pub mod trace;

pub use simulator::{AccessOutcome, Simulator};
pub use trace::{Operation, TraceReader, TraceRecord};
