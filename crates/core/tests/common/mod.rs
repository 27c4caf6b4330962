//! Shared helpers for building configurations and replaying short traces.

use csim_core::config::{AllocatePolicy, CacheConfig, ReplacementPolicy, WritePolicy};
use csim_core::{Simulator, Stats};

/// Routes `tracing` output through the test harness; safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Builds a validated configuration from its six components.
pub fn config(
    num_sets: u32,
    num_blocks: u32,
    block_size: u32,
    allocate: AllocatePolicy,
    write: WritePolicy,
    replacement: ReplacementPolicy,
) -> CacheConfig {
    CacheConfig::new(
        num_sets,
        num_blocks,
        block_size,
        allocate,
        write,
        replacement,
    )
    .expect("test configuration must be valid")
}

/// Builds a configuration from a command-line style string,
/// e.g. `"1 2 4 write-allocate write-back fifo"`.
pub fn config_from(params: &str) -> CacheConfig {
    let tokens: Vec<&str> = params.split_whitespace().collect();
    CacheConfig::from_args(tokens.as_slice()).expect("test configuration must be valid")
}

/// Creates a fresh simulator for a command-line style configuration string.
pub fn simulator(params: &str) -> Simulator {
    init_logging();
    Simulator::new(&config_from(params))
}

/// Replays `trace` (one record per line) and returns the final statistics.
pub fn run_trace(params: &str, trace: &str) -> Stats {
    let mut sim = simulator(params);
    let _ = sim.run(trace.as_bytes()).expect("in-memory trace cannot fail");
    sim.into_stats()
}
