//! Trace-driven cache simulator CLI.
//!
//! This binary wires the `csim-core` library to the outside world. It performs:
//! 1. **Configuration:** Six positional parameters (or a JSON file) validated into a `CacheConfig`.
//! 2. **Replay:** Reads the trace from stdin (or `--trace <file>`) and runs the simulator.
//! 3. **Report:** Prints the seven statistics lines, or JSON with `--json`.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` to see skipped
//! trace lines or `RUST_LOG=trace` to see every eviction.

use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use csim_core::common::SimError;
use csim_core::{CacheConfig, Simulator, Stats};

const USAGE_KEY: &str = concat!(
    "Usage key: csim <sets> <blocks> <bytes> <write-allocate|no-write-allocate> ",
    "<write-through|write-back> <lru|fifo>"
);

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replays a load/store memory trace against a modeled cache and reports hits, misses, and estimated cycles.\n\nTrace lines have the form `<l|s> <hex-address> <ignored>`; malformed lines are skipped.\n\nExamples:\n  csim 256 4 16 write-allocate write-back lru < gcc.trace\n  csim 1 1024 128 no-write-allocate write-through fifo --trace swim.trace\n  csim --config l1d.json --json < gcc.trace"
)]
struct Cli {
    /// Cache parameters: sets, blocks per set, block bytes, allocate policy, write policy, eviction policy.
    #[arg(value_name = "PARAM", allow_negative_numbers = true)]
    params: Vec<String>,

    /// JSON cache configuration used instead of the positional parameters.
    #[arg(short, long, conflicts_with = "params")]
    config: Option<String>,

    /// Trace file to replay (defaults to stdin).
    #[arg(short, long)]
    trace: Option<String>,

    /// Print statistics as JSON instead of the plain-text report.
    #[arg(long)]
    json: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, SimError::Config(_)) {
                eprintln!("{USAGE_KEY}");
            }
            process::exit(1);
        }
    };
    tracing::debug!(%config, "configuration accepted");

    let stats = match replay(&config, cli.trace.as_deref()) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = report(&config, &stats, cli.json) {
        eprintln!("Error: writing report: {e}");
        process::exit(1);
    }
}

/// Installs the stderr `tracing` subscriber, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Builds the cache configuration from `--config` or the positional parameters.
fn load_config(cli: &Cli) -> Result<CacheConfig, SimError> {
    if let Some(path) = &cli.config {
        let json = fs::read_to_string(path)?;
        return Ok(CacheConfig::from_json(&json)?);
    }
    Ok(CacheConfig::from_args(cli.params.as_slice())?)
}

/// Runs the whole trace through a fresh simulator.
fn replay(config: &CacheConfig, trace: Option<&str>) -> Result<Stats, SimError> {
    let mut sim = Simulator::new(config);
    match trace {
        Some(path) => {
            let _ = sim.run(BufReader::new(File::open(path)?))?;
        }
        None => {
            let _ = sim.run(io::stdin().lock())?;
        }
    }
    Ok(sim.into_stats())
}

/// Writes the final report to stdout.
fn report(config: &CacheConfig, stats: &Stats, json: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if json {
        let doc = serde_json::json!({
            "config": config,
            "stats": stats,
            "hit_rate": stats.hit_rate(),
        });
        serde_json::to_writer_pretty(&mut out, &doc)?;
        writeln!(out)?;
    } else {
        write!(out, "{stats}")?;
    }
    out.flush()
}
