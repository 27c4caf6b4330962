//! Error definitions for the cache simulator.
//!
//! This module defines the failure modes that exist outside the cache model:
//! 1. **Configuration Errors:** Every rule a cache configuration must satisfy before
//!    any simulation state is built.
//! 2. **Run Errors:** I/O on the trace stream and malformed JSON configuration files.
//!
//! The cache model itself is infallible once it holds a valid configuration, and
//! malformed trace lines are skipped rather than reported.

use thiserror::Error;

/// Reasons a cache configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The positional parameter list did not contain exactly six entries.
    #[error("Expected 6 arguments, found {found}")]
    ArgumentCount {
        /// Number of parameters actually supplied.
        found: usize,
    },

    /// One of the three numeric parameters is not an integer.
    #[error("{param} must be an integer, got '{token}'")]
    NotANumber {
        /// Human-readable parameter name.
        param: &'static str,
        /// The offending token.
        token: String,
    },

    /// A dimension is zero, negative, or not a power of two.
    #[error("{param} must be a positive power of 2, got {value}")]
    NotPowerOfTwo {
        /// Human-readable parameter name.
        param: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// Blocks smaller than one 4-byte word cannot be transferred.
    #[error("Block size must be a power of 2 and at least 4, got {value}")]
    BlockSizeTooSmall {
        /// The rejected block size in bytes.
        value: u32,
    },

    /// Offset and index together need more than the 32 bits of an address.
    #[error(
        "Block size and set count need {offset_bits} offset + {index_bits} index bits, more than a 32-bit address holds"
    )]
    AddressBitsExceeded {
        /// `log2(block_size)`.
        offset_bits: u32,
        /// `log2(num_sets)`.
        index_bits: u32,
    },

    /// Fourth parameter is neither `write-allocate` nor `no-write-allocate`.
    #[error("Write allocate must be 'write-allocate' or 'no-write-allocate', got '{0}'")]
    UnknownAllocatePolicy(String),

    /// Fifth parameter is neither `write-through` nor `write-back`.
    #[error("Write policy must be 'write-through' or 'write-back', got '{0}'")]
    UnknownWritePolicy(String),

    /// Sixth parameter is neither `lru` nor `fifo`.
    #[error("Eviction policy must be 'lru' or 'fifo', got '{0}'")]
    UnknownReplacementPolicy(String),

    /// A store miss that neither allocates nor writes through would lose data.
    #[error("no-write-allocate cannot be combined with write-back")]
    NoWriteAllocateWithWriteBack,
}

/// Top-level error for a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading the trace or a configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON configuration document could not be parsed.
    #[error("configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for fallible simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;
