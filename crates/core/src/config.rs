//! Configuration for the cache simulator.
//!
//! This module defines the parameters of a simulated cache. It provides:
//! 1. **Enums:** Write-allocate, write-through/write-back, and LRU/FIFO policy selectors.
//! 2. **Structure:** `CacheConfig`, which can only exist in a validated state.
//! 3. **Front ends:** Construction from the six positional command-line tokens or
//!    from a JSON document.
//!
//! Validation runs once, before any cache state is allocated; the simulation
//! itself never sees an invalid configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::addr::{ADDRESS_BITS, Geometry};
use crate::common::error::ConfigError;

/// Baseline constants for configuration parsing.
mod defaults {
    /// Number of positional parameters expected on the command line.
    pub const POSITIONAL_PARAMS: usize = 6;

    /// Smallest block that can hold one 4-byte memory word.
    pub const MIN_BLOCK_SIZE: u32 = 4;

    /// Bytes moved per memory transfer; a block costs one transfer per word.
    pub const WORD_BYTES: u32 = 4;
}

pub use defaults::WORD_BYTES;

/// What a store does when its block is not resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocatePolicy {
    /// Load the block into the cache, then perform the store there.
    #[default]
    WriteAllocate,
    /// Write straight to memory and leave the cache untouched.
    NoWriteAllocate,
}

/// When a store hit reaches backing memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Every store is propagated to memory immediately.
    WriteThrough,
    /// Stores mark the block dirty; memory is updated when the block is evicted.
    #[default]
    WriteBack,
}

/// Victim selection among the occupied blocks of a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacementPolicy {
    /// Least Recently Used: evict the block touched (hit or installed) longest ago.
    #[default]
    Lru,
    /// First In, First Out: evict the block installed earliest, ignoring hits.
    Fifo,
}

impl AllocatePolicy {
    /// Command-line spelling of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WriteAllocate => "write-allocate",
            Self::NoWriteAllocate => "no-write-allocate",
        }
    }
}

impl WritePolicy {
    /// Command-line spelling of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WriteThrough => "write-through",
            Self::WriteBack => "write-back",
        }
    }
}

impl ReplacementPolicy {
    /// Command-line spelling of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Fifo => "fifo",
        }
    }
}

impl FromStr for AllocatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "write-allocate" => Ok(Self::WriteAllocate),
            "no-write-allocate" => Ok(Self::NoWriteAllocate),
            other => Err(ConfigError::UnknownAllocatePolicy(other.to_string())),
        }
    }
}

impl FromStr for WritePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "write-through" => Ok(Self::WriteThrough),
            "write-back" => Ok(Self::WriteBack),
            other => Err(ConfigError::UnknownWritePolicy(other.to_string())),
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            other => Err(ConfigError::UnknownReplacementPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for AllocatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated parameters of a simulated cache.
///
/// Fields are private: every `CacheConfig` in existence has passed validation,
/// whether it was built with [`CacheConfig::new`], [`CacheConfig::from_args`], or
/// deserialized.
///
/// # Examples
///
/// From the six positional command-line tokens:
///
/// ```
/// use csim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let config =
///     CacheConfig::from_args(&["256", "4", "16", "write-allocate", "write-back", "lru"]).unwrap();
/// assert_eq!(config.num_sets(), 256);
/// assert_eq!(config.replacement(), ReplacementPolicy::Lru);
/// assert_eq!(config.geometry().tag_bits, 20);
/// ```
///
/// From JSON, where the policy fields default to `write-allocate`, `write-back`, `lru`:
///
/// ```
/// use csim_core::config::{CacheConfig, WritePolicy};
///
/// let config = CacheConfig::from_json(
///     r#"{ "num_sets": 1, "num_blocks": 8, "block_size": 64, "write_policy": "write-through" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.write_policy(), WritePolicy::WriteThrough);
/// assert!(config.write_allocate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCacheConfig", into = "RawCacheConfig")]
pub struct CacheConfig {
    num_sets: u32,
    num_blocks: u32,
    block_size: u32,
    allocate: AllocatePolicy,
    write: WritePolicy,
    replacement: ReplacementPolicy,
    geometry: Geometry,
}

/// Unvalidated wire form of [`CacheConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCacheConfig {
    num_sets: i64,
    num_blocks: i64,
    block_size: i64,
    #[serde(default)]
    write_allocate: AllocatePolicy,
    #[serde(default)]
    write_policy: WritePolicy,
    #[serde(default)]
    replacement: ReplacementPolicy,
}

impl TryFrom<RawCacheConfig> for CacheConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCacheConfig) -> Result<Self, Self::Error> {
        let (num_sets, num_blocks, block_size) =
            check_dimensions(raw.num_sets, raw.num_blocks, raw.block_size)?;
        Self::new(
            num_sets,
            num_blocks,
            block_size,
            raw.write_allocate,
            raw.write_policy,
            raw.replacement,
        )
    }
}

impl From<CacheConfig> for RawCacheConfig {
    fn from(config: CacheConfig) -> Self {
        Self {
            num_sets: config.num_sets.into(),
            num_blocks: config.num_blocks.into(),
            block_size: config.block_size.into(),
            write_allocate: config.allocate,
            write_policy: config.write,
            replacement: config.replacement,
        }
    }
}

/// Checks that `value` is a positive power of two representable as `u32`.
fn power_of_two(param: &'static str, value: i64) -> Result<u32, ConfigError> {
    u32::try_from(value)
        .ok()
        .filter(|v| v.is_power_of_two())
        .ok_or(ConfigError::NotPowerOfTwo { param, value })
}

/// Validates the three dimensions in the order sets, blocks, block size.
fn check_dimensions(
    num_sets: i64,
    num_blocks: i64,
    block_size: i64,
) -> Result<(u32, u32, u32), ConfigError> {
    let num_sets = power_of_two("Number of sets", num_sets)?;
    let num_blocks = power_of_two("Number of blocks", num_blocks)?;
    let block_size = power_of_two("Block size", block_size)?;
    if block_size < defaults::MIN_BLOCK_SIZE {
        return Err(ConfigError::BlockSizeTooSmall { value: block_size });
    }
    Ok((num_sets, num_blocks, block_size))
}

/// Parses one of the numeric positional parameters.
fn parse_number(param: &'static str, token: &str) -> Result<i64, ConfigError> {
    token.trim().parse().map_err(|_| ConfigError::NotANumber {
        param,
        token: token.to_string(),
    })
}

impl CacheConfig {
    /// Builds a configuration, validating every rule.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a dimension is not a positive power of two, the
    /// block size is below 4 bytes, offset plus index bits exceed 32, or the
    /// no-write-allocate/write-back combination is requested.
    pub fn new(
        num_sets: u32,
        num_blocks: u32,
        block_size: u32,
        allocate: AllocatePolicy,
        write: WritePolicy,
        replacement: ReplacementPolicy,
    ) -> Result<Self, ConfigError> {
        let (num_sets, num_blocks, block_size) =
            check_dimensions(num_sets.into(), num_blocks.into(), block_size.into())?;

        if allocate == AllocatePolicy::NoWriteAllocate && write == WritePolicy::WriteBack {
            return Err(ConfigError::NoWriteAllocateWithWriteBack);
        }

        let geometry = Geometry::new(num_sets, block_size);
        if geometry.offset_bits + geometry.index_bits > ADDRESS_BITS {
            return Err(ConfigError::AddressBitsExceeded {
                offset_bits: geometry.offset_bits,
                index_bits: geometry.index_bits,
            });
        }

        Ok(Self {
            num_sets,
            num_blocks,
            block_size,
            allocate,
            write,
            replacement,
            geometry,
        })
    }

    /// Builds a configuration from the six positional command-line parameters:
    /// `<sets> <blocks> <bytes> <write-allocate|no-write-allocate>
    /// <write-through|write-back> <lru|fifo>`.
    ///
    /// Checks run in the same order the parameters are documented, so the first
    /// problem reported is the leftmost one.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first rule violated.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        if args.len() != defaults::POSITIONAL_PARAMS {
            return Err(ConfigError::ArgumentCount { found: args.len() });
        }

        let num_sets = parse_number("Number of sets", args[0].as_ref())?;
        let num_blocks = parse_number("Number of blocks", args[1].as_ref())?;
        let block_size = parse_number("Block size", args[2].as_ref())?;
        let (num_sets, num_blocks, block_size) =
            check_dimensions(num_sets, num_blocks, block_size)?;

        let allocate = args[3].as_ref().parse()?;
        let write = args[4].as_ref().parse()?;
        let replacement = args[5].as_ref().parse()?;

        Self::new(
            num_sets,
            num_blocks,
            block_size,
            allocate,
            write,
            replacement,
        )
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` for malformed JSON, unknown fields, or any
    /// configuration rule violation (reported through the error's message).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of sets in the cache.
    pub const fn num_sets(&self) -> u32 {
        self.num_sets
    }

    /// Blocks per set (associativity).
    pub const fn num_blocks(&self) -> u32 {
        self.num_blocks
    }

    /// Bytes per block.
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Memory words per block; each costs one memory transfer.
    pub const fn block_words(&self) -> u32 {
        self.block_size / WORD_BYTES
    }

    /// Store-miss allocation policy.
    pub const fn allocate_policy(&self) -> AllocatePolicy {
        self.allocate
    }

    /// Store-hit propagation policy.
    pub const fn write_policy(&self) -> WritePolicy {
        self.write
    }

    /// Eviction policy.
    pub const fn replacement(&self) -> ReplacementPolicy {
        self.replacement
    }

    /// `true` when store misses load the block into the cache.
    pub const fn write_allocate(&self) -> bool {
        matches!(self.allocate, AllocatePolicy::WriteAllocate)
    }

    /// `true` for write-through, `false` for write-back.
    pub const fn write_through(&self) -> bool {
        matches!(self.write, WritePolicy::WriteThrough)
    }

    /// `true` for LRU, `false` for FIFO.
    pub const fn use_lru(&self) -> bool {
        matches!(self.replacement, ReplacementPolicy::Lru)
    }

    /// Address partition widths for this cache.
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sets x {} blocks x {} bytes, {}, {}, {}",
            self.num_sets,
            self.num_blocks,
            self.block_size,
            self.allocate,
            self.write,
            self.replacement
        )
    }
}
