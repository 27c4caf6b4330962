//! Cache Replacement Policies.
//!
//! Implements victim selection for a full set. Both policies share one scan:
//! an invalid block is always taken first, and among valid blocks the one with the
//! smallest policy key wins, the lowest way breaking ties.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, keyed on the last hit or install.
//! - `Fifo`: First-In, First-Out, keyed on the install time only.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::{Block, CacheSet, Clock, Victim};
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// A policy decides two things: how a hit updates a block's timestamps, and which
/// timestamp orders the valid blocks of a set for eviction.
pub trait ReplacementPolicy: Send + Sync {
    /// Updates the policy state of `block` after it was hit.
    ///
    /// # Arguments
    ///
    /// * `block` - The valid block that matched the lookup.
    /// * `clock` - The run's logical clock; advanced only if the policy records the hit.
    fn on_hit(&self, block: &mut Block, clock: &mut Clock);

    /// Returns the timestamp that orders `block` for eviction (smaller goes first).
    fn eviction_key(&self, block: &Block) -> u32;

    /// Selects the block to replace in `set`.
    ///
    /// Scans ways in order and returns the first invalid one if there is any.
    /// Otherwise keeps a running minimum of [`eviction_key`](Self::eviction_key)
    /// with strict `<`, so equal keys resolve to the lowest way.
    ///
    /// # Panics
    ///
    /// This function will not panic: sets always hold at least one block, so the
    /// initial candidate (way 0) exists.
    fn select_victim(&self, set: &CacheSet) -> Victim {
        if let Some(way) = set.blocks().iter().position(|b| !b.valid) {
            return Victim::Vacant(way);
        }

        let mut victim = 0;
        let mut best = u32::MAX;
        for (way, block) in set.blocks().iter().enumerate() {
            let key = self.eviction_key(block);
            if way == 0 || key < best {
                best = key;
                victim = way;
            }
        }
        Victim::Occupied(victim)
    }
}

/// Builds the boxed policy selected by the configuration.
pub fn from_config(policy: PolicyType) -> Box<dyn ReplacementPolicy + Send + Sync> {
    match policy {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
    }
}
