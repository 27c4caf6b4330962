//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has gone longest without being touched.
//! Every hit and every install stamps the block with the current logical clock
//! value, so the valid block with the smallest `last_access_time` is the LRU one.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** One timestamp per block, no per-set state
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans one block larger than the set (every access misses)

use super::ReplacementPolicy;
use crate::cache::{Block, Clock};

/// LRU Policy. Stateless: recency lives in each block's `last_access_time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Stamps the block with the current clock value, then advances the clock.
    fn on_hit(&self, block: &mut Block, clock: &mut Clock) {
        block.last_access_time = clock.tick();
    }

    fn eviction_key(&self, block: &Block) -> u32 {
        block.last_access_time
    }
}
