//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest block in a set regardless of how recently it was
//! accessed. Install order is the only input: a block's `arrival_time` is set once
//! when it is installed and hits never change it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1), a no-op
//!   - `select_victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** One timestamp per block, no per-set state
//! - **Best Case:** Streaming accesses where all blocks have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (hot blocks age out)

use super::ReplacementPolicy;
use crate::cache::{Block, Clock};

/// FIFO Policy. Stateless: age lives in each block's `arrival_time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Hits do not affect FIFO order; neither the block nor the clock changes.
    fn on_hit(&self, _block: &mut Block, _clock: &mut Clock) {}

    fn eviction_key(&self, block: &Block) -> u32 {
        block.arrival_time
    }
}
