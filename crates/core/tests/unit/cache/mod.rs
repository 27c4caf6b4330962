//! Tests for the cache model and its replacement policies.

/// Set/block bookkeeping, install, and dirty handling.
pub mod cache_model;

/// LRU and FIFO victim selection.
pub mod policies;
