//! Common types shared by the cache model and the simulation driver.
//!
//! This module provides:
//! 1. **Address Types:** A strong 32-bit address type and its tag/index decomposition.
//! 2. **Error Handling:** Configuration errors and the crate-level error type.

/// Address type and tag/index decoding.
pub mod addr;

/// Error types for configuration and trace input.
pub mod error;

pub use addr::{Address, DecodedAddr, Geometry};
pub use error::{ConfigError, Result, SimError};
