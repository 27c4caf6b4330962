//! Tests for the shared address and error types.


/// Error messages and conversions.
pub mod error;
