//! Error Type Tests.
//!
//! Checks the messages users see for rejected configurations and the
//! conversions into the top-level `SimError`.

use csim_core::common::{ConfigError, SimError};

#[test]
fn config_error_messages_are_descriptive() {
    assert_eq!(
        ConfigError::ArgumentCount { found: 3 }.to_string(),
        "Expected 6 arguments, found 3"
    );
    assert_eq!(
        ConfigError::NotPowerOfTwo {
            param: "Number of sets",
            value: 3
        }
        .to_string(),
        "Number of sets must be a positive power of 2, got 3"
    );
    assert_eq!(
        ConfigError::BlockSizeTooSmall { value: 2 }.to_string(),
        "Block size must be a power of 2 and at least 4, got 2"
    );
    assert_eq!(
        ConfigError::NoWriteAllocateWithWriteBack.to_string(),
        "no-write-allocate cannot be combined with write-back"
    );
    assert_eq!(
        ConfigError::UnknownReplacementPolicy("mru".into()).to_string(),
        "Eviction policy must be 'lru' or 'fifo', got 'mru'"
    );
}

#[test]
fn config_error_converts_transparently() {
    let err: SimError = ConfigError::NoWriteAllocateWithWriteBack.into();
    assert!(matches!(err, SimError::Config(_)));
    assert_eq!(
        err.to_string(),
        "no-write-allocate cannot be combined with write-back"
    );
}

#[test]
fn io_error_converts() {
    let err: SimError = std::io::Error::other("disk on fire").into();
    assert!(matches!(err, SimError::Io(_)));
    assert!(err.to_string().contains("disk on fire"));
}
