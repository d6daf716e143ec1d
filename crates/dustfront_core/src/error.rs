//! Error types for the combat simulation.

use thiserror::Error;

/// Result type alias using [`CombatError`].
pub type Result<T> = std::result::Result<T, CombatError>;

/// Top-level error type for combat simulation errors.
///
/// Per-tick gating failures (reload not ready, interval not ready, source
/// disabled) are expected behavior and are never surfaced as errors; this
/// type covers name-registry misuse by the caller only. Descriptor
/// loading and validation failures live in `dustfront_data`.
#[derive(Debug, Error)]
pub enum CombatError {
    /// A fire source name was registered twice on one firing logic.
    #[error("Duplicate fire source name: {0}")]
    DuplicateFireSource(String),

    /// A fire source name was looked up that was never registered.
    #[error("Unknown fire source name: {0}")]
    UnknownFireSource(String),

    /// A gun name was registered twice on one combat mount.
    #[error("Duplicate gun name: {0}")]
    DuplicateGun(String),

    /// A gun name was looked up that was never registered.
    #[error("Unknown gun name: {0}")]
    UnknownGun(String),
}
