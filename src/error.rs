//! Error taxonomy.
//!
//! Every failure is fatal to the call that produced it: there is no
//! partial result and nothing to retry.

use thiserror::Error;

/// Errors raised by geometry lookups, constructors, and the GA.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// The problem instance cannot yield any tour (no cities, count
    /// mismatch, non-finite coordinates).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A configuration value or call argument is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A tour is not a permutation of `0..n`.
    #[error("malformed tour: {0}")]
    MalformedTour(String),

    /// A city id outside `0..n`.
    #[error("city index {index} out of range for {len} cities")]
    InvalidIndex {
        /// Offending city id.
        index: usize,
        /// Number of cities in the instance.
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;
