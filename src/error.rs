//! Error types.
//!
//! Cache operations themselves never fail: degenerate configuration is
//! normalized and oversized entries are dropped. Errors only come from the
//! edges of the crate, the metrics decorator's constructor and the
//! persistence hooks of [`ByteCache`](crate::ByteCache).

use thiserror::Error;

/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Metrics namespace is empty or contains characters other than
    /// ASCII letters, digits and `_`.
    #[error("invalid metrics namespace: {0:?}")]
    InvalidNamespace(String),

    /// I/O failure while reading or writing a cache snapshot.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
