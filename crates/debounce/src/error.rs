//! Error types for the debounce crate

use thiserror::Error;

/// Result type for debounce operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a debouncer or loading its configuration
///
/// Calling, cancelling and flushing a debouncer never fail. Panics raised by
/// the wrapped operation are not represented here: they unwind the timer task
/// that ran it.
#[derive(Debug, Error)]
pub enum Error {
    /// No tokio runtime was running on the constructing thread
    #[error("debouncer must be created inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// Window outside the accepted range
    #[error("debounce window {window_ms}ms exceeds the maximum of {max_ms}ms")]
    InvalidWindow { window_ms: u64, max_ms: u64 },

    /// Configuration could not be parsed
    #[error("invalid debounce configuration: {0}")]
    Config(#[from] toml::de::Error),
}
