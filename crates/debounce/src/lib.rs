//! Trailing-edge debouncing on top of the tokio timer
//!
//! This crate provides:
//! - `Debouncer`: coalesces bursts of calls into one deferred call
//! - `KeyedDebouncer`: one independent pending slot per key
//! - `DebounceConfig`: the quiescence window as loadable configuration
//!
//! Every call re-arms a single pending timer. The wrapped operation only runs
//! once no further call arrives within the window, and it receives the
//! arguments of the last call in the burst.

pub mod config;
pub mod debouncer;
pub mod error;
pub mod keyed;

mod pending;

// Re-exports
pub use config::{DebounceConfig, DEFAULT_WINDOW_MS, MAX_WINDOW_MS};
pub use debouncer::{debounce, DebounceStats, Debouncer};
pub use error::{Error, Result};
pub use keyed::KeyedDebouncer;
