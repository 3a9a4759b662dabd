//! Libra search front-end
//!
//! Shared pieces of the `libra` binary: configuration loading, the debounced
//! search session and terminal output.

pub mod config;
pub mod output;
pub mod session;

pub use config::AppConfig;
pub use session::{SearchOutcome, SearchSession};
