//! Debounce window configuration
//!
//! The window is kept in milliseconds so it reads naturally in TOML:
//!
//! ```toml
//! window_ms = 300
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default quiescence window (milliseconds)
pub const DEFAULT_WINDOW_MS: u64 = 300;

/// Largest accepted quiescence window (milliseconds)
pub const MAX_WINDOW_MS: u64 = 10_000;

/// Debouncer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiescence window in milliseconds (0 defers to the next scheduling
    /// opportunity)
    pub window_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
        }
    }
}

impl DebounceConfig {
    /// Create a configuration with the given window
    pub fn with_window_ms(window_ms: u64) -> Self {
        Self { window_ms }
    }

    /// Parse and validate a configuration from TOML
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the window against the accepted range
    pub fn validate(&self) -> Result<()> {
        if self.window_ms > MAX_WINDOW_MS {
            return Err(Error::InvalidWindow {
                window_ms: self.window_ms,
                max_ms: MAX_WINDOW_MS,
            });
        }
        Ok(())
    }

    /// Window as a `Duration`
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
