//! Application configuration
//!
//! Read from TOML. Resolution order for the file:
//! 1. `--config <path>` or `$LIBRA_CONFIG` (must exist)
//! 2. `<config dir>/libra/config.toml` (used if present)
//! 3. Built-in defaults
//!
//! ```toml
//! [search]
//! debounce_ms = 300
//! max_results = 20
//!
//! [catalog]
//! path = "books.toml"
//! ```

use anyhow::{Context, Result};
use catalog::Catalog;
use debounce::DebounceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Upper bound for `search.max_results`
pub const MAX_RESULTS_LIMIT: usize = 1000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub catalog: CatalogConfig,
}

/// `[search]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiescence window before a search runs (milliseconds)
    pub debounce_ms: u64,
    /// Maximum results printed per search
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: debounce::DEFAULT_WINDOW_MS,
            max_results: 20,
        }
    }
}

/// `[catalog]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalogue file; relative paths are resolved against the config file
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Parse and validate configuration from TOML
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file or the default location
    ///
    /// Returns the configuration and the file it came from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => default_config_path().filter(|path| path.exists()),
        };

        let Some(path) = path else {
            debug!("No config file, using defaults");
            return Ok((Self::default(), None));
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        // Catalogue paths are relative to the config file
        if let (Some(catalog_path), Some(base)) = (&config.catalog.path, path.parent()) {
            if catalog_path.is_relative() {
                config.catalog.path = Some(base.join(catalog_path));
            }
        }

        info!(path = %path.display(), "Loaded configuration");
        Ok((config, Some(path)))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        self.debounce_config()
            .validate()
            .context("Invalid search.debounce_ms")?;

        if self.search.max_results == 0 || self.search.max_results > MAX_RESULTS_LIMIT {
            anyhow::bail!(
                "Invalid search.max_results {}: must be 1-{}",
                self.search.max_results,
                MAX_RESULTS_LIMIT
            );
        }
        Ok(())
    }

    /// Debounce settings for the search box
    pub fn debounce_config(&self) -> DebounceConfig {
        DebounceConfig::with_window_ms(self.search.debounce_ms)
    }

    /// Load the configured catalogue, or the seeded one when none is set
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("Failed to load catalogue {}", path.display())),
            None => Ok(Catalog::seeded()),
        }
    }
}

/// `<config dir>/libra/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("libra").join("config.toml"))
}
