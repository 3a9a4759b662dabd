//! CLI command implementations

pub mod config;
pub mod featured;
pub mod interactive;
pub mod search;
pub mod simulate;

use anyhow::Result;
use catalog::Catalog;
use cli_lib::AppConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a command needs, loaded once at startup
pub struct Context {
    pub config: AppConfig,
    /// File the configuration came from, if any
    pub config_path: Option<PathBuf>,
    pub catalog: Arc<Catalog>,
}

impl Context {
    pub fn load(config_path: Option<&Path>, debounce_ms: Option<u64>) -> Result<Self> {
        let (mut config, config_path) = AppConfig::load(config_path)?;

        if let Some(debounce_ms) = debounce_ms {
            config.search.debounce_ms = debounce_ms;
            config.validate()?;
        }

        let catalog = Arc::new(config.load_catalog()?);

        Ok(Self {
            config,
            config_path,
            catalog,
        })
    }
}
