//! School-book catalogue and search
//!
//! This crate provides:
//! - Product records and TOML catalogue loading
//! - The built-in seeded catalogue
//! - Search queries (title/author substring, optional grade filter)

pub mod catalog;
pub mod product;
pub mod query;

use std::path::PathBuf;
use thiserror::Error;

// Re-exports
pub use catalog::Catalog;
pub use product::{Product, MAX_GRADE, MIN_GRADE};
pub use query::SearchQuery;

/// Result type for catalogue operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalogue loading and validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("product {id}: {reason}")]
    InvalidProduct { id: u32, reason: String },

    #[error("duplicate product id {0}")]
    DuplicateId(u32),
}

/// Format a price in euros, e.g. `4.50 €`
pub fn format_eur(value: f64) -> String {
    format!("{:.2} €", value)
}
