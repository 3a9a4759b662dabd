//! Product records

use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Lowest school grade a book can target
pub const MIN_GRADE: u8 = 1;

/// Highest school grade a book can target
pub const MAX_GRADE: u8 = 9;

fn default_stock() -> u32 {
    100
}

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    /// School grade (1-9)
    pub grade: u8,
    /// Unit price in euros
    pub price: f64,
    #[serde(default = "default_stock")]
    pub stock: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Check field ranges
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| CatalogError::InvalidProduct {
            id: self.id,
            reason: reason.to_string(),
        };

        if self.title.trim().is_empty() {
            return Err(invalid("title must not be empty"));
        }
        if !(MIN_GRADE..=MAX_GRADE).contains(&self.grade) {
            return Err(invalid(&format!(
                "grade {} outside {}-{}",
                self.grade, MIN_GRADE, MAX_GRADE
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(invalid("price must be a non-negative number"));
        }
        Ok(())
    }

    /// Case-insensitive substring match on title or author
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self
                .author
                .as_deref()
                .is_some_and(|author| author.to_lowercase().contains(needle))
    }
}
