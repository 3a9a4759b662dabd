//! Product catalogue
//!
//! Catalogues are either the built-in seed set or loaded from TOML:
//!
//! ```toml
//! [[products]]
//! id = 1
//! title = "Abetare"
//! author = "Grupi Autorëve"
//! grade = 1
//! price = 4.50
//! ```

use crate::product::Product;
use crate::query::SearchQuery;
use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Built-in catalogue: (grade, title, author, price)
const SEED_PRODUCTS: &[(u8, &str, &str, f64)] = &[
    (1, "Abetare", "Grupi Autorëve", 4.50),
    (1, "Matematikë 1", "A. Hoxha", 5.90),
    (2, "Gjuha Shqipe 2", "M. Krasniqi", 6.20),
    (2, "Matematikë 2", "R. Berisha", 6.50),
    (3, "Dituri Natyre 3", "E. Dervishi", 7.00),
    (3, "Leximi 3", "N. Gashi", 6.80),
    (4, "Gjuha Shqipe 4", "A. Islami", 7.20),
    (4, "Matematikë 4", "L. Shala", 7.40),
    (5, "Histori 5", "K. Rexhepi", 8.30),
    (5, "Gjeografi 5", "B. Peci", 8.10),
    (6, "Biologji 6", "D. Sahiti", 9.20),
    (6, "Fizikë 6", "A. Aliu", 9.50),
    (7, "Kimi 7", "E. Mustafa", 10.20),
    (7, "Letërsi 7", "R. Krasniqi", 10.00),
    (8, "Matematikë 8", "S. Hoxha", 11.50),
    (8, "Gjeometri 8", "M. Mehmeti", 11.00),
    (9, "Fizikë 9", "L. Berisha", 12.40),
    (9, "Gjuha Shqipe 9", "V. Hoti", 12.00),
];

/// An immutable set of products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalogue, validating every product and rejecting duplicate ids
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// The built-in catalogue (two books per grade)
    pub fn seeded() -> Self {
        let products = SEED_PRODUCTS
            .iter()
            .enumerate()
            .map(|(index, &(grade, title, author, price))| Product {
                id: index as u32 + 1,
                title: title.to_string(),
                author: Some(author.to_string()),
                grade,
                price,
                stock: 100,
                description: Some(format!("Liber mësimor për klasën {}.", grade)),
            })
            .collect();
        Self { products }
    }

    /// Parse a catalogue from TOML
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let raw: Catalog = toml::from_str(input)?;
        Self::new(raw.products)
    }

    /// Load a catalogue file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), products = catalog.len(), "loaded catalogue");
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Search by title/author text and optional grade
    ///
    /// Empty text matches everything. Results are ordered by title, then id,
    /// and truncated to `limit`.
    pub fn search(&self, query: &SearchQuery, limit: usize) -> Vec<&Product> {
        let needle = query.needle();
        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| query.grade.map_or(true, |grade| product.grade == grade))
            .filter(|product| product.matches_text(&needle))
            .collect();

        results.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        results.truncate(limit);
        results
    }

    /// Most recently added products (highest ids first)
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        let mut results: Vec<&Product> = self.products.iter().collect();
        results.sort_by(|a, b| b.id.cmp(&a.id));
        results.truncate(limit);
        results
    }
}
