//! Debounced search session
//!
//! Binds a search box to the catalogue. Every edit replaces the pending
//! search; the search only runs once typing pauses for the debounce window.

use catalog::{Catalog, Product, SearchQuery};
use debounce::{DebounceConfig, DebounceStats, Debouncer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Results of one executed search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub results: Vec<Product>,
}

/// Search box state
pub struct SearchSession {
    debouncer: Debouncer<SearchQuery>,
    default_grade: Option<u8>,
}

impl SearchSession {
    /// Create a session; `on_results` is called with every search that runs
    ///
    /// Must be called inside a tokio runtime.
    pub fn new<F>(
        catalog: Arc<Catalog>,
        debounce: &DebounceConfig,
        max_results: usize,
        default_grade: Option<u8>,
        on_results: F,
    ) -> debounce::Result<Self>
    where
        F: Fn(SearchOutcome) + Send + Sync + 'static,
    {
        let debouncer = Debouncer::from_config(debounce, move |query: SearchQuery| {
            let results: Vec<Product> = catalog
                .search(&query, max_results)
                .into_iter()
                .cloned()
                .collect();
            debug!(%query, results = results.len(), "Search ran");
            on_results(SearchOutcome { query, results });
        })?;

        Ok(Self {
            debouncer,
            default_grade,
        })
    }

    /// Register the search box's new contents
    pub fn edit(&self, input: &str) {
        let query = SearchQuery::parse(input).with_default_grade(self.default_grade);
        trace!(%query, "Search box edited");
        self.debouncer.call(query);
    }

    /// Run the pending search now, if any
    pub fn finish(&self) -> bool {
        self.debouncer.flush()
    }

    /// Drop the pending search without running it
    pub fn clear(&self) -> bool {
        self.debouncer.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn window(&self) -> Duration {
        self.debouncer.window()
    }

    pub fn stats(&self) -> DebounceStats {
        self.debouncer.stats()
    }
}
