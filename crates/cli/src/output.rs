//! Terminal rendering of search results

use crate::session::SearchOutcome;
use catalog::{format_eur, Product, SearchQuery};
use owo_colors::OwoColorize;

/// Print a search result block
///
/// Takes the borrowed rows `Catalog::search` returns.
pub fn print_results(query: &SearchQuery, results: &[&Product]) {
    println!(
        "{} {} {}",
        "Results for".bold(),
        format!("'{}'", query).cyan(),
        format!("({})", results.len()).dimmed()
    );

    if results.is_empty() {
        println!("  {}", "No books found".yellow());
        return;
    }

    for product in results {
        print_product(product);
    }
}

/// Print the results of a debounced search
pub fn print_outcome(outcome: &SearchOutcome) {
    let results: Vec<&Product> = outcome.results.iter().collect();
    print_results(&outcome.query, &results);
    println!();
}

/// Print one product row
pub fn print_product(product: &Product) {
    let author = product.author.as_deref().unwrap_or("-");
    println!(
        "  {:>3}  {:<24} {:<18} {}  {}",
        product.id.to_string().dimmed(),
        product.title,
        author.dimmed(),
        format!("grade {}", product.grade).yellow(),
        format_eur(product.price).green()
    );
}
