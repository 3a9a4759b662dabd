//! Show the effective configuration

use super::Context;
use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;

pub async fn run(ctx: &Context) -> Result<()> {
    println!("{}", "Configuration".bold());
    match &ctx.config_path {
        Some(path) => println!("{}: {}\n", "Location".dimmed(), path.display()),
        None => println!("{}: {}\n", "Location".dimmed(), "built-in defaults".dimmed()),
    }

    let rendered = toml::to_string_pretty(&ctx.config).context("Failed to render configuration")?;
    print!("{}", rendered);

    println!("\n{}", "Catalogue:".bold());
    println!("  {} books", ctx.catalog.len());

    println!("\n{}", "Valid Ranges:".bold());
    println!("  search.debounce_ms: 0-{}", debounce::MAX_WINDOW_MS);
    println!("  search.max_results: 1-{}", cli_lib::config::MAX_RESULTS_LIMIT);

    Ok(())
}
