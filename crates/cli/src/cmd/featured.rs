//! Show the latest additions to the catalogue

use super::Context;
use anyhow::Result;
use cli_lib::output;
use owo_colors::OwoColorize;

pub async fn run(ctx: &Context, limit: usize) -> Result<()> {
    println!("{}", "Featured books".bold());
    for product in ctx.catalog.featured(limit) {
        output::print_product(product);
    }
    Ok(())
}
