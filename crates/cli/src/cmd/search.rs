//! One-shot search

use super::Context;
use anyhow::Result;
use catalog::SearchQuery;
use cli_lib::output;

pub async fn run(ctx: &Context, text: &str, grade: Option<u8>) -> Result<()> {
    let query = SearchQuery::parse(text).with_default_grade(grade);
    let results = ctx.catalog.search(&query, ctx.config.search.max_results);
    output::print_results(&query, &results);
    Ok(())
}
