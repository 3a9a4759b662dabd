//! Interactive search: every stdin line is the new search-box contents

use super::Context;
use anyhow::{Context as _, Result};
use cli_lib::{output, SearchSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

pub async fn run(ctx: &Context, grade: Option<u8>) -> Result<()> {
    let session = SearchSession::new(
        ctx.catalog.clone(),
        &ctx.config.debounce_config(),
        ctx.config.search.max_results,
        grade,
        |outcome| output::print_outcome(&outcome),
    )?;

    info!(window = ?session.window(), "Interactive search started");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // One signal future for the whole loop so an interrupt between lines is not lost
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read search input")? {
                    Some(line) => session.edit(&line),
                    None => {
                        // End of input: show the last query without waiting
                        session.finish();
                        break;
                    }
                }
            }
            _ = &mut ctrl_c => {
                session.clear();
                info!("Interrupted, pending search dropped");
                break;
            }
        }
    }

    let stats = session.stats();
    debug!(
        edits = stats.calls,
        searches = stats.executions(),
        superseded = stats.superseded,
        "Interactive search finished"
    );
    Ok(())
}
