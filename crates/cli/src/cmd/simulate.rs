//! Keystroke simulation
//!
//! Types the text one character at a time, feeding every prefix to the
//! debounced search, then reports how many searches actually ran.

use super::Context;
use anyhow::Result;
use cli_lib::{output, SearchSession};
use owo_colors::OwoColorize;
use std::time::Duration;
use tokio::time::sleep;

pub async fn run(ctx: &Context, text: &str, keystroke_ms: u64, grade: Option<u8>) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Nothing to type");
    }

    let session = SearchSession::new(
        ctx.catalog.clone(),
        &ctx.config.debounce_config(),
        ctx.config.search.max_results,
        grade,
        |outcome| output::print_outcome(&outcome),
    )?;

    let keystroke = Duration::from_millis(keystroke_ms);
    for (index, ch) in text.char_indices() {
        session.edit(&text[..index + ch.len_utf8()]);
        sleep(keystroke).await;
    }

    // Let the last window run out; flush covers a timer that has not been
    // polled yet
    sleep(session.window()).await;
    session.finish();

    let stats = session.stats();
    println!(
        "{} {} keystrokes, {} searches ran, {} superseded {}",
        "Typed".bold(),
        stats.calls,
        stats.executions().to_string().green(),
        stats.superseded,
        format!(
            "(keystroke {}ms, window {}ms)",
            keystroke_ms,
            session.window().as_millis()
        )
        .dimmed()
    );
    Ok(())
}
