//! Libra CLI - libra command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

/// Libra - search the school-book catalogue as you type
#[derive(Parser)]
#[command(name = "libra")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/libra/config.toml)
    #[arg(long, global = true, env = "LIBRA_CONFIG")]
    config: Option<PathBuf>,

    /// Override the search debounce window in milliseconds
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once and print the results
    Search {
        /// Title or author text (empty lists everything)
        text: Vec<String>,
        /// Only books for this grade
        #[arg(long)]
        grade: Option<u8>,
    },
    /// Read search-box contents from stdin, one edit per line
    Interactive {
        /// Only books for this grade (unless a line says grade:<n>)
        #[arg(long)]
        grade: Option<u8>,
    },
    /// Type a query one keystroke at a time and report how many searches ran
    Simulate {
        /// Text to type
        text: String,
        /// Delay between keystrokes in milliseconds
        #[arg(long, default_value = "80")]
        keystroke_ms: u64,
        /// Only books for this grade
        #[arg(long)]
        grade: Option<u8>,
    },
    /// Show the most recently added books
    Featured {
        /// Number of books to show
        #[arg(long, default_value = "9")]
        limit: usize,
    },
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = cmd::Context::load(cli.config.as_deref(), cli.debounce_ms)?;

    match cli.command {
        Commands::Search { text, grade } => cmd::search::run(&ctx, &text.join(" "), grade).await,
        Commands::Interactive { grade } => cmd::interactive::run(&ctx, grade).await,
        Commands::Simulate {
            text,
            keystroke_ms,
            grade,
        } => cmd::simulate::run(&ctx, &text, keystroke_ms, grade).await,
        Commands::Featured { limit } => cmd::featured::run(&ctx, limit).await,
        Commands::Config => cmd::config::run(&ctx).await,
    }
}
