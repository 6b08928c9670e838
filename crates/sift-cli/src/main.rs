//! Sift CLI - Payment notification classifier
//!
//! Usage:
//!   sift classify "NETFLIX*13,500원 승인"   Classify one notification
//!   sift search 해지 -k 2                   Look up explanatory text
//!   sift batch --file notifications.csv     Classify a capture export
//!   sift catalog                            List known services

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let engine = commands::open_engine(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify {
            text,
            amount,
            app,
            json,
        } => commands::cmd_classify(&engine, &text, amount, app.as_deref(), json),
        Commands::Normalize { text } => commands::cmd_normalize(&engine, &text),
        Commands::Search { query, k, json } => commands::cmd_search(&engine, &query, k, json),
        Commands::Batch {
            file,
            keep_duplicates,
        } => commands::cmd_batch(&engine, &file, keep_duplicates),
        Commands::Catalog => commands::cmd_catalog(&engine),
    }
}
