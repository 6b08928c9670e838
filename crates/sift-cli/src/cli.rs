//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sift - Recognize subscription payments in notification text
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Payment notification classifier and terms lookup", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to the data dir override, then built-in config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify one notification text
    Classify {
        /// Raw notification text
        text: String,

        /// Amount already extracted by the caller (extracted from the text if omitted)
        #[arg(short, long)]
        amount: Option<i64>,

        /// Originating app identifier
        #[arg(long)]
        app: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the normalized form and merchant candidate of a text
    Normalize {
        /// Raw notification text
        text: String,
    },

    /// Search explanatory text chunks
    Search {
        /// Free-text query (e.g. "해지")
        query: String,

        /// Number of chunks to return
        #[arg(short, default_value = "3")]
        k: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a CSV of captured notifications (app_id,text), one JSON result per line
    Batch {
        /// CSV file to read
        #[arg(short, long)]
        file: PathBuf,

        /// Classify repeated notifications instead of dropping them
        #[arg(long)]
        keep_duplicates: bool,
    },

    /// List known services, aliases, and categories
    Catalog,
}
