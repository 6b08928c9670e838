//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `classify` - Single-text classification and normalization preview
//! - `batch` - CSV batch classification
//! - `search` - Explanatory text lookup
//! - `catalog` - Catalog listing

pub mod batch;
pub mod catalog;
pub mod classify;
pub mod search;

// Re-export command functions for main.rs
pub use batch::*;
pub use catalog::*;
pub use classify::*;
pub use search::*;

use std::path::Path;

use anyhow::{Context, Result};
use sift_core::Engine;

/// Build the engine from an explicit config path, the data dir override, or
/// the embedded defaults
pub fn open_engine(config: Option<&Path>) -> Result<Engine> {
    Engine::load(config).context("Failed to load engine config")
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
