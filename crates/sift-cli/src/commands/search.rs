//! Retrieval command implementation

use anyhow::Result;
use sift_core::Engine;

use super::truncate;

pub fn cmd_search(engine: &Engine, query: &str, k: usize, json: bool) -> Result<()> {
    let chunks: Vec<_> = engine.search(query, k).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    if chunks.is_empty() {
        println!("No chunks available. Add [[chunks]] to the engine config.");
        return Ok(());
    }

    println!();
    println!("📚 Results for '{}'", query);
    println!("   ─────────────────────────────────────────────────────────────");
    for (rank, chunk) in chunks.iter().enumerate() {
        println!("   {}. [{}] {}", rank + 1, chunk.source, truncate(&chunk.text, 70));
    }

    Ok(())
}
