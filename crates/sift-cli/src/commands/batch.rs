//! Batch classification of captured notification exports

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use sift_core::{dedupe, parse_notifications, ClassificationResult, Engine};
use tracing::info;

pub fn cmd_batch(engine: &Engine, file: &Path, keep_duplicates: bool) -> Result<()> {
    let results = classify_file(engine, file, keep_duplicates)?;

    for result in &results {
        println!("{}", serde_json::to_string(result)?);
    }

    Ok(())
}

/// Read a notification CSV and classify every row
pub fn classify_file(
    engine: &Engine,
    file: &Path,
    keep_duplicates: bool,
) -> Result<Vec<ClassificationResult>> {
    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let mut notifications = parse_notifications(reader)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let total = notifications.len();

    if !keep_duplicates {
        notifications = dedupe(notifications);
    }

    let results: Vec<ClassificationResult> = notifications
        .iter()
        .map(|n| engine.classify_notification(n))
        .collect();

    let matched = results.iter().filter(|r| r.service.is_some()).count();
    info!(
        "Classified {} notifications ({} read, {} matched a service)",
        results.len(),
        total,
        matched
    );

    Ok(results)
}
