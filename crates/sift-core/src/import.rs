//! CSV import of captured notifications
//!
//! Expected format (header required, extra columns ignored):
//! `app_id,text`

use std::collections::HashSet;
use std::io::Read;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::RawNotification;

/// Parse notifications from CSV
///
/// Columns are located by header name so exports with extra columns (post
/// time, title) still load. Rows with an empty text cell are skipped.
pub fn parse_notifications<R: Read>(reader: R) -> Result<Vec<RawNotification>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let text_idx = column("text")
        .ok_or_else(|| Error::Import("Missing 'text' column in header".into()))?;
    let app_idx = column("app_id");

    let mut notifications = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let text = match record.get(text_idx) {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => {
                debug!("Skipping row {} with no text", line + 2);
                skipped += 1;
                continue;
            }
        };
        let app_id = app_idx
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim()
            .to_string();

        notifications.push(RawNotification { app_id, text });
    }

    debug!(
        "Parsed {} notifications ({} empty rows skipped)",
        notifications.len(),
        skipped
    );
    Ok(notifications)
}

/// Drop repeated notifications (same app, same text), keeping the first
pub fn dedupe(notifications: Vec<RawNotification>) -> Vec<RawNotification> {
    let mut seen = HashSet::new();
    let before = notifications.len();
    let unique: Vec<RawNotification> = notifications
        .into_iter()
        .filter(|n| seen.insert(n.fingerprint()))
        .collect();

    if unique.len() < before {
        debug!("Dropped {} duplicate notifications", before - unique.len());
    }
    unique
}
