//! Classification command implementations

use anyhow::Result;
use sift_core::models::META_APP_ID;
use sift_core::{ClassificationResult, Engine, RawNotification};

pub fn cmd_classify(
    engine: &Engine,
    text: &str,
    amount: Option<i64>,
    app: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = classify_text(engine, text, amount, app);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    match &result.service {
        Some(service) => println!("✅ {} ({:.0}% confidence)", service, result.confidence * 100.0),
        None => println!(
            "❔ Unclassified (best score {:.0}%)",
            result.confidence * 100.0
        ),
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Normalized:  {}", result.normalized_text);
    println!("   Merchant:    {}", result.merchant);
    if let Some(category) = &result.category {
        println!("   Category:    {}", category);
    }
    match result.period_days {
        Some(days) => println!("   Billing:     every {} days", days),
        None => println!("   Billing:     unknown ({})", result.period_reason),
    }
    if let Some(amount) = result.amount() {
        println!("   Amount:      {}", amount);
    }

    Ok(())
}

/// Classify a single text the way the capture layer would
///
/// With an explicit amount the text is classified as-is; otherwise the amount
/// and payment keyword are extracted from the text first.
pub fn classify_text(
    engine: &Engine,
    text: &str,
    amount: Option<i64>,
    app: Option<&str>,
) -> ClassificationResult {
    match amount {
        Some(amount) => {
            let mut result = engine.classify(text, Some(amount));
            if let Some(app) = app {
                result.metadata.insert(META_APP_ID.to_string(), app.into());
            }
            result
        }
        None => engine.classify_notification(&RawNotification::new(app.unwrap_or_default(), text)),
    }
}

pub fn cmd_normalize(engine: &Engine, text: &str) -> Result<()> {
    let normalizer = engine.classifier().normalizer();
    let normalized = normalizer.normalize(text);
    let merchant = normalizer.extract_merchant(&normalized);

    println!("Normalized: {}", normalized);
    println!("Merchant:   {}", merchant);

    Ok(())
}
