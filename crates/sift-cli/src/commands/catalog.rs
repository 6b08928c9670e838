//! Catalog command implementation

use anyhow::Result;
use sift_core::Engine;

use super::truncate;

pub fn cmd_catalog(engine: &Engine) -> Result<()> {
    let catalog = engine.catalog();

    if catalog.is_empty() {
        println!("No services configured. Add [[services]] to the engine config.");
        return Ok(());
    }

    println!();
    println!(
        "📇 Services ({} services, {} aliases)",
        catalog.len(),
        catalog.alias_count()
    );
    println!("   ─────────────────────────────────────────────────────────────");
    for (service, aliases) in catalog.iter() {
        let category = engine
            .category(service)
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();
        println!(
            "   • {}{}: {}",
            service,
            category,
            truncate(&aliases.join(", "), 60)
        );
    }

    Ok(())
}
