//! Enrich a JSON file of leads offline, without starting the server.
//!
//! Usage: `enrich_file <leads.json>` where the file holds an array of leads.
//! Reference data is read from `DATA_DIR` (default `data`). Results are
//! printed to stdout as a JSON array in input order.

use anyhow::Context;
use lead_intel_api::config::Config;
use lead_intel_api::enrichment::LeadEnricher;
use lead_intel_api::models::{BatchItemResult, Lead};
use lead_intel_api::reference_data::ReferenceData;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: enrich_file <leads.json>")?;

    let config = Config::from_env()?;
    let data = Arc::new(ReferenceData::load_from_dir(&config.data_dir)?);
    let enricher = LeadEnricher::new(data, config.enrichment);

    let raw = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    let leads: Vec<Lead> =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON array of leads", path))?;

    let results = enricher.enrich_batch(&leads);
    let failed = results
        .iter()
        .filter(|r| matches!(r, BatchItemResult::Error(_)))
        .count();

    println!("{}", serde_json::to_string_pretty(&results)?);
    eprintln!(
        "=== {} lead(s): {} enriched, {} failed ===",
        results.len(),
        results.len() - failed,
        failed
    );

    Ok(())
}
