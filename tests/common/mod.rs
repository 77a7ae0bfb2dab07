#![allow(dead_code)]

use lead_intel_api::config::EnrichmentSettings;
use lead_intel_api::enrichment::LeadEnricher;
use lead_intel_api::models::Lead;
use lead_intel_api::reference_data::ReferenceData;
use std::path::PathBuf;
use std::sync::Arc;

/// Sample reference data shipped with the repository.
pub fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn sample_data() -> Arc<ReferenceData> {
    Arc::new(ReferenceData::load_from_dir(sample_data_dir()).expect("sample data loads"))
}

pub fn sample_enricher() -> LeadEnricher {
    LeadEnricher::new(sample_data(), EnrichmentSettings::default())
}

pub fn lead(college: &str, city: &str, state: &str, course: &str, language: &str) -> Lead {
    Lead {
        college: college.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        course: course.to_string(),
        language: language.to_string(),
    }
}
