/// Reference data loaded once at startup and shared read-only afterwards.
///
/// Files are read from a data directory:
///
/// | file                          | contents                         |
/// |-------------------------------|----------------------------------|
/// | `state_language_map.json`     | state -> languages, primary first |
/// | `campus_coverage.json[.gz]`   | campus list                      |
/// | `brand_registry.json`         | colleges and brand categories    |
/// | `bot_language_support.json`   | language -> enabled/fallback     |
///
/// A missing file leaves that collection empty (logged as a warning) so the
/// service still answers with fallbacks. A file that exists but cannot be
/// parsed aborts startup.
use crate::models::{BrandRegistry, Campus, LanguageSupportMap, StateLanguageMap};
use anyhow::Context;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const STATE_LANGUAGE_FILE: &str = "state_language_map.json";
pub const CAMPUS_FILE: &str = "campus_coverage.json";
pub const CAMPUS_GZ_FILE: &str = "campus_coverage.json.gz";
pub const BRAND_REGISTRY_FILE: &str = "brand_registry.json";
pub const LANGUAGE_SUPPORT_FILE: &str = "bot_language_support.json";

#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub state_languages: StateLanguageMap,
    pub campuses: Vec<Campus>,
    pub brands: BrandRegistry,
    pub language_support: LanguageSupportMap,
    pub loaded_at: DateTime<Utc>,
}

/// Collection sizes reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDataSummary {
    pub states: usize,
    pub campuses: usize,
    pub colleges: usize,
    pub brand_categories: usize,
    pub languages: usize,
    pub loaded_at: DateTime<Utc>,
}

impl ReferenceData {
    pub fn new(
        state_languages: StateLanguageMap,
        campuses: Vec<Campus>,
        brands: BrandRegistry,
        language_support: LanguageSupportMap,
    ) -> Self {
        Self {
            state_languages,
            campuses,
            brands,
            language_support,
            loaded_at: Utc::now(),
        }
    }

    /// Load every reference file from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        tracing::info!("Loading reference data from {}", dir.display());

        let state_languages: StateLanguageMap = read_json_or_default(dir, STATE_LANGUAGE_FILE)?;
        let campuses = load_campuses(dir)?;
        let brands: BrandRegistry = read_json_or_default(dir, BRAND_REGISTRY_FILE)?;
        let language_support: LanguageSupportMap =
            read_json_or_default(dir, LANGUAGE_SUPPORT_FILE)?;

        let data = Self::new(state_languages, campuses, brands, language_support);
        let summary = data.summary();
        tracing::info!(
            "Reference data loaded: {} states, {} campuses, {} colleges, {} categories, {} languages",
            summary.states,
            summary.campuses,
            summary.colleges,
            summary.brand_categories,
            summary.languages
        );

        Ok(data)
    }

    pub fn summary(&self) -> ReferenceDataSummary {
        ReferenceDataSummary {
            states: self.state_languages.len(),
            campuses: self.campuses.len(),
            colleges: self.brands.colleges.len(),
            brand_categories: self.brands.brand_categories.len(),
            languages: self.language_support.len(),
            loaded_at: self.loaded_at,
        }
    }
}

fn load_campuses(dir: &Path) -> anyhow::Result<Vec<Campus>> {
    let plain = dir.join(CAMPUS_FILE);
    if plain.exists() {
        return read_json_or_default(dir, CAMPUS_FILE);
    }

    let gz = dir.join(CAMPUS_GZ_FILE);
    if !gz.exists() {
        tracing::warn!(
            "Neither {} nor {} found in {}, campus matching disabled",
            CAMPUS_FILE,
            CAMPUS_GZ_FILE,
            dir.display()
        );
        return Ok(Vec::new());
    }

    let file = File::open(&gz).with_context(|| format!("Failed to open {}", gz.display()))?;
    let mut json = String::new();
    GzDecoder::new(BufReader::new(file))
        .read_to_string(&mut json)
        .with_context(|| format!("Failed to decompress {}", gz.display()))?;

    serde_json::from_str(&json).with_context(|| format!("Invalid JSON in {}", gz.display()))
}

fn read_json_or_default<T>(dir: &Path, name: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    let path = dir.join(name);
    if !path.exists() {
        tracing::warn!("Reference file {} not found, using empty data", path.display());
        return Ok(T::default());
    }

    let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid JSON in {}", path.display()))
}
