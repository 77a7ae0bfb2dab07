use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

// ============ Request / Response Models ============

/// A sales lead as received from the dialer.
///
/// Optional fields default to an empty string rather than being absent, so the
/// pitch logic only ever has to test for emptiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Lead {
    /// College or brand code (optional).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub college: String,
    /// City name (optional).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    /// State name (required, non-empty).
    pub state: String,
    /// Course the lead is interested in (required).
    pub course: String,
    /// Preferred language (optional). Derived from the state when empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
}

/// Lead enriched with caller identity, pitch and speech-synthesis languages.
///
/// The original lead fields are echoed back untouched (untrimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnrichedLead {
    #[serde(flatten)]
    pub lead: Lead,
    /// Persona that should place the call.
    pub caller_name: String,
    /// Opening pitch sentence.
    pub pitch_text: String,
    /// TTS languages in priority order. Never empty, always contains English.
    pub tts_languages: Vec<String>,
}

/// Caller identity and pitch produced by the pitch builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pitch {
    pub caller_name: String,
    pub pitch_text: String,
}

/// Outcome of a single lead inside a batch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BatchItemResult {
    Ok(EnrichedLead),
    Error(String),
}

// ============ Reference Data Models ============

/// State name -> languages spoken there, primary language first.
pub type StateLanguageMap = HashMap<String, Vec<String>>;

/// A physical campus belonging to a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campus {
    pub brand: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub latitude: Option<Coordinate>,
    #[serde(default)]
    pub longitude: Option<Coordinate>,
}

impl Campus {
    /// Both coordinates are present (not null and not blank).
    ///
    /// Presence says nothing about validity: a present coordinate may still
    /// fail to parse when the distance is computed.
    pub fn has_coordinates(&self) -> bool {
        let present = |c: &Option<Coordinate>| c.as_ref().is_some_and(|c| !c.is_blank());
        present(&self.latitude) && present(&self.longitude)
    }
}

/// A coordinate as found in the campus file: either a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Degrees(f64),
    Text(String),
}

impl Coordinate {
    pub fn is_blank(&self) -> bool {
        matches!(self, Coordinate::Text(s) if s.trim().is_empty())
    }

    /// Numeric value in degrees, if it can be read as one.
    pub fn degrees(&self) -> Option<f64> {
        match self {
            Coordinate::Degrees(v) => Some(*v),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(v: f64) -> Self {
        Coordinate::Degrees(v)
    }
}

/// Per-call copy of a campus with its distance from the lead's city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampusMatch {
    #[serde(flatten)]
    pub campus: Campus,
    pub distance_km: f64,
}

/// Display metadata for a college or brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub caller_name: Option<String>,
}

/// Pitch template for a brand category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandCategory {
    #[serde(default)]
    pub template: Option<String>,
}

/// Brand registry: colleges keyed by code and templates keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRegistry {
    #[serde(default)]
    pub colleges: HashMap<String, CollegeInfo>,
    #[serde(default)]
    pub brand_categories: HashMap<String, BrandCategory>,
}

/// Whether the calling bot can speak a language, and what to use instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSupport {
    #[serde(default, deserialize_with = "flag_from_bool_or_int")]
    pub enabled: bool,
    #[serde(default = "default_fallback_language")]
    pub fallback_to: String,
}

pub type LanguageSupportMap = HashMap<String, LanguageSupport>;

fn default_fallback_language() -> String {
    crate::language::DEFAULT_LANGUAGE.to_string()
}

/// Accepts `true`/`false` as well as the `1`/`0` flags used by older data files.
fn flag_from_bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(i)) => i == 1,
        None => false,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
