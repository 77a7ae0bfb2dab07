use crate::campus::DEFAULT_MAX_DISTANCE_KM;
use serde::Deserialize;
use std::path::PathBuf;

/// Caller persona used whenever the registry does not name one.
pub const DEFAULT_CALLER_NAME: &str = "Sunstone Advisor";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Directory holding the reference JSON files.
    pub data_dir: PathBuf,
    pub enrichment: EnrichmentSettings,
}

/// Tunables of the enrichment engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnrichmentSettings {
    /// Search radius for the city branch.
    pub max_campus_distance_km: f64,
    pub default_caller_name: String,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            max_campus_distance_km: DEFAULT_MAX_DISTANCE_KM,
            default_caller_name: DEFAULT_CALLER_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            data_dir: std::env::var("DATA_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            enrichment: EnrichmentSettings {
                max_campus_distance_km: std::env::var("MAX_CAMPUS_DISTANCE_KM")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .map(|raw| parse_distance(&raw))
                    .transpose()?
                    .unwrap_or(DEFAULT_MAX_DISTANCE_KM),
                default_caller_name: match std::env::var("DEFAULT_CALLER_NAME") {
                    Ok(name) if name.trim().is_empty() => {
                        anyhow::bail!("DEFAULT_CALLER_NAME cannot be empty")
                    }
                    Ok(name) => name,
                    Err(_) => DEFAULT_CALLER_NAME.to_string(),
                },
            },
        };

        tracing::debug!("Data directory: {}", config.data_dir.display());
        tracing::debug!(
            "Campus search radius: {} km",
            config.enrichment.max_campus_distance_km
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn parse_distance(raw: &str) -> anyhow::Result<f64> {
    let km: f64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("MAX_CAMPUS_DISTANCE_KM must be a number, got '{}'", raw))?;
    if !km.is_finite() || km <= 0.0 {
        anyhow::bail!("MAX_CAMPUS_DISTANCE_KM must be positive, got {}", km);
    }
    Ok(km)
}
