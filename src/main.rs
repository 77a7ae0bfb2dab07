use lead_intel_api::config::Config;
use lead_intel_api::enrichment::LeadEnricher;
use lead_intel_api::handlers::AppState;
use lead_intel_api::reference_data::ReferenceData;
use lead_intel_api::routes::build_router;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes logging, loads configuration and the reference data (once,
/// shared read-only by every request), then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_intel_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let data = Arc::new(ReferenceData::load_from_dir(&config.data_dir)?);

    let app_state = Arc::new(AppState {
        enricher: LeadEnricher::new(data, config.enrichment.clone()),
    });

    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
