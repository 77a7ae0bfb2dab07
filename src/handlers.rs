use crate::enrichment::LeadEnricher;
use crate::errors::AppError;
use crate::models::{BatchItemResult, EnrichedLead, Lead};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

/// Largest number of leads accepted in one batch request.
pub const MAX_BATCH_SIZE: usize = 500;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Enrichment engine over the startup reference data.
    pub enricher: LeadEnricher,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lead Intelligence API",
        description = "AI dialer lead enrichment microservice"
    ),
    paths(health, enrich_lead, enrich_lead_batch),
    components(schemas(Lead, EnrichedLead, BatchItemResult))
)]
pub struct ApiDoc;

/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Lead Intelligence API is running!" }))
}

/// Health check endpoint.
///
/// Returns the service status, version and the size of the loaded reference data.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-intel-api",
            "version": env!("CARGO_PKG_VERSION"),
            "reference_data": state.enricher.data().summary(),
        })),
    )
}

/// POST /enrich_lead
///
/// Enriches a lead with caller name, pitch text and TTS languages.
///
/// - College given: the college's registry entry decides caller and template
/// - City given: the nearest campus within the search radius decides
/// - Neither: the nurture brand is used with the state as location
#[utoipa::path(
    post,
    path = "/enrich_lead",
    request_body = Lead,
    responses(
        (status = 200, description = "Lead enriched", body = EnrichedLead),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Missing or empty required field")
    )
)]
pub async fn enrich_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Lead>, JsonRejection>,
) -> Result<Json<EnrichedLead>, AppError> {
    let Json(lead) = payload.map_err(rejection_to_error)?;
    tracing::debug!("POST /enrich_lead - lead: {:?}", lead);

    let enriched = state.enricher.enrich(&lead)?;
    Ok(Json(enriched))
}

/// POST /enrich_lead/batch
///
/// Enriches up to `MAX_BATCH_SIZE` leads. Each item succeeds or fails on its own.
#[utoipa::path(
    post,
    path = "/enrich_lead/batch",
    request_body = Vec<Lead>,
    responses(
        (status = 200, description = "Per-lead results in request order", body = Vec<BatchItemResult>),
        (status = 400, description = "Malformed JSON body or batch too large"),
        (status = 422, description = "A lead is missing a required field")
    )
)]
pub async fn enrich_lead_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<Lead>>, JsonRejection>,
) -> Result<Json<Vec<BatchItemResult>>, AppError> {
    let Json(leads) = payload.map_err(rejection_to_error)?;

    if leads.len() > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Batch of {} leads exceeds the limit of {}",
            leads.len(),
            MAX_BATCH_SIZE
        )));
    }

    tracing::info!("POST /enrich_lead/batch - {} lead(s)", leads.len());
    Ok(Json(state.enricher.enrich_batch(&leads)))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Missing or mistyped fields are validation failures (422); anything else
/// wrong with the body is a bad request.
fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
        other => AppError::BadRequest(other.body_text()),
    }
}
