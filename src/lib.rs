//! Lead Intelligence API Library
//!
//! Resolves a sparse sales lead (college, city, state, course, language) into
//! the caller persona, opening pitch and speech-synthesis languages an AI
//! dialer should use.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Enrichment engine.
//! - `brand`: Brand registry lookups and pitch templates.
//! - `campus`: Nearest-campus matching.
//! - `config`: Configuration management.
//! - `enrichment`: Lead enrichment orchestrator.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `language`: TTS language selection.
//! - `models`: Request, response and reference data models.
//! - `pitch`: College / city / nurture pitch builder.
//! - `reference_data`: Startup loading of reference files.
//! - `routes`: Router construction.

pub mod api;
pub mod core;

pub mod brand;
pub mod campus;
pub mod config;
pub mod enrichment;
pub mod errors;
pub mod handlers;
pub mod language;
pub mod models;
pub mod pitch;
pub mod reference_data;
pub mod routes;
