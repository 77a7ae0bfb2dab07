/// Lead enrichment orchestrator.
///
/// Turns a `Lead` into an `EnrichedLead`:
/// 1. Validate that a state was given
/// 2. Work out the effective language (explicit, else the state's primary one)
/// 3. Build caller identity and pitch
/// 4. Choose TTS languages
///
/// Everything here is synchronous and side-effect free, so a single
/// `LeadEnricher` can be shared across every request.
use crate::config::EnrichmentSettings;
use crate::errors::{AppError, ResultExt};
use crate::language;
use crate::models::{BatchItemResult, EnrichedLead, Lead};
use crate::pitch::PitchBuilder;
use crate::reference_data::ReferenceData;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LeadEnricher {
    data: Arc<ReferenceData>,
    settings: EnrichmentSettings,
}

impl LeadEnricher {
    pub fn new(data: Arc<ReferenceData>, settings: EnrichmentSettings) -> Self {
        Self { data, settings }
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Enrich a single lead. Fails only when `state` is empty.
    pub fn enrich(&self, lead: &Lead) -> Result<EnrichedLead, AppError> {
        let state = lead.state.trim();
        if state.is_empty() {
            return Err(AppError::Validation("State is required".to_string()));
        }

        let effective =
            language::effective_language(&self.data.state_languages, &lead.language, state);

        let pitch = PitchBuilder::new(&self.data, &self.settings).build_pitch(lead);
        let tts_languages = language::choose_languages(&self.data.language_support, effective);

        tracing::info!(
            "Enriched lead for state '{}' (language: {}, caller: {})",
            state,
            effective,
            pitch.caller_name
        );

        Ok(EnrichedLead {
            lead: lead.clone(),
            caller_name: pitch.caller_name,
            pitch_text: pitch.pitch_text,
            tts_languages,
        })
    }

    /// Enrich each lead independently, keeping input order.
    pub fn enrich_batch(&self, leads: &[Lead]) -> Vec<BatchItemResult> {
        leads
            .iter()
            .enumerate()
            .map(|(idx, lead)| {
                match self
                    .enrich(lead)
                    .with_context(|| format!("Batch lead #{}", idx))
                {
                    Ok(enriched) => BatchItemResult::Ok(enriched),
                    Err(e) => {
                        tracing::warn!("{}", e);
                        BatchItemResult::Error(e.client_message())
                    }
                }
            })
            .collect()
    }
}
