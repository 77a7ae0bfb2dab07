/// Speech-synthesis language selection.
///
/// The calling bot supports a fixed set of languages. A lead's preferred
/// language is mapped onto that set and English is always appended as the
/// last resort, since every bot can speak it.
use crate::models::{LanguageSupportMap, StateLanguageMap};

/// Language every bot is guaranteed to support.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Choose TTS languages for `desired`, in priority order.
///
/// - enabled language: used as-is
/// - known but disabled: replaced by its configured fallback
/// - unknown: English
///
/// English is appended when not already present. The result never contains
/// duplicates and is never empty.
pub fn choose_languages(support: &LanguageSupportMap, desired: &str) -> Vec<String> {
    let first = match support.get(desired) {
        Some(entry) if entry.enabled => desired,
        Some(entry) => entry.fallback_to.as_str(),
        None => DEFAULT_LANGUAGE,
    };

    let mut languages = Vec::with_capacity(2);
    push_unique(&mut languages, first);
    push_unique(&mut languages, DEFAULT_LANGUAGE);

    tracing::debug!("TTS languages for '{}': {:?}", desired, languages);
    languages
}

/// Effective language for a lead: explicit preference, else the state's
/// primary language, else English.
pub fn effective_language<'a>(
    state_languages: &'a StateLanguageMap,
    preferred: &'a str,
    state: &str,
) -> &'a str {
    if !preferred.is_empty() {
        return preferred;
    }

    state_languages
        .get(state)
        .and_then(|langs| langs.first())
        .map(String::as_str)
        .unwrap_or(DEFAULT_LANGUAGE)
}

fn push_unique(languages: &mut Vec<String>, language: &str) {
    // A blank fallback in the support table would otherwise become a TTS entry.
    if language.is_empty() || languages.iter().any(|l| l == language) {
        return;
    }
    languages.push(language.to_string());
}
