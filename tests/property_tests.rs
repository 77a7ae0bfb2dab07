/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
mod common;

use common::{lead, sample_data, sample_enricher};
use lead_intel_api::brand::render_template;
use lead_intel_api::campus::find_nearby;
use lead_intel_api::language::{choose_languages, DEFAULT_LANGUAGE};
use lead_intel_api::pitch::Branch;
use proptest::prelude::*;
use std::collections::HashMap;

const LANGUAGES: &[&str] = &[
    "English", "Hindi", "Hinglish", "Tamil", "Marathi", "Kannada", "Telugu", "Malayalam",
    "Bengali", "Gujarati", "Urdu", "Assamese", "Klingon", "",
];

const STATES: &[&str] = &[
    "Uttar Pradesh", "Maharashtra", "Madhya Pradesh", "Rajasthan", "Karnataka", "Kerala",
    "Delhi", "Atlantis",
];

const COLLEGES: &[&str] = &["", "ADYPU", "GDG", "SHU", "nurture", "Unknown College"];

const CITIES: &[&str] = &[
    "Ghaziabad", "Noida", "Greater Noida", "Pune", "Indore", "Jaipur", "Mysuru", "Lucknow", "",
];

// Property: TTS language selection
proptest! {
    #[test]
    fn tts_languages_always_contain_english(desired in "\\PC*") {
        let data = sample_data();
        let languages = choose_languages(&data.language_support, &desired);
        prop_assert!(!languages.is_empty());
        prop_assert!(languages.iter().any(|l| l == DEFAULT_LANGUAGE));
    }

    #[test]
    fn tts_languages_follow_support_table(desired in prop::sample::select(LANGUAGES)) {
        let data = sample_data();
        let languages = choose_languages(&data.language_support, desired);

        let expected_first = match data.language_support.get(desired) {
            Some(entry) if entry.enabled => desired,
            Some(entry) => entry.fallback_to.as_str(),
            None => DEFAULT_LANGUAGE,
        };
        prop_assert_eq!(languages[0].as_str(), expected_first);

        let mut deduped = languages.clone();
        deduped.dedup();
        prop_assert_eq!(deduped, languages);
    }
}

// Property: campus distance ordering
proptest! {
    #[test]
    fn nearby_campuses_sorted_and_bounded(
        city in prop::sample::select(CITIES),
        state in prop::sample::select(STATES),
        max_km in 1.0f64..500.0
    ) {
        let data = sample_data();
        let nearby = find_nearby(&data.campuses, city, state, max_km);

        prop_assert!(nearby.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        prop_assert!(nearby.iter().all(|m| m.distance_km == 0.0 || m.distance_km <= max_km));
        prop_assert!(nearby.iter().all(|m| m.campus.state == state));
    }
}

// Property: branch priority and enrichment invariants
proptest! {
    #[test]
    fn non_empty_college_always_takes_college_branch(
        college in "[A-Za-z]{1,12}",
        city in prop::sample::select(CITIES),
    ) {
        let l = lead(&college, city, "Uttar Pradesh", "BBA", "");
        let is_college = matches!(Branch::for_lead(&l), Branch::College { .. });
        prop_assert!(is_college);
    }

    #[test]
    fn enrichment_always_produces_usable_record(
        college in prop::sample::select(COLLEGES),
        city in prop::sample::select(CITIES),
        state in prop::sample::select(STATES),
        course in "[A-Za-z. ]{0,10}",
        language in prop::sample::select(LANGUAGES),
    ) {
        let enricher = sample_enricher();
        let input = lead(college, city, state, &course, language);

        let first = enricher.enrich(&input).unwrap();
        prop_assert!(!first.caller_name.trim().is_empty());
        prop_assert!(!first.pitch_text.trim().is_empty());
        prop_assert!(first.tts_languages.iter().any(|l| l == DEFAULT_LANGUAGE));
        prop_assert_eq!(&first.lead, &input);

        // no hidden state between calls
        prop_assert_eq!(enricher.enrich(&input).unwrap(), first);
    }
}

// Property: template substitution never panics
proptest! {
    #[test]
    fn render_template_never_panics(template in "\\PC*", value in "\\PC*") {
        let values = HashMap::from([("course", value.as_str()), ("city", "Pune")]);
        let _ = render_template(&template, &values);
    }

    #[test]
    fn templates_without_braces_are_unchanged(template in "[^{}]*") {
        let values = HashMap::from([("course", "MBA")]);
        prop_assert_eq!(render_template(&template, &values), template);
    }
}
