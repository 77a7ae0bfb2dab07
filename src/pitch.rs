/// Pitch builder: picks who calls the lead and what they open with.
///
/// Priority is strict: a college always wins, then a city, then the nurture
/// fallback. Unknown reference data degrades to literal sentences, so every
/// path ends with a non-empty caller and pitch.
use crate::brand::{self, non_empty, render_template, DEFAULT_CATEGORY_TEMPLATE};
use crate::campus;
use crate::config::EnrichmentSettings;
use crate::models::{CollegeInfo, Lead, Pitch};
use crate::reference_data::ReferenceData;
use std::collections::HashMap;

/// Registry code of the brand used when a lead names neither college nor city.
pub const NURTURE_BRAND: &str = "nurture";

/// Category assumed for the nurture entry when it has none.
const NURTURE_DEFAULT_CATEGORY: &str = "low";

/// Which resolution path a lead takes. Inputs are trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch<'a> {
    College { code: &'a str, city: &'a str },
    City { city: &'a str, state: &'a str },
    Nurture { state: &'a str },
}

impl<'a> Branch<'a> {
    pub fn for_lead(lead: &'a Lead) -> Self {
        let college = lead.college.trim();
        let city = lead.city.trim();
        let state = lead.state.trim();

        if !college.is_empty() {
            Branch::College {
                code: college,
                city,
            }
        } else if !city.is_empty() {
            Branch::City { city, state }
        } else {
            Branch::Nurture { state }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Branch::College { .. } => "college",
            Branch::City { .. } => "city",
            Branch::Nurture { .. } => "nurture",
        }
    }
}

pub struct PitchBuilder<'a> {
    data: &'a ReferenceData,
    settings: &'a EnrichmentSettings,
}

impl<'a> PitchBuilder<'a> {
    pub fn new(data: &'a ReferenceData, settings: &'a EnrichmentSettings) -> Self {
        Self { data, settings }
    }

    pub fn build_pitch(&self, lead: &Lead) -> Pitch {
        let course = lead.course.trim();
        let branch = Branch::for_lead(lead);

        let pitch = match branch {
            Branch::College { code, city } => self.college_pitch(code, city, course),
            Branch::City { city, state } => self.city_pitch(city, state, course),
            Branch::Nurture { state } => self.nurture_pitch(state, course),
        };

        tracing::debug!(
            "Built {} pitch with caller '{}'",
            branch.name(),
            pitch.caller_name
        );
        pitch
    }

    fn college_pitch(&self, code: &str, city: &str, course: &str) -> Pitch {
        match brand::get_college(&self.data.brands, code) {
            Some(college) => self.branded_pitch(college, code, city, course),
            None => {
                tracing::debug!("Unknown college '{}', using literal pitch", code);
                self.advisor_pitch(format!(
                    "Hi, I'm calling from {code} about {course} programs."
                ))
            }
        }
    }

    fn city_pitch(&self, city: &str, state: &str, course: &str) -> Pitch {
        let nearby = campus::find_nearby(
            &self.data.campuses,
            city,
            state,
            self.settings.max_campus_distance_km,
        );

        let branded = campus::pick_brand(&nearby).and_then(|code| {
            brand::get_college(&self.data.brands, code).map(|college| (code, college))
        });

        match branded {
            Some((code, college)) => self.branded_pitch(college, code, city, course),
            None => {
                tracing::debug!("No known brand near '{}', using literal pitch", city);
                self.advisor_pitch(format!(
                    "Hi, I'm calling about educational opportunities in {city} for {course}."
                ))
            }
        }
    }

    // The nurture branch is only taken without a city, so the location is
    // always the state and a `low` category always gets the state sentence.
    fn nurture_pitch(&self, state: &str, course: &str) -> Pitch {
        let location = state;
        let generic = || {
            format!(
                "Hi, I'm calling from Sunstone about educational opportunities in {location}. Are you interested in pursuing {course}?"
            )
        };

        let Some(nurture) = brand::get_college(&self.data.brands, NURTURE_BRAND) else {
            tracing::warn!("Brand registry has no '{}' entry", NURTURE_BRAND);
            return self.advisor_pitch(generic());
        };

        let category = non_empty(nurture.category.as_deref()).unwrap_or(NURTURE_DEFAULT_CATEGORY);

        let pitch_text = match brand::get_category(&self.data.brands, category) {
            None => generic(),
            Some(_) if category == "low" => format!(
                "Hi, I'm calling from Sunstone in {state}. I noticed you're interested in {course}. Would you like to know more about our programs?"
            ),
            Some(info) => {
                let template = info.template.as_deref().unwrap_or(DEFAULT_CATEGORY_TEMPLATE);
                let values = HashMap::from([("location", location), ("course", course)]);
                let rendered = render_template(template, &values);
                if rendered.trim().is_empty() {
                    generic()
                } else {
                    rendered
                }
            }
        };

        Pitch {
            caller_name: self.caller_name(nurture),
            pitch_text,
        }
    }

    /// Pitch for a registered college or brand, from its category template.
    fn branded_pitch(&self, college: &CollegeInfo, code: &str, city: &str, course: &str) -> Pitch {
        let category =
            non_empty(college.category.as_deref()).unwrap_or(brand::DEFAULT_COLLEGE_CATEGORY);

        let mut pitch_text =
            brand::fill_template(&self.data.brands, category, college, code, city, course);
        if pitch_text.trim().is_empty() {
            tracing::warn!("Template for category '{}' rendered empty for '{}'", category, code);
            let name = non_empty(college.name.as_deref()).unwrap_or(code);
            pitch_text = format!("Hi, I'm calling from {name} about {course} programs.");
        }

        Pitch {
            caller_name: self.caller_name(college),
            pitch_text,
        }
    }

    fn caller_name(&self, college: &CollegeInfo) -> String {
        non_empty(college.caller_name.as_deref())
            .unwrap_or(self.settings.default_caller_name.as_str())
            .to_string()
    }

    fn advisor_pitch(&self, pitch_text: String) -> Pitch {
        Pitch {
            caller_name: self.settings.default_caller_name.clone(),
            pitch_text,
        }
    }
}
