/// Brand registry lookups and pitch template filling.
use crate::models::{BrandCategory, BrandRegistry, CollegeInfo};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Template used when a known category has no template configured.
pub const DEFAULT_CATEGORY_TEMPLATE: &str = "Hi, I'm calling about {course}.";

/// Category assumed for a college entry without one.
pub const DEFAULT_COLLEGE_CATEGORY: &str = "medium";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
});

/// Look up a college or brand by code. `None` means unknown.
pub fn get_college<'a>(registry: &'a BrandRegistry, code: &str) -> Option<&'a CollegeInfo> {
    registry.colleges.get(code)
}

/// Look up a brand category by name. `None` means unknown.
pub fn get_category<'a>(registry: &'a BrandRegistry, name: &str) -> Option<&'a BrandCategory> {
    registry.brand_categories.get(name)
}

/// Substitute `{name}` placeholders from `values`.
///
/// Unknown placeholders become empty strings. `{{` and `}}` produce literal
/// braces; any other brace is left as written.
pub fn render_template(template: &str, values: &HashMap<&str, &str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match caps.get(1) {
            Some(name) => values.get(name.as_str()).copied().unwrap_or("").to_string(),
            None => caps[0][..1].to_string(),
        })
        .into_owned()
}

/// Fill a category template for a known college.
///
/// Which fields are bound depends on the category:
/// - `high`: college display name and course
/// - `medium`: city, college short name and course
/// - anything else: city and course
///
/// When the category itself is not registered the literal
/// "calling from {name} about {course} programs" sentence is used. `code` is
/// the raw college or brand string, used wherever the college has no
/// display name.
pub fn fill_template(
    registry: &BrandRegistry,
    category: &str,
    college: &CollegeInfo,
    code: &str,
    city: &str,
    course: &str,
) -> String {
    let display_name = non_empty(college.name.as_deref()).unwrap_or(code);

    let Some(info) = get_category(registry, category) else {
        tracing::debug!("Unknown brand category '{}' for '{}'", category, code);
        return format!("Hi, I'm calling from {display_name} about {course} programs.");
    };
    let template = info.template.as_deref().unwrap_or(DEFAULT_CATEGORY_TEMPLATE);

    let values: HashMap<&str, &str> = match category {
        "high" => HashMap::from([("college_name", display_name), ("course", course)]),
        "medium" => HashMap::from([
            ("city", city),
            (
                "college_short",
                non_empty(college.short.as_deref()).unwrap_or(code),
            ),
            ("course", course),
        ]),
        _ => HashMap::from([("city", city), ("course", course)]),
    };

    render_template(template, &values)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
