//! Cleaning pipeline for the raw resource sheet
//!
//! Mirrors the preprocessing the published datasets went through: drop
//! French-language rows and rows missing a name or description, re-categorize
//! every listing from description keywords, then sort and de-duplicate.

use tracing::info;

use crate::models::{Resource, normalize_label};
use std::collections::HashSet;

/// Phrases that mark a French-language row
const FRENCH_MARKERS: [&str; 10] = [
    "le ",
    "la ",
    "les ",
    "des ",
    "du ",
    "de ",
    "centre de santé",
    "et ",
    "santé mentale",
    "clinique de",
];

const CRISIS_KEYWORDS: [&str; 7] = [
    "crisis",
    "distress",
    "suicide",
    "helpline",
    "hotline",
    "talk line",
    "emergency",
];

const YOUTH_KEYWORDS: [&str; 9] = [
    "youth",
    "student",
    "teen",
    "young adult",
    "child",
    "adolescent",
    "campus",
    "school",
    "college",
];

const INDIGENOUS_KEYWORDS: [&str; 7] = [
    "indigenous",
    "first nation",
    "metis",
    "inuit",
    "aboriginal",
    "native friendship",
    "tribal",
];

const HOSPITAL_KEYWORDS: [&str; 6] = [
    "hospital",
    "clinic",
    "health centre",
    "psychiatric",
    "inpatient",
    "outpatient",
];

const COUNSELLING_KEYWORDS: [&str; 7] = [
    "counsel",
    "therapy",
    "support group",
    "psychotherapy",
    "family service",
    "wellness",
    "community centre",
];

/// Assign a canonical category from description keywords, first match wins.
#[must_use]
pub fn classify_category(description: &str) -> &'static str {
    let haystack = description.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| haystack.contains(k));

    if contains_any(&CRISIS_KEYWORDS) {
        "Crisis & Distress Support"
    } else if contains_any(&YOUTH_KEYWORDS) {
        "Youth & Student Services"
    } else if contains_any(&INDIGENOUS_KEYWORDS) {
        "Indigenous Support"
    } else if contains_any(&HOSPITAL_KEYWORDS) {
        "Hospitals & Health Centres"
    } else if contains_any(&COUNSELLING_KEYWORDS) {
        "Community Counselling"
    } else {
        "Other Mental Health Service"
    }
}

fn is_french_row(resource: &Resource) -> bool {
    let haystack = format!(
        "{} {} {} {} {}",
        resource.name,
        resource.description,
        resource.address,
        resource.category_display,
        resource.city
    )
    .to_lowercase();
    FRENCH_MARKERS.iter().any(|marker| haystack.contains(marker))
}

/// Run the full cleaning pipeline over freshly converted resources.
pub fn clean_resources(resources: Vec<Resource>) -> Vec<Resource> {
    let initial = resources.len();

    let mut cleaned: Vec<Resource> = resources
        .into_iter()
        .filter(|r| !r.name.is_empty() && !r.description.is_empty())
        .filter(|r| !is_french_row(r))
        .map(|mut r| {
            let category = classify_category(&r.description);
            r.category_display = category.to_string();
            r.category = normalize_label(category);
            r
        })
        .collect();

    cleaned.sort_by(|a, b| {
        (&a.province, &a.city, &a.category, a.name.to_lowercase()).cmp(&(
            &b.province,
            &b.city,
            &b.category,
            b.name.to_lowercase(),
        ))
    });

    // De-duplicate on (name, city, province, address), first occurrence wins.
    let mut seen = HashSet::new();
    cleaned.retain(|r| {
        seen.insert((
            r.name.to_lowercase(),
            r.city.clone(),
            r.province.clone(),
            r.address.to_lowercase(),
        ))
    });

    info!(
        "Cleaned resource sheet: {} rows in, {} rows out",
        initial,
        cleaned.len()
    );
    cleaned
}
