//! Grouping and display ordering of career entries.

use std::cmp::Ordering;

use serde::Serialize;

use crate::entry::NormalizedCareerEntry;
use crate::text::{compare_text, fold};

/// Label for entries without a category.
pub const UNCATEGORIZED: &str = "Autres";

/// Sort index assumed for entries without one.
pub const DEFAULT_SORT_INDEX: i64 = 9999;

/// Display order of known categories, with the folded spellings each one
/// accepts.
pub const CATEGORY_ORDER: &[(&str, &[&str])] = &[
    (
        "Gouvernement",
        &["gouvernement", "government", "fonctions gouvernementales"],
    ),
    (
        "Assemblée nationale",
        &["assemblee nationale", "assemblee", "depute", "deputee", "national assembly"],
    ),
    ("Sénat", &["senat", "senateur", "senatrice", "senate"]),
    (
        "Parti politique",
        &["parti politique", "partis politiques", "parti", "political party"],
    ),
    (
        "Mandats locaux",
        &["mandats locaux", "mandat local", "elu local", "local mandates"],
    ),
    (
        "Collectivités territoriales",
        &[
            "collectivites territoriales",
            "collectivite territoriale",
            "collectivites locales",
            "local authorities",
        ],
    ),
    ("Société civile", &["societe civile", "civil society"]),
    (
        "Vie professionnelle",
        &[
            "vie professionnelle",
            "parcours professionnel",
            "carriere professionnelle",
            "experience professionnelle",
            "professional life",
        ],
    ),
    (
        "Administrations et associations",
        &[
            "administrations et associations",
            "administration",
            "administrations",
            "association",
            "associations",
        ],
    ),
    (
        "Formation académique",
        &["formation academique", "formation", "etudes", "education"],
    ),
];

/// Entries sharing a category, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiographyGroup {
    pub label: String,
    pub entries: Vec<NormalizedCareerEntry>,
    /// Index in [`CATEGORY_ORDER`], or its length for unlisted categories.
    pub order: usize,
}

/// Position of `category` in [`CATEGORY_ORDER`].
pub fn category_rank(category: &str) -> Option<usize> {
    let folded = fold(category);
    CATEGORY_ORDER
        .iter()
        .position(|(_, variants)| variants.contains(&folded.as_str()))
}

/// Display label and rank for a raw category.
fn classify(category: &str) -> (String, usize) {
    let category = category.trim();
    if category.is_empty() {
        return (UNCATEGORIZED.to_string(), CATEGORY_ORDER.len());
    }
    match category_rank(category) {
        Some(rank) => (CATEGORY_ORDER[rank].0.to_string(), rank),
        None => (category.to_string(), CATEGORY_ORDER.len()),
    }
}

/// Within-group order: sort index ascending (missing as
/// [`DEFAULT_SORT_INDEX`]), start date descending (missing last), title.
pub fn compare_entries(a: &NormalizedCareerEntry, b: &NormalizedCareerEntry) -> Ordering {
    a.sort_index
        .unwrap_or(DEFAULT_SORT_INDEX)
        .cmp(&b.sort_index.unwrap_or(DEFAULT_SORT_INDEX))
        .then_with(|| b.start_date.cmp(&a.start_date))
        .then_with(|| compare_text(&a.title, &b.title))
}

/// Group entries by category and order groups and entries for display.
///
/// Categories matching the same known section (`Sénat`, `senat`) share a
/// group under its canonical label. Unlisted categories come after listed
/// ones, ordered by label.
pub fn group_entries(entries: Vec<NormalizedCareerEntry>) -> Vec<BiographyGroup> {
    let mut groups: Vec<(String, BiographyGroup)> = Vec::new();

    for entry in entries {
        let (label, order) = classify(&entry.category);
        let key = fold(&label);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.entries.push(entry),
            None => groups.push((
                key,
                BiographyGroup {
                    label,
                    entries: vec![entry],
                    order,
                },
            )),
        }
    }

    let mut groups: Vec<BiographyGroup> = groups.into_iter().map(|(_, group)| group).collect();
    for group in &mut groups {
        group.entries.sort_by(compare_entries);
    }
    groups.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| compare_text(&a.label, &b.label))
    });
    groups
}
