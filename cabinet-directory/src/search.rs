use std::cmp::Ordering;

use cabinet_bio::text::{compare_text, fold};
use serde::{Deserialize, Serialize};

use crate::minister::Minister;
use crate::page::{Page, Pageable};

/// Directory sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Protocol rank, unranked last, then name.
    #[default]
    Rank,
    Name,
    Role,
    Party,
}

impl SortKey {
    /// Parse a sort name. Unknown names sort by rank.
    pub fn from_name(name: &str) -> Self {
        match fold(name).as_str() {
            "name" | "nom" => SortKey::Name,
            "role" | "fonction" => SortKey::Role,
            "party" | "parti" => SortKey::Party,
            _ => SortKey::Rank,
        }
    }

    fn compare(self, a: &Minister, b: &Minister) -> Ordering {
        let by_name = || compare_text(&a.full_name, &b.full_name);
        match self {
            SortKey::Rank => match (a.rank, b.rank) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(by_name),
            SortKey::Name => by_name(),
            SortKey::Role => compare_text(&a.role, &b.role).then_with(by_name),
            SortKey::Party => compare_optional(a.party.as_deref(), b.party.as_deref()).then_with(by_name),
        }
    }
}

/// Present values first, compared as text.
fn compare_optional(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_text(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Search, filter, sort and page request over the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryQuery {
    /// Accent- and case-insensitive substring over name, role, party and
    /// portfolio.
    pub search: Option<String>,
    /// Exact party, compared folded.
    pub party: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub pageable: Pageable,
}

impl DirectoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_party(mut self, party: impl Into<String>) -> Self {
        self.party = Some(party.into());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: u64, size: u64) -> Self {
        self.pageable = Pageable::new(page, size);
        self
    }

    fn matches(&self, minister: &Minister, term: Option<&str>, party: Option<&str>) -> bool {
        let term_ok = term.map_or(true, |t| fold(&minister.haystack()).contains(t));
        let party_ok = party.map_or(true, |p| {
            minister.party.as_deref().map(fold).as_deref() == Some(p)
        });
        term_ok && party_ok
    }
}

/// Filter, sort and page `ministers`.
///
/// ```
/// use cabinet_directory::{search, DirectoryQuery, Minister};
///
/// let ministers = vec![
///     Minister { full_name: "Hélène Roux".into(), role: "Ministre de l'Éducation".into(), ..Default::default() },
///     Minister { full_name: "Paul Girard".into(), role: "Ministre des Armées".into(), ..Default::default() },
/// ];
/// let page = search(&ministers, &DirectoryQuery::new().with_search("education"));
/// assert_eq!(page.total_elements, 1);
/// assert_eq!(page.content[0].full_name, "Hélène Roux");
/// ```
pub fn search(ministers: &[Minister], query: &DirectoryQuery) -> Page<Minister> {
    let term = query
        .search
        .as_deref()
        .map(fold)
        .filter(|t| !t.is_empty());
    let party = query.party.as_deref().map(fold).filter(|p| !p.is_empty());

    let mut hits: Vec<Minister> = ministers
        .iter()
        .filter(|m| query.matches(m, term.as_deref(), party.as_deref()))
        .cloned()
        .collect();
    hits.sort_by(|a, b| query.sort.compare(a, b));

    Page::slice(hits, &query.pageable)
}
