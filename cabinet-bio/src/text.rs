//! Accent-insensitive text folding and comparison.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for matching:
/// - NFD decomposition with combining marks dropped (`é` → `e`)
/// - lowercase
/// - whitespace collapsed to single spaces
///
/// ```
/// use cabinet_bio::text::fold;
///
/// assert_eq!(fold("  Assemblée   Nationale "), "assemblee nationale");
/// assert_eq!(fold("Août"), "aout");
/// ```
pub fn fold(s: &str) -> String {
    let stripped: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Locale-aware comparison: folded keys first, raw strings as the tie
/// breaker so the order stays total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_and_case_are_ignored() {
        assert_eq!(fold("Sénat"), fold("SENAT"));
        assert_eq!(fold("Collectivités\tterritoriales"), "collectivites territoriales");
    }

    #[test]
    fn comparison_is_accent_insensitive_and_total() {
        assert_eq!(compare_text("Économie", "Education"), Ordering::Greater);
        assert_eq!(compare_text("élan", "Emploi"), Ordering::Less);
        assert_ne!(compare_text("Sénat", "Senat"), Ordering::Equal);
        assert_eq!(compare_text("Adjoint", "Adjoint"), Ordering::Equal);
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("début de mandat"), "Début de mandat");
        assert_eq!(capitalize("été"), "Été");
        assert_eq!(capitalize(""), "");
    }
}
