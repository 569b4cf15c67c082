//! Text folding for label matching.

use std::ops::RangeInclusive;

const COMBINING_MARKS: RangeInclusive<char> = '\u{300}'..='\u{36f}';

/// Lower-case `text` and strip Portuguese diacritics.
///
/// `"Logística"` folds to `"logistica"`, `"Híbrido"` to `"hibrido"`.
/// Decomposed input loses its combining marks the same way.
pub fn fold(text: &str) -> String {
    text.chars()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Whether folded `haystack` contains any of the folded `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    !haystack.is_empty() && needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold("Logística"), "logistica");
        assert_eq!(fold("HÍBRIDO"), "hibrido");
        assert_eq!(fold("Títulos e Val. Mob."), "titulos e val. mob.");
        assert_eq!(fold("Saneamento e Energia"), "saneamento e energia");
    }

    #[test]
    fn test_fold_drops_combining_marks() {
        assert_eq!(fold("Logi\u{301}stica"), "logistica");
        assert_eq!(fold("Ti\u{301}tulos"), fold("Títulos"));
        assert_eq!(fold("Hi\u{301}brido"), "hibrido");
    }

    #[test]
    fn test_contains_any_on_empty_haystack() {
        assert!(!contains_any("", &["infra"]));
        assert!(contains_any("fi-infra", &["agro", "infra"]));
    }
}
