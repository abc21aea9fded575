//! Free-text search helpers.

use std::{array, slice};

/// Case variants of a search query, matched against text fields with a
/// logical OR.
///
/// Consists of the query as typed, lower-cased, upper-cased and title-cased.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaseVariants([String; 4]);

impl CaseVariants {
    /// Creates [`CaseVariants`] of the provided `query`.
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self([
            query.to_owned(),
            query.to_lowercase(),
            query.to_uppercase(),
            title_case(query),
        ])
    }

    /// Returns an iterator over the variants.
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Checks whether the provided `text` contains any of the variants.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.iter().any(|v| text.contains(v.as_str()))
    }
}

impl IntoIterator for CaseVariants {
    type Item = String;
    type IntoIter = array::IntoIter<String, 4>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CaseVariants {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Converts the provided `text` to title case: the first letter of every
/// whitespace-separated word is upper-cased, the rest are lower-cased.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod spec {
    use super::{title_case, CaseVariants};

    #[test]
    fn produces_four_variants() {
        let variants = CaseVariants::new("jo");

        assert_eq!(
            variants.iter().map(String::as_str).collect::<Vec<_>>(),
            ["jo", "jo", "JO", "Jo"],
        );
    }

    #[test]
    fn matches_any_variant() {
        let variants = CaseVariants::new("jo");

        for forename in ["Jo", "JO", "jo", "Johanna", "Marjory"] {
            assert!(variants.matches(forename), "`{forename}` must match");
        }
        assert!(!variants.matches("jO"));
        assert!(!variants.matches("Anne"));
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("mary ann"), "Mary Ann");
        assert_eq!(title_case("McDONALD"), "Mcdonald");
        assert_eq!(title_case("  lead "), "  Lead ");
        assert_eq!(title_case(""), "");
    }
}
