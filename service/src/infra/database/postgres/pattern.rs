//! [`Contains`] pattern definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL `LIKE` pattern matching text containing the provided input literally.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct Contains(String);

impl Contains {
    /// Creates a new [`Contains`] pattern out of the given `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let escaped = input
            .replace('\\', r"\\")
            .replace('%', r"\%")
            .replace('_', r"\_");
        Self(format!("%{escaped}%"))
    }
}

#[cfg(test)]
mod spec {
    use super::Contains;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(Contains::new("jo").to_string(), "%jo%");
        assert_eq!(Contains::new("50%_a\\b").to_string(), r"%50\%\_a\\b%");
    }
}
