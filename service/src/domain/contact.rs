//! Contact details shared by [`User`]s, [`Candidate`]s and [`Company`]s.
//!
//! [`Candidate`]: crate::domain::Candidate
//! [`Company`]: crate::domain::Company
//! [`User`]: crate::domain::User

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

/// Email address, always stored lower-cased.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    ///
    /// The `address` is lower-cased, so two [`Email`]s differing only in
    /// case are equal.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref().to_lowercase();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: &str) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        address.len() <= 320 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number, in any human-typed notation.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: &str) -> bool {
        /// Regular expression checking [`Phone`] format: digits with an
        /// optional leading `+`, spaces, dashes and parentheses.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[\d\s\-()]{6,20}$").expect("valid regex")
        });

        REGEX.is_match(number)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Phone};

    #[test]
    fn lower_cases_email() {
        let email = Email::new("Ann.Smith@Example.COM").unwrap();

        assert_eq!(AsRef::<str>::as_ref(&email), "ann.smith@example.com");
        assert_eq!(email, Email::new("ann.smith@example.com").unwrap());
    }

    #[test]
    fn rejects_malformed_email() {
        for address in ["", "ann", "ann@", "@example.com", "ann @x.io"] {
            assert!(Email::new(address).is_none(), "`{address}` accepted");
        }
    }

    #[test]
    fn accepts_typed_phone_numbers() {
        for number in ["+44 20 7946 0958", "(020) 7946-0958", "0123456"] {
            assert!(Phone::new(number).is_some(), "`{number}` rejected");
        }
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new("12").is_none());
    }
}
