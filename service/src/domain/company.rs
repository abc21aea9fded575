//! [`Company`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

#[cfg(doc)]
use crate::domain::{
    code::{BusType, CompStatus},
    User,
};
use crate::domain::{
    code::ShortCode,
    contact::{Email, Phone},
    user, Notes,
};

/// Client company the office places candidates with.
#[derive(Clone, Debug)]
pub struct Company {
    /// ID of this [`Company`].
    pub id: Id,

    /// [`Name`] of this [`Company`].
    pub name: Name,

    /// [`Email`] of this [`Company`], if known.
    pub email: Option<Email>,

    /// [`Phone`] of this [`Company`], if known.
    pub phone: Option<Phone>,

    /// [`Website`] of this [`Company`], if known.
    pub website: Option<Website>,

    /// [`Notes`] about this [`Company`].
    pub notes: Option<Notes>,

    /// ID of the [`User`] consulting this [`Company`], if assigned.
    pub consultant: Option<user::Id>,

    /// [`ShortCode`] of the [`CompStatus`] of this [`Company`].
    pub status: ShortCode,

    /// [`ShortCode`] of the [`BusType`] of this [`Company`].
    pub business_type: ShortCode,

    /// ID of the [`User`] who created this [`Company`].
    pub created_by: Option<user::Id>,

    /// ID of the [`User`] who last updated this [`Company`].
    pub updated_by: Option<user::Id>,

    /// [`DateTime`] when this [`Company`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Company`] was last updated.
    pub updated_at: ModificationDateTime,
}

define_id! {
    /// ID of a [`Company`].
    Id
}

define_text! {
    /// Name of a [`Company`].
    Name, max = 512
}

/// Website address of a [`Company`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Website(String);

impl Website {
    /// Creates a new [`Website`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Website`].
    ///
    /// The scheme is optional, as people type `www.example.com` mostly.
    fn check(address: &str) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(https?://)?[^\s/$.?#]+\.[^\s]+$")
                .expect("valid regex")
        });

        address.len() <= 2048 && REGEX.is_match(address)
    }
}

impl FromStr for Website {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Website`")
    }
}

/// [`DateTime`] when a [`Company`] was created.
pub type CreationDateTime = DateTimeOf<(Company, unit::Creation)>;

/// [`DateTime`] when a [`Company`] was last updated.
pub type ModificationDateTime = DateTimeOf<(Company, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::Website;

    #[test]
    fn accepts_website_with_or_without_scheme() {
        for address in [
            "www.example.com",
            "https://example.co.uk/careers",
            "http://jobs.example.org",
        ] {
            assert!(Website::new(address).is_some(), "`{address}` rejected");
        }
        for address in ["example", "https://", "www example.com"] {
            assert!(Website::new(address).is_none(), "`{address}` accepted");
        }
    }
}
