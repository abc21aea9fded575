//! Domain definitions.

/// Defines a [`Uuid`]-based identifier of an entity.
///
/// [`Uuid`]: uuid::Uuid
macro_rules! define_id {
    ($(#[doc = $doc:literal])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            ::derive_more::From,
            ::derive_more::FromStr,
            Hash,
            ::derive_more::Into,
            PartialEq,
            ::serde::Serialize,
        )]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent),
        )]
        pub struct $name(::uuid::Uuid);

        impl $name {
            #[doc = concat!("Creates a new random [`", stringify!($name), "`].")]
            #[must_use]
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }
        }
    };
}

/// Defines a trimmed non-empty text of a bounded length.
macro_rules! define_text {
    ($(#[doc = $doc:literal])* $name:ident, max = $max:literal) => {
        $(#[doc = $doc])*
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent),
        )]
        pub struct $name(String);

        impl $name {
            #[doc = concat!(
                "Creates a new [`", stringify!($name), "`] if the given \
                 `text` is valid.",
            )]
            #[must_use]
            pub fn new(text: impl Into<String>) -> Option<Self> {
                let text = text.into();
                Self::check(&text).then_some(Self(text))
            }

            #[doc = concat!(
                "Checks whether the given `text` is a valid [`",
                stringify!($name),
                "`].",
            )]
            fn check(text: &str) -> bool {
                text.trim() == text
                    && !text.is_empty()
                    && text.chars().count() <= $max
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

pub mod booking;
pub mod candidate;
pub mod code;
pub mod company;
pub mod contact;
pub mod user;

pub use self::{
    booking::Booking, candidate::Candidate, code::Code, company::Company,
    user::User,
};

define_text! {
    /// Free-form notes attached to a record.
    Notes, max = 8192
}

#[cfg(test)]
mod spec {
    use super::Notes;

    #[test]
    fn validates_text() {
        assert!(Notes::new("Prefers remote work").is_some());
        assert!(Notes::new("").is_none());
        assert!(Notes::new(" padded").is_none());
        assert!(Notes::new("x".repeat(8193)).is_none());
        let notes: Notes = "ok".parse().unwrap();
        assert_eq!(AsRef::<str>::as_ref(&notes), "ok");
    }
}
