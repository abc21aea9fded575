//! Relation fragments linking a record to other records.

use std::{fmt, str::FromStr};

/// Instruction changing a link to a related record identified by `K`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Relation<K> {
    /// Link to the existing record identified by `K`.
    Connect(K),

    /// Remove the existing link, if any.
    Disconnect,
}

impl<K> Relation<K> {
    /// Returns the key of the record being connected, if any.
    #[must_use]
    pub fn connected(&self) -> Option<&K> {
        match self {
            Self::Connect(key) => Some(key),
            Self::Disconnect => None,
        }
    }

    /// Converts this [`Relation`] into the key the link should point to after
    /// applying it.
    #[must_use]
    pub fn into_target(self) -> Option<K> {
        match self {
            Self::Connect(key) => Some(key),
            Self::Disconnect => None,
        }
    }
}

/// Instruction linking to a mandatory related record identified by `K`.
///
/// Unlike a [`Relation`], cannot be disconnected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Connect<K>(pub K);

impl<K> Connect<K> {
    /// Returns the key of the record being connected.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.0
    }

    /// Consumes this [`Connect`] returning the key of the record.
    #[must_use]
    pub fn into_key(self) -> K {
        self.0
    }
}

/// Reference to an optional related record, as submitted by a client.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Reference<K> {
    /// No related record is selected.
    #[default]
    Unspecified,

    /// Related record identified by `K` is selected.
    To(K),
}

impl<K> Reference<K> {
    /// Sentinel value of a submitted [`Reference`] meaning "no relation".
    pub const SENTINEL: &'static str = "Unspecified";

    /// Builds a [`Relation`] for a record being created.
    ///
    /// A new record has nothing to disconnect, so an
    /// [`Reference::Unspecified`] results in no [`Relation`] at all.
    #[must_use]
    pub fn on_create(self) -> Option<Relation<K>> {
        match self {
            Self::To(key) => Some(Relation::Connect(key)),
            Self::Unspecified => None,
        }
    }

    /// Builds a [`Relation`] for a record being updated.
    ///
    /// An [`Reference::Unspecified`] explicitly disconnects the currently
    /// related record.
    #[must_use]
    pub fn on_update(self) -> Relation<K> {
        match self {
            Self::To(key) => Relation::Connect(key),
            Self::Unspecified => Relation::Disconnect,
        }
    }
}

impl<K> From<Option<K>> for Reference<K> {
    fn from(key: Option<K>) -> Self {
        key.map_or(Self::Unspecified, Self::To)
    }
}

impl<K: fmt::Display> fmt::Display for Reference<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => f.write_str(Self::SENTINEL),
            Self::To(key) => key.fmt(f),
        }
    }
}

impl<K: FromStr> FromStr for Reference<K> {
    type Err = K::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == Self::SENTINEL {
            Ok(Self::Unspecified)
        } else {
            s.parse().map(Self::To)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Reference, Relation};

    #[test]
    fn parses_sentinel_as_unspecified() {
        assert_eq!(
            "Unspecified".parse::<Reference<u32>>().unwrap(),
            Reference::Unspecified,
        );
        assert_eq!("".parse::<Reference<u32>>().unwrap(), Reference::Unspecified);
        assert_eq!("42".parse::<Reference<u32>>().unwrap(), Reference::To(42));
        assert!("forty-two".parse::<Reference<u32>>().is_err());
    }

    #[test]
    fn displays_sentinel_back() {
        assert_eq!(Reference::<u32>::Unspecified.to_string(), "Unspecified");
        assert_eq!(Reference::To(42).to_string(), "42");
    }

    #[test]
    fn omits_relation_on_create() {
        assert_eq!(Reference::<u32>::Unspecified.on_create(), None);
        assert_eq!(
            Reference::To(7).on_create(),
            Some(Relation::Connect(7)),
        );
    }

    #[test]
    fn disconnects_relation_on_update() {
        assert_eq!(
            Reference::<u32>::Unspecified.on_update(),
            Relation::Disconnect,
        );
        assert_eq!(Reference::To(7).on_update(), Relation::Connect(7));
    }

    #[test]
    fn resolves_target() {
        assert_eq!(Relation::Connect(3).into_target(), Some(3));
        assert_eq!(Relation::<u32>::Disconnect.into_target(), None);
    }
}
