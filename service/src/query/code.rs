//! [`Query`] collection related to lookup [`Code`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::domain::{
    code::{self, ShortCode},
    Code,
};

use super::DatabaseQuery;

/// Queries a [`Code`] of the `K`ind by its [`code::Id`].
pub type ById<K> = DatabaseQuery<By<Option<Code<K>>, code::Id>>;

/// Queries a [`Code`] of the `K`ind by its [`ShortCode`].
pub type ByShortCode<K> = DatabaseQuery<By<Option<Code<K>>, ShortCode>>;

/// Queries all [`Code`]s of the `K`ind, ordered by their [`ShortCode`]s.
pub type List<K> = DatabaseQuery<By<Vec<Code<K>>, ()>>;
