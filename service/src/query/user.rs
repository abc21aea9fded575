//! [`Query`] collection related to [`User`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{
    domain::{user, User},
    read,
};

use super::DatabaseQuery;

/// Queries a [`User`] by its [`user::Id`].
pub type ById = DatabaseQuery<By<Option<User>, user::Id>>;

/// Queries a list of [`User`]s.
pub type List =
    DatabaseQuery<By<read::user::list::Page, read::user::list::Selector>>;
