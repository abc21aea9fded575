//! [`Query`] collection related to [`Candidate`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{
    domain::{candidate, Candidate},
    read,
};

use super::DatabaseQuery;

/// Queries a [`Candidate`] by its [`candidate::Id`].
pub type ById = DatabaseQuery<By<Option<Candidate>, candidate::Id>>;

/// Queries a list of [`Candidate`]s.
pub type List = DatabaseQuery<
    By<read::candidate::list::Page, read::candidate::list::Selector>,
>;
