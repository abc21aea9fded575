//! [`Query`] collection related to [`Booking`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{
    domain::{booking, Booking},
    read,
};

use super::DatabaseQuery;

/// Queries a [`Booking`] by its [`booking::Id`].
pub type ById = DatabaseQuery<By<Option<Booking>, booking::Id>>;

/// Queries a list of [`Booking`]s.
pub type List = DatabaseQuery<
    By<read::booking::list::Page, read::booking::list::Selector>,
>;
