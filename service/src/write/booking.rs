//! [`Booking`] write payloads.

use common::{Connect, Date};

#[cfg(doc)]
use crate::domain::Booking;
use crate::domain::{booking, candidate, code::ShortCode, company, user, Notes};

/// Draft of a new [`Booking`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Date`] to book.
    pub date: Date,

    /// Booked candidate link.
    pub candidate: Connect<candidate::Id>,

    /// Booking company link.
    pub company: Connect<company::Id>,

    /// Role link, by [`ShortCode`].
    pub role: Connect<ShortCode>,

    /// [`Notes`] about the new [`Booking`].
    pub notes: Option<Notes>,

    /// Link to the creating user.
    pub created_by: Connect<user::Id>,

    /// Link to the last updating user.
    pub updated_by: Connect<user::Id>,
}

/// Changes to an existing [`Booking`]'s data.
///
/// A [`None`] field leaves the stored value untouched.
#[derive(Clone, Debug)]
pub struct Changes {
    /// ID of the [`Booking`] to change.
    pub id: booking::Id,

    /// New booked [`Date`].
    pub date: Option<Date>,

    /// Booked candidate link.
    pub candidate: Option<Connect<candidate::Id>>,

    /// Booking company link.
    pub company: Option<Connect<company::Id>>,

    /// Role link, by [`ShortCode`].
    pub role: Option<Connect<ShortCode>>,

    /// New [`Notes`], if any.
    pub notes: Option<Option<Notes>>,

    /// Link to the updating user.
    pub updated_by: Connect<user::Id>,
}
