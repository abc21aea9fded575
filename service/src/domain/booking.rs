//! [`Booking`] definitions.

use common::{unit, Date, DateTimeOf};

#[cfg(doc)]
use crate::domain::{code::CandRole, Candidate, Company, User};
use crate::domain::{candidate, code::ShortCode, company, user, Notes};

/// Day of work a [`Candidate`] is booked for at a [`Company`].
///
/// A [`Candidate`] may have at most one [`Booking`] per [`Date`].
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// [`Date`] this [`Booking`] is made for.
    pub date: Date,

    /// ID of the booked [`Candidate`].
    pub candidate: candidate::Id,

    /// ID of the [`Company`] the [`Candidate`] is booked at.
    pub company: company::Id,

    /// [`ShortCode`] of the [`CandRole`] the [`Candidate`] works in.
    pub role: ShortCode,

    /// [`Notes`] about this [`Booking`].
    pub notes: Option<Notes>,

    /// ID of the [`User`] who created this [`Booking`].
    pub created_by: Option<user::Id>,

    /// ID of the [`User`] who last updated this [`Booking`].
    pub updated_by: Option<user::Id>,

    /// When this [`Booking`] was created.
    pub created_at: CreationDateTime,

    /// When this [`Booking`] was last updated.
    pub updated_at: ModificationDateTime,
}

define_id! {
    /// ID of a [`Booking`].
    Id
}

/// When a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

/// When a [`Booking`] was last updated.
pub type ModificationDateTime = DateTimeOf<(Booking, unit::Modification)>;
