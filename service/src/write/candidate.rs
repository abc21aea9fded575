//! [`Candidate`] write payloads.

use common::{Connect, Relation};

#[cfg(doc)]
use crate::domain::Candidate;
use crate::domain::{
    candidate,
    code::ShortCode,
    contact::{Email, Phone},
    user, Notes,
};

/// Draft of a new [`Candidate`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`candidate::Forename`] of the new [`Candidate`].
    pub forename: candidate::Forename,

    /// [`candidate::Surname`] of the new [`Candidate`].
    pub surname: Option<candidate::Surname>,

    /// [`Email`] of the new [`Candidate`].
    pub email: Option<Email>,

    /// [`Phone`] of the new [`Candidate`].
    pub phone: Option<Phone>,

    /// [`Notes`] about the new [`Candidate`].
    pub notes: Option<Notes>,

    /// Consultant link, omitted when no consultant is assigned.
    pub consultant: Option<Relation<user::Id>>,

    /// Status link, by [`ShortCode`].
    pub status: Connect<ShortCode>,

    /// Role link, by [`ShortCode`].
    pub role: Connect<ShortCode>,

    /// Link to the creating user.
    pub created_by: Connect<user::Id>,

    /// Link to the last updating user.
    pub updated_by: Connect<user::Id>,
}

/// Changes to an existing [`Candidate`]'s data.
///
/// A [`None`] field leaves the stored value untouched.
#[derive(Clone, Debug)]
pub struct Changes {
    /// ID of the [`Candidate`] to change.
    pub id: candidate::Id,

    /// New [`candidate::Forename`].
    pub forename: Option<candidate::Forename>,

    /// New [`candidate::Surname`], if any.
    pub surname: Option<Option<candidate::Surname>>,

    /// New [`Email`], if any.
    pub email: Option<Option<Email>>,

    /// New [`Phone`], if any.
    pub phone: Option<Option<Phone>>,

    /// New [`Notes`], if any.
    pub notes: Option<Option<Notes>>,

    /// Consultant link, [`Relation::Disconnect`]ed when unassigned.
    pub consultant: Relation<user::Id>,

    /// Status link, by [`ShortCode`].
    pub status: Option<Connect<ShortCode>>,

    /// Role link, by [`ShortCode`].
    pub role: Option<Connect<ShortCode>>,

    /// Link to the updating user.
    pub updated_by: Connect<user::Id>,
}
