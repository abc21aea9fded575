//! [`Candidate`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};

#[cfg(doc)]
use crate::domain::{
    code::{CandRole, CandStatus},
    User,
};
use crate::domain::{
    code::ShortCode,
    contact::{Email, Phone},
    user, Notes,
};

/// Person looking for a job through the office.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// ID of this [`Candidate`].
    pub id: Id,

    /// [`Forename`] of this [`Candidate`].
    pub forename: Forename,

    /// [`Surname`] of this [`Candidate`], if known.
    pub surname: Option<Surname>,

    /// [`Email`] of this [`Candidate`], if known.
    pub email: Option<Email>,

    /// [`Phone`] of this [`Candidate`], if known.
    pub phone: Option<Phone>,

    /// [`Notes`] about this [`Candidate`].
    pub notes: Option<Notes>,

    /// ID of the [`User`] consulting this [`Candidate`], if assigned.
    pub consultant: Option<user::Id>,

    /// [`ShortCode`] of the [`CandStatus`] of this [`Candidate`].
    pub status: ShortCode,

    /// [`ShortCode`] of the [`CandRole`] this [`Candidate`] is looking for.
    pub role: ShortCode,

    /// ID of the [`User`] who created this [`Candidate`].
    ///
    /// [`None`] once that [`User`] is deleted.
    pub created_by: Option<user::Id>,

    /// ID of the [`User`] who last updated this [`Candidate`].
    ///
    /// [`None`] once that [`User`] is deleted.
    pub updated_by: Option<user::Id>,

    /// [`DateTime`] when this [`Candidate`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Candidate`] was last updated.
    pub updated_at: ModificationDateTime,
}

define_id! {
    /// ID of a [`Candidate`].
    Id
}

define_text! {
    /// Forename of a [`Candidate`].
    Forename, max = 256
}

define_text! {
    /// Surname of a [`Candidate`].
    Surname, max = 256
}

/// [`DateTime`] when a [`Candidate`] was created.
pub type CreationDateTime = DateTimeOf<(Candidate, unit::Creation)>;

/// [`DateTime`] when a [`Candidate`] was last updated.
pub type ModificationDateTime = DateTimeOf<(Candidate, unit::Modification)>;
