//! [`Company`] write payloads.

use common::{Connect, Relation};

#[cfg(doc)]
use crate::domain::Company;
use crate::domain::{
    code::ShortCode,
    company,
    contact::{Email, Phone},
    user, Notes,
};

/// Draft of a new [`Company`].
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`company::Name`] of the new [`Company`].
    pub name: company::Name,

    /// [`Email`] of the new [`Company`].
    pub email: Option<Email>,

    /// [`Phone`] of the new [`Company`].
    pub phone: Option<Phone>,

    /// [`company::Website`] of the new [`Company`].
    pub website: Option<company::Website>,

    /// [`Notes`] about the new [`Company`].
    pub notes: Option<Notes>,

    /// Consultant link, omitted when no consultant is assigned.
    pub consultant: Option<Relation<user::Id>>,

    /// Status link, by [`ShortCode`].
    pub status: Connect<ShortCode>,

    /// Business type link, by [`ShortCode`].
    pub business_type: Connect<ShortCode>,

    /// Link to the creating user.
    pub created_by: Connect<user::Id>,

    /// Link to the last updating user.
    pub updated_by: Connect<user::Id>,
}

/// Changes to an existing [`Company`]'s data.
///
/// A [`None`] field leaves the stored value untouched.
#[derive(Clone, Debug)]
pub struct Changes {
    /// ID of the [`Company`] to change.
    pub id: company::Id,

    /// New [`company::Name`].
    pub name: Option<company::Name>,

    /// New [`Email`], if any.
    pub email: Option<Option<Email>>,

    /// New [`Phone`], if any.
    pub phone: Option<Option<Phone>>,

    /// New [`company::Website`], if any.
    pub website: Option<Option<company::Website>>,

    /// New [`Notes`], if any.
    pub notes: Option<Option<Notes>>,

    /// Consultant link, [`Relation::Disconnect`]ed when unassigned.
    pub consultant: Relation<user::Id>,

    /// Status link, by [`ShortCode`].
    pub status: Option<Connect<ShortCode>>,

    /// Business type link, by [`ShortCode`].
    pub business_type: Option<Connect<ShortCode>>,

    /// Link to the updating user.
    pub updated_by: Connect<user::Id>,
}
