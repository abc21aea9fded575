//! [`Code`] write payloads.

use std::marker::PhantomData;

#[cfg(doc)]
use crate::domain::Code;
use crate::domain::code::{self, Description, ShortCode};

/// Draft of a new [`Code`] of the `K`ind.
#[derive(Clone, Debug)]
pub struct Draft<K> {
    /// [`ShortCode`] of the new [`Code`].
    pub short_code: ShortCode,

    /// [`Description`] of the new [`Code`].
    pub description: Description,

    /// Kind of the new [`Code`].
    pub kind: PhantomData<K>,
}

/// Full replacement of an existing [`Code`]'s data.
#[derive(Clone, Debug)]
pub struct Changes<K> {
    /// ID of the [`Code`] to change.
    pub id: code::Id,

    /// New [`ShortCode`].
    pub short_code: ShortCode,

    /// New [`Description`].
    pub description: Description,

    /// Kind of the changed [`Code`].
    pub kind: PhantomData<K>,
}
