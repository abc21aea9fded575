//! Lookup [`Code`] definitions.
//!
//! Lookup codes are small office-managed vocabularies (candidate statuses,
//! candidate roles, company statuses and business types), referenced from
//! other records by their [`ShortCode`].

use std::{fmt, marker::PhantomData};

/// Lookup code of the `K`ind.
pub struct Code<K: ?Sized> {
    /// ID of this [`Code`].
    pub id: Id,

    /// Unique [`ShortCode`] other records refer to this [`Code`] by.
    pub short_code: ShortCode,

    /// Human-readable [`Description`] of this [`Code`].
    pub description: Description,

    /// Kind of this [`Code`].
    pub kind: PhantomData<K>,
}

impl<K: ?Sized> Clone for Code<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            short_code: self.short_code.clone(),
            description: self.description.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: Kind + ?Sized> fmt::Debug for Code<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME)
            .field("id", &self.id)
            .field("short_code", &self.short_code)
            .field("description", &self.description)
            .finish()
    }
}

define_id! {
    /// ID of a [`Code`].
    Id
}

define_text! {
    /// Short code of a [`Code`], unique within its kind.
    ShortCode, max = 32
}

define_text! {
    /// Description of a [`Code`].
    Description, max = 512
}

/// Kind of a [`Code`].
pub trait Kind: 'static {
    /// Human-readable name of this [`Kind`].
    const NAME: &'static str;
}

/// Status of a candidate in the recruitment pipeline.
#[derive(Clone, Copy, Debug)]
pub enum CandStatus {}

impl Kind for CandStatus {
    const NAME: &'static str = "CandStatus";
}

/// Role a candidate may be placed in.
#[derive(Clone, Copy, Debug)]
pub enum CandRole {}

impl Kind for CandRole {
    const NAME: &'static str = "CandRole";
}

/// Status of a client company.
#[derive(Clone, Copy, Debug)]
pub enum CompStatus {}

impl Kind for CompStatus {
    const NAME: &'static str = "CompStatus";
}

/// Business type of a client company.
#[derive(Clone, Copy, Debug)]
pub enum BusType {}

impl Kind for BusType {
    const NAME: &'static str = "BusType";
}
