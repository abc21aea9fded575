//! Write payloads handed over to a [`Database`].
//!
//! Related records are linked with [`Relation`] and [`Connect`] fragments,
//! so a payload states exactly which links to set or remove.
//!
//! [`Connect`]: common::Connect
//! [`Database`]: crate::infra::Database
//! [`Relation`]: common::Relation

pub mod booking;
pub mod candidate;
pub mod code;
pub mod company;
