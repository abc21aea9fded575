//! Read models definitions.

pub mod booking;
pub mod candidate;
pub mod company;
pub mod user;
