//! [`Command`] definition.

pub mod authorize_user;
pub mod authorize_user_session;
pub mod create_booking;
pub mod create_candidate;
pub mod create_code;
pub mod create_company;
pub mod create_user;
pub mod create_user_session;
pub mod delete_booking;
pub mod delete_candidate;
pub mod delete_code;
pub mod delete_company;
pub mod delete_user;
pub mod update_booking;
pub mod update_candidate;
pub mod update_code;
pub mod update_company;
pub mod update_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user::AuthorizeUser,
    authorize_user_session::AuthorizeUserSession,
    create_booking::CreateBooking, create_candidate::CreateCandidate,
    create_code::CreateCode, create_company::CreateCompany,
    create_user::CreateUser, create_user_session::CreateUserSession,
    delete_booking::DeleteBooking, delete_candidate::DeleteCandidate,
    delete_code::DeleteCode, delete_company::DeleteCompany,
    delete_user::DeleteUser, update_booking::UpdateBooking,
    update_candidate::UpdateCandidate, update_code::UpdateCode,
    update_company::UpdateCompany, update_user::UpdateUser,
};
