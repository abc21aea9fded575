//! GraphQL API definitions.

pub mod booking;
pub mod candidate;
pub mod code;
pub mod company;
pub mod contact;
mod mutation;
mod query;
pub mod scalar;
pub mod user;

use juniper::EmptySubscription;
use service::domain::user::Permission;

use crate::{define_error, Context};

pub use self::{
    booking::Booking, candidate::Candidate, company::Company,
    mutation::Mutation, query::Query, user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum PrivilegeError {
        #[code = "NO_DELETE_PERMISSION"]
        #[status = FORBIDDEN]
        #[message = "Insufficient permissions to delete"]
        Delete,

        #[code = "NOT_OFFICE_MANAGER"]
        #[status = FORBIDDEN]
        #[message = "Insufficient permissions"]
        OfficeManager,
    }
}

impl From<Permission> for PrivilegeError {
    fn from(permission: Permission) -> Self {
        match permission {
            Permission::Delete => Self::Delete,
            Permission::OfficeManager => Self::OfficeManager,
        }
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "`first` and `skip` must not be negative"]
        Invalid,
    }
}

#[cfg(test)]
mod spec {
    use super::schema;

    #[test]
    fn exposes_recruitment_operations() {
        let sdl = schema().as_sdl();

        for field in [
            "me: User!",
            "candStatuses: [CandStatus!]!",
            "login(data: LoginInput!): AuthPayload!",
            "deleteBusType(id: BusTypeId!): BusType!",
        ] {
            assert!(sdl.contains(field), "`{field}` missing in:\n{sdl}");
        }
    }
}
