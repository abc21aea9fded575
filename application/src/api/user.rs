//! [`User`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, contact::Email, scalar},
    define_error, AsError, Context, Error,
};

/// A [`User`] of the system.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`domain::User`] representing this [`User`].
    user: OnceCell<domain::User>,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            user: OnceCell::new_with(Some(user)),
        }
    }
}

impl User {
    /// Creates a new [`User`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`User`] with the provided ID exists,
    /// otherwise accessing this [`User`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            user: OnceCell::new(),
        }
    }

    /// Creates a new [`User`] referenced by another record, if any.
    ///
    /// Storage nullifies the references to deleted [`User`]s, so any
    /// present reference points to an existing one.
    #[expect(unsafe_code, reason = "referential integrity")]
    #[must_use]
    pub(crate) fn referenced(id: Option<domain::user::Id>) -> Option<Self> {
        id.map(|id| unsafe { Self::new_unchecked(id) })
    }

    /// Returns the [`domain::User`] representing this [`User`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::User`] doesn't exist.
    async fn user(&self, ctx: &Context) -> Result<&domain::User, Error> {
        let id = self.id.into();
        self.user
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::user::ById::by(id))
                    .map_err(AsError::into_error)
                    .and_then(|u| {
                        future::ready(
                            u.ok_or_else(|| UserError::NotExists.into()),
                        )
                    })
                    .map_err(ctx.error())
            })
            .await
    }
}

/// A `User` of the system: a consultant of the recruitment office.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.user(ctx).await?.name.clone().into())
    }

    /// Email this `User` logs in with.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(&self, ctx: &Context) -> Result<Email, Error> {
        Ok(self.user(ctx).await?.email.clone().into())
    }

    /// Indicator whether this `User` may delete records.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.delPermission",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn del_permission(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.user(ctx).await?.del_permission)
    }

    /// Indicator whether this `User` manages the office lookup codes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.officeManager",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn office_manager(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.user(ctx).await?.office_manager)
    }

    /// `DateTime` when this `User` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.user(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(Uuid);

/// Name of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserName",
    with = scalar::Via::<domain::user::Name>,
)]
pub struct Name(domain::user::Name);

/// Password of a `User`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserPassword",
    with = scalar::Via::<domain::user::Password>,
)]
pub struct Password(domain::user::Password);

/// Optional reference to a `User`.
///
/// `"Unspecified"` (or an empty string) references no `User`.
#[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserReference",
    with = scalar::Via::<common::Reference<domain::user::Id>>,
)]
pub struct Reference(common::Reference<domain::user::Id>);

/// Data of a new `User`.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "CreateUserInput")]
pub struct CreateInput {
    /// Name of the new `User`.
    pub name: Name,

    /// Email of the new `User`, unique among all `User`s.
    pub email: Email,

    /// Password of the new `User`.
    pub password: Password,

    /// Indicator whether the new `User` may delete records.
    ///
    /// Only an office manager may grant it.
    pub del_permission: Option<bool>,

    /// Indicator whether the new `User` manages the office lookup codes.
    ///
    /// Only an office manager may grant it.
    pub office_manager: Option<bool>,
}

/// Credentials of a `User`.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "LoginInput")]
pub struct LoginInput {
    /// Email of the `User`.
    pub email: Email,

    /// Password of the `User`.
    pub password: Password,
}

/// Changes of the authenticated `User`.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "UpdateUserInput")]
pub struct UpdateInput {
    /// New name.
    pub name: Option<Name>,

    /// New email.
    pub email: Option<Email>,

    /// New password.
    pub password: Option<Password>,
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "User not found"]
        NotExists,
    }
}

pub mod session {
    //! [`Session`]-related definitions.
    //!
    //! [`Session`]: crate::Session

    use common::DateTime;
    use derive_more::{AsRef, From, Into};
    use juniper::{GraphQLObject, GraphQLScalar};
    use service::{command, domain};

    use crate::{
        api::{self, scalar},
        Context,
    };

    /// `Session` access token, sent back in the
    /// `Authorization: Bearer <token>` header.
    #[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
    #[graphql(
        name = "AuthToken",
        with = scalar::Via::<domain::user::session::Token>,
    )]
    pub struct Token(domain::user::session::Token);

    /// Authenticated `User` along with its access token.
    #[derive(Clone, Debug, From, GraphQLObject)]
    #[graphql(context = Context, name = "AuthPayload")]
    pub struct AuthPayload {
        /// Access token of the authenticated `User`.
        pub token: Token,

        /// Authenticated `User`.
        pub user: api::User,

        /// `DateTime` when the access token expires.
        pub expires_at: DateTime,
    }

    impl From<command::create_user_session::Output> for AuthPayload {
        fn from(output: command::create_user_session::Output) -> Self {
            let command::create_user_session::Output {
                token,
                user,
                expires_at,
            } = output;
            Self {
                token: token.into(),
                user: user.into(),
                expires_at: expires_at.coerce(),
            }
        }
    }
}

pub mod list {
    //! Definitions related to [`User`] list.
    //!
    //! [`User`]: super::User

    use common::pagination::Ordering;
    use juniper::GraphQLEnum;
    use service::read::user::list::Field;

    /// Ordering of a `User` list.
    #[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "UserOrderByInput")]
    pub enum OrderBy {
        /// By name, ascending.
        #[graphql(name = "name_ASC")]
        NameAsc,

        /// By name, descending.
        #[graphql(name = "name_DESC")]
        NameDesc,

        /// By email, ascending.
        #[graphql(name = "email_ASC")]
        EmailAsc,

        /// By email, descending.
        #[graphql(name = "email_DESC")]
        EmailDesc,

        /// By creation time, ascending.
        #[graphql(name = "createdAt_ASC")]
        CreatedAtAsc,

        /// By creation time, descending.
        #[graphql(name = "createdAt_DESC")]
        CreatedAtDesc,
    }

    impl From<OrderBy> for Ordering<Field> {
        fn from(order_by: OrderBy) -> Self {
            match order_by {
                OrderBy::NameAsc => Self::asc(Field::Name),
                OrderBy::NameDesc => Self::desc(Field::Name),
                OrderBy::EmailAsc => Self::asc(Field::Email),
                OrderBy::EmailDesc => Self::desc(Field::Email),
                OrderBy::CreatedAtAsc => Self::asc(Field::CreatedAt),
                OrderBy::CreatedAtDesc => Self::desc(Field::CreatedAt),
            }
        }
    }

    #[cfg(test)]
    mod spec {
        use common::pagination::{Order, Ordering};
        use service::read::user::list::Field;

        use super::OrderBy;

        #[test]
        fn default_ordering_is_creation_ascending() {
            assert_eq!(
                Ordering::<Field>::from(OrderBy::CreatedAtAsc),
                Ordering::default(),
            );
            assert_eq!(
                Ordering::<Field>::from(OrderBy::NameDesc).order,
                Order::Descending,
            );
        }
    }
}
