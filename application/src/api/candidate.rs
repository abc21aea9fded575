//! [`Candidate`]-related definitions.

use common::{pagination::Arguments, DateTime};
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar, Nullable};
use service::{command, domain, query, read, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{
        self,
        code::{CandRole, CandStatus, ShortCode},
        contact::{Email, Phone},
        scalar::{self, Notes},
    },
    define_error, AsError, Context, Error,
};

/// A [`Candidate`] looking for a placement.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// ID of this [`Candidate`].
    pub id: Id,

    /// [`domain::Candidate`] representing this [`Candidate`].
    candidate: OnceCell<domain::Candidate>,
}

impl From<domain::Candidate> for Candidate {
    fn from(candidate: domain::Candidate) -> Self {
        Self {
            id: candidate.id.into(),
            candidate: OnceCell::new_with(Some(candidate)),
        }
    }
}

impl Candidate {
    /// Creates a new [`Candidate`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Candidate`] with the provided ID exists,
    /// otherwise accessing this [`Candidate`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            candidate: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Candidate`] representing this [`Candidate`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Candidate`] doesn't exist.
    async fn candidate(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Candidate, Error> {
        let id = self.id.into();
        self.candidate
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::candidate::ById::by(id))
                    .map_err(AsError::into_error)
                    .and_then(|c| {
                        future::ready(
                            c.ok_or_else(|| CandidateError::NotExists.into()),
                        )
                    })
                    .map_err(ctx.error())
            })
            .await
    }
}

/// A `Candidate` looking for a placement.
#[graphql_object(context = Context)]
impl Candidate {
    /// Unique identifier of this `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Forename of this `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.forename",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn forename(&self, ctx: &Context) -> Result<Forename, Error> {
        Ok(self.candidate(ctx).await?.forename.clone().into())
    }

    /// Surname of this `Candidate`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.surname",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn surname(
        &self,
        ctx: &Context,
    ) -> Result<Option<Surname>, Error> {
        Ok(self.candidate(ctx).await?.surname.clone().map(Into::into))
    }

    /// Email of this `Candidate`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(&self, ctx: &Context) -> Result<Option<Email>, Error> {
        Ok(self.candidate(ctx).await?.email.clone().map(Into::into))
    }

    /// Phone of this `Candidate`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn phone(&self, ctx: &Context) -> Result<Option<Phone>, Error> {
        Ok(self.candidate(ctx).await?.phone.clone().map(Into::into))
    }

    /// Notes about this `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.notes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn notes(&self, ctx: &Context) -> Result<Option<Notes>, Error> {
        Ok(self.candidate(ctx).await?.notes.clone().map(Into::into))
    }

    /// Consultant `User` looking after this `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.consultant",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn consultant(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.candidate(ctx).await?.consultant))
    }

    /// Current status of this `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<CandStatus, Error> {
        let short_code = self.candidate(ctx).await?.status.clone();
        CandStatus::by_short_code(short_code, ctx).await
    }

    /// Role this `Candidate` is looking for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.role",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn role(&self, ctx: &Context) -> Result<CandRole, Error> {
        let short_code = self.candidate(ctx).await?.role.clone();
        CandRole::by_short_code(short_code, ctx).await
    }

    /// `Booking`s of this `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.bookings",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bookings(
        &self,
        order_by: Option<api::booking::list::OrderBy>,
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        ctx.service()
            .execute(query::booking::List::by(read::booking::list::Selector {
                arguments: Arguments::default(),
                filter: read::booking::list::Filter {
                    candidate: Some(self.id.into()),
                    ..read::booking::list::Filter::default()
                },
                ordering: order_by.map(Into::into).unwrap_or_default(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| page.into_iter().map(Into::into).collect())
    }

    /// `User` who created this `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.createdBy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_by(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.candidate(ctx).await?.created_by))
    }

    /// `User` who updated this `Candidate` the last.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.updatedBy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_by(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.candidate(ctx).await?.updated_by))
    }

    /// `DateTime` when this `Candidate` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.candidate(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Candidate` was updated the last.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Candidate.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.candidate(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `Candidate`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::candidate::Id)]
#[into(domain::candidate::Id)]
#[graphql(name = "CandidateId", transparent)]
pub struct Id(Uuid);

/// Forename of a `Candidate`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::candidate::Forename>)]
pub struct Forename(domain::candidate::Forename);

/// Surname of a `Candidate`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::candidate::Surname>)]
pub struct Surname(domain::candidate::Surname);

/// Data of a new `Candidate`.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "CandidateInput")]
pub struct Input {
    /// Forename of the `Candidate`.
    pub forename: Forename,

    /// Surname of the `Candidate`.
    pub surname: Option<Surname>,

    /// Email of the `Candidate`.
    pub email: Option<Email>,

    /// Phone of the `Candidate`.
    pub phone: Option<Phone>,

    /// Notes about the `Candidate`.
    pub notes: Option<Notes>,

    /// Consultant `User` looking after the `Candidate`.
    ///
    /// Omitted or `"Unspecified"` leaves the `Candidate` without one.
    pub consultant: Option<api::user::Reference>,

    /// Short code of the `CandStatus`.
    pub status: ShortCode,

    /// Short code of the `CandRole`.
    pub role: ShortCode,
}

impl From<Input> for command::create_candidate::Data {
    fn from(input: Input) -> Self {
        let Input {
            forename,
            surname,
            email,
            phone,
            notes,
            consultant,
            status,
            role,
        } = input;
        Self {
            forename: forename.into(),
            surname: surname.map(Into::into),
            email: email.map(Into::into),
            phone: phone.map(Into::into),
            notes: notes.map(Into::into),
            consultant: consultant
                .map_or(common::Reference::Unspecified, Into::into),
            status: status.into(),
            role: role.into(),
        }
    }
}

/// Changes to the data of an existing `Candidate`.
///
/// Omitted fields are left untouched, while an explicit `null` clears an
/// optional one.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "CandidateUpdateInput")]
pub struct UpdateInput {
    /// New forename of the `Candidate`.
    pub forename: Option<Forename>,

    /// New surname of the `Candidate`.
    pub surname: Nullable<Surname>,

    /// New email of the `Candidate`.
    pub email: Nullable<Email>,

    /// New phone of the `Candidate`.
    pub phone: Nullable<Phone>,

    /// New notes about the `Candidate`.
    pub notes: Nullable<Notes>,

    /// Consultant `User` looking after the `Candidate`.
    ///
    /// Omitted or `"Unspecified"` unassigns the current one.
    pub consultant: Option<api::user::Reference>,

    /// Short code of the new `CandStatus`.
    pub status: Option<ShortCode>,

    /// Short code of the new `CandRole`.
    pub role: Option<ShortCode>,
}

impl From<UpdateInput> for command::update_candidate::Data {
    fn from(input: UpdateInput) -> Self {
        let UpdateInput {
            forename,
            surname,
            email,
            phone,
            notes,
            consultant,
            status,
            role,
        } = input;
        Self {
            forename: forename.map(Into::into),
            surname: surname.explicit().map(|v| v.map(Into::into)),
            email: email.explicit().map(|v| v.map(Into::into)),
            phone: phone.explicit().map(|v| v.map(Into::into)),
            notes: notes.explicit().map(|v| v.map(Into::into)),
            consultant: consultant
                .map_or(common::Reference::Unspecified, Into::into),
            status: status.map(Into::into),
            role: role.map(Into::into),
        }
    }
}

define_error! {
    enum CandidateError {
        #[code = "CANDIDATE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Candidate not found"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Candidate`] list.
    //!
    //! [`Candidate`]: super::Candidate

    use common::pagination::Ordering;
    use juniper::GraphQLEnum;
    use service::read::candidate::list::Field;

    /// Ordering of a `Candidate` list.
    #[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "CandidateOrderByInput")]
    pub enum OrderBy {
        /// By forename, ascending.
        #[graphql(name = "forename_ASC")]
        ForenameAsc,

        /// By forename, descending.
        #[graphql(name = "forename_DESC")]
        ForenameDesc,

        /// By surname, ascending.
        #[graphql(name = "surname_ASC")]
        SurnameAsc,

        /// By surname, descending.
        #[graphql(name = "surname_DESC")]
        SurnameDesc,

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

        /// By last update time, ascending.
        #[graphql(name = "updatedAt_ASC")]
        UpdatedAtAsc,

        /// By last update time, descending.
        #[graphql(name = "updatedAt_DESC")]
        UpdatedAtDesc,
    }

    impl From<OrderBy> for Ordering<Field> {
        fn from(order_by: OrderBy) -> Self {
            match order_by {
                OrderBy::ForenameAsc => Self::asc(Field::Forename),
                OrderBy::ForenameDesc => Self::desc(Field::Forename),
                OrderBy::SurnameAsc => Self::asc(Field::Surname),
                OrderBy::SurnameDesc => Self::desc(Field::Surname),
                OrderBy::EmailAsc => Self::asc(Field::Email),
                OrderBy::EmailDesc => Self::desc(Field::Email),
                OrderBy::CreatedAtAsc => Self::asc(Field::CreatedAt),
                OrderBy::CreatedAtDesc => Self::desc(Field::CreatedAt),
                OrderBy::UpdatedAtAsc => Self::asc(Field::UpdatedAt),
                OrderBy::UpdatedAtDesc => Self::desc(Field::UpdatedAt),
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Reference, Relation};
    use juniper::Nullable;
    use service::{
        command::{create_candidate::Data, update_candidate as update},
        domain,
    };

    use super::{Input, UpdateInput};

    fn input(consultant: Option<&str>) -> Input {
        Input {
            forename: domain::candidate::Forename::new("Jo").unwrap().into(),
            surname: None,
            email: None,
            phone: None,
            notes: None,
            consultant: consultant.map(|c| {
                c.parse::<Reference<domain::user::Id>>().unwrap().into()
            }),
            status: domain::code::ShortCode::new("ACT").unwrap().into(),
            role: domain::code::ShortCode::new("DEV").unwrap().into(),
        }
    }

    #[test]
    fn omitted_consultant_is_unspecified() {
        let data = Data::from(input(None));

        assert_eq!(data.consultant, Reference::Unspecified);
        assert_eq!(AsRef::<str>::as_ref(&data.status), "ACT");
        assert_eq!(AsRef::<str>::as_ref(&data.role), "DEV");

        let by = domain::user::Id::new();
        let draft = data.into_draft(by);
        assert!(draft.consultant.is_none());
        assert_eq!(draft.created_by.key(), &by);
        assert_eq!(draft.updated_by.key(), &by);
    }

    #[test]
    fn update_keeps_omitted_and_clears_nulls() {
        let data = update::Data::from(UpdateInput {
            forename: None,
            surname: Nullable::ExplicitNull,
            email: Nullable::ImplicitNull,
            phone: Nullable::Some(
                domain::contact::Phone::new("+44 20 7946 0000").unwrap().into(),
            ),
            notes: Nullable::ImplicitNull,
            consultant: None,
            status: None,
            role: Some(domain::code::ShortCode::new("QA").unwrap().into()),
        });

        assert!(data.forename.is_none());
        assert_eq!(data.surname, Some(None));
        assert!(data.email.is_none());
        assert!(matches!(data.phone, Some(Some(_))));
        assert!(data.notes.is_none());
        assert!(data.status.is_none());
        assert_eq!(data.role.as_ref().map(AsRef::<str>::as_ref), Some("QA"));
    }

    #[test]
    fn sentinel_consultant_disconnects_on_update() {
        let data = update::Data::from(UpdateInput {
            forename: None,
            surname: Nullable::ImplicitNull,
            email: Nullable::ImplicitNull,
            phone: Nullable::ImplicitNull,
            notes: Nullable::ImplicitNull,
            consultant: Some(
                "Unspecified"
                    .parse::<Reference<domain::user::Id>>()
                    .unwrap()
                    .into(),
            ),
            status: None,
            role: None,
        });

        let changes = data.into_changes(
            domain::candidate::Id::new(),
            domain::user::Id::new(),
        );
        assert_eq!(changes.consultant, Relation::Disconnect);
        assert!(changes.surname.is_none());
        assert!(changes.status.is_none());
    }

    #[test]
    fn consultant_id_connects() {
        let consultant = domain::user::Id::new();
        let data = Data::from(input(Some(&consultant.to_string())));

        assert_eq!(
            data.into_draft(domain::user::Id::new()).consultant,
            Some(Relation::Connect(consultant)),
        );
    }
}
