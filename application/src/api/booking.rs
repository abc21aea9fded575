//! [`Booking`]-related definitions.

use common::{Date, DateTime};
use derive_more::{Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar, Nullable};
use service::{command, domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{
        self,
        code::{CandRole, ShortCode},
        scalar::Notes,
    },
    define_error, AsError, Context, Error,
};

/// A [`Booking`] of a [`Candidate`] at a [`Company`] for a day.
///
/// [`Candidate`]: api::Candidate
/// [`Company`]: api::Company
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// [`domain::Booking`] representing this [`Booking`].
    booking: OnceCell<domain::Booking>,
}

impl From<domain::Booking> for Booking {
    fn from(booking: domain::Booking) -> Self {
        Self {
            id: booking.id.into(),
            booking: OnceCell::new_with(Some(booking)),
        }
    }
}

impl Booking {
    /// Returns the [`domain::Booking`] representing this [`Booking`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Booking`] doesn't exist.
    async fn booking(&self, ctx: &Context) -> Result<&domain::Booking, Error> {
        let id = self.id.into();
        self.booking
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::booking::ById::by(id))
                    .map_err(AsError::into_error)
                    .and_then(|b| {
                        future::ready(
                            b.ok_or_else(|| BookingError::NotExists.into()),
                        )
                    })
                    .map_err(ctx.error())
            })
            .await
    }
}

/// A `Booking` of a `Candidate` at a `Company` for a day.
#[graphql_object(context = Context)]
impl Booking {
    /// Unique identifier of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Day of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.date",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn date(&self, ctx: &Context) -> Result<Date, Error> {
        Ok(self.booking(ctx).await?.date)
    }

    /// Booked `Candidate`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.candidate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn candidate(
        &self,
        ctx: &Context,
    ) -> Result<api::Candidate, Error> {
        let id = self.booking(ctx).await?.candidate;

        // SAFETY: Storage cascades `Candidate` deletion to its `Booking`s.
        #[expect(unsafe_code, reason = "referential integrity")]
        let candidate = unsafe { api::Candidate::new_unchecked(id) };
        Ok(candidate)
    }

    /// `Company` this `Booking` is made at.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.company",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn company(&self, ctx: &Context) -> Result<api::Company, Error> {
        let id = self.booking(ctx).await?.company;

        // SAFETY: Storage cascades `Company` deletion to its `Booking`s.
        #[expect(unsafe_code, reason = "referential integrity")]
        let company = unsafe { api::Company::new_unchecked(id) };
        Ok(company)
    }

    /// Role the `Candidate` is booked for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.role",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn role(&self, ctx: &Context) -> Result<CandRole, Error> {
        let short_code = self.booking(ctx).await?.role.clone();
        CandRole::by_short_code(short_code, ctx).await
    }

    /// Notes about this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.notes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn notes(&self, ctx: &Context) -> Result<Option<Notes>, Error> {
        Ok(self.booking(ctx).await?.notes.clone().map(Into::into))
    }

    /// `User` who made this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.createdBy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_by(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.booking(ctx).await?.created_by))
    }

    /// `User` who updated this `Booking` the last.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.updatedBy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_by(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.booking(ctx).await?.updated_by))
    }

    /// `DateTime` when this `Booking` was made.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.booking(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Booking` was updated the last.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.booking(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `Booking`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::booking::Id)]
#[into(domain::booking::Id)]
#[graphql(name = "BookingId", transparent)]
pub struct Id(Uuid);

/// Data of a new `Booking`.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "BookingInput")]
pub struct Input {
    /// Day of the `Booking`.
    pub date: Date,

    /// ID of the booked `Candidate`.
    pub candidate: api::candidate::Id,

    /// ID of the `Company` the `Booking` is made at.
    pub company: api::company::Id,

    /// Short code of the `CandRole` the `Candidate` is booked for.
    pub role: ShortCode,

    /// Notes about the `Booking`.
    pub notes: Option<Notes>,
}

impl From<Input> for command::create_booking::Data {
    fn from(input: Input) -> Self {
        let Input {
            date,
            candidate,
            company,
            role,
            notes,
        } = input;
        Self {
            date,
            candidate: candidate.into(),
            company: company.into(),
            role: role.into(),
            notes: notes.map(Into::into),
        }
    }
}

/// Changes to the data of an existing `Booking`.
///
/// Omitted fields are left untouched, while an explicit `null` clears the
/// notes.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "BookingUpdateInput")]
pub struct UpdateInput {
    /// New day of the `Booking`.
    pub date: Option<Date>,

    /// ID of the newly booked `Candidate`.
    pub candidate: Option<api::candidate::Id>,

    /// ID of the `Company` the `Booking` is made at now.
    pub company: Option<api::company::Id>,

    /// Short code of the new `CandRole` the `Candidate` is booked for.
    pub role: Option<ShortCode>,

    /// New notes about the `Booking`.
    pub notes: Nullable<Notes>,
}

impl From<UpdateInput> for command::update_booking::Data {
    fn from(input: UpdateInput) -> Self {
        let UpdateInput {
            date,
            candidate,
            company,
            role,
            notes,
        } = input;
        Self {
            date,
            candidate: candidate.map(Into::into),
            company: company.map(Into::into),
            role: role.map(Into::into),
            notes: notes.explicit().map(|v| v.map(Into::into)),
        }
    }
}

define_error! {
    enum BookingError {
        #[code = "BOOKING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Booking not found"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Booking`] list.
    //!
    //! [`Booking`]: super::Booking

    use common::pagination::Ordering;
    use juniper::GraphQLEnum;
    use service::read::booking::list::Field;

    /// Ordering of a `Booking` list.
    #[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "BookingOrderByInput")]
    pub enum OrderBy {
        /// By booked day, ascending.
        #[graphql(name = "date_ASC")]
        DateAsc,

        /// By booked day, descending.
        #[graphql(name = "date_DESC")]
        DateDesc,

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
                OrderBy::DateAsc => Self::asc(Field::Date),
                OrderBy::DateDesc => Self::desc(Field::Date),
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
    use common::Date;
    use juniper::Nullable;
    use service::{
        command::{create_booking::Data, update_booking as update},
        domain,
    };

    use super::{Input, UpdateInput};

    #[test]
    fn converts_into_booking_data() {
        let candidate = domain::candidate::Id::new();
        let company = domain::company::Id::new();
        let input = Input {
            date: Date::parse("2020-05-04").unwrap(),
            candidate: candidate.into(),
            company: company.into(),
            role: domain::code::ShortCode::new("DEV").unwrap().into(),
            notes: None,
        };

        let data = Data::from(input);

        assert_eq!(data.date.to_string(), "2020-05-04");
        assert_eq!(data.candidate, candidate);
        assert_eq!(data.company, company);
        assert_eq!(AsRef::<str>::as_ref(&data.role), "DEV");
        assert!(data.notes.is_none());
    }

    #[test]
    fn update_keeps_omitted_fields() {
        let company = domain::company::Id::new();
        let data = update::Data::from(UpdateInput {
            date: None,
            candidate: None,
            company: Some(company.into()),
            role: None,
            notes: Nullable::ExplicitNull,
        });

        assert!(data.date.is_none());
        assert!(data.candidate.is_none());
        assert_eq!(data.company, Some(company));
        assert!(data.role.is_none());
        assert_eq!(data.notes, Some(None));

        let data = update::Data::from(UpdateInput {
            date: None,
            candidate: None,
            company: None,
            role: None,
            notes: Nullable::ImplicitNull,
        });
        assert!(data.notes.is_none());
    }
}
