//! GraphQL [`Query`]s definitions.

use common::{pagination::Arguments, search::CaseVariants};
use itertools::Itertools as _;
use juniper::graphql_object;
use service::{domain::code, query, read, Query as _};

use crate::{
    api::{
        self, booking::BookingError, candidate::CandidateError,
        company::CompanyError, user::UserError,
    },
    AsError, Context, Error,
};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";

    /// Selects the [`api::Candidate`]s by the provided
    /// [`read::candidate::list::Selector`].
    async fn select_candidates(
        selector: read::candidate::list::Selector,
        ctx: &Context,
    ) -> Result<Vec<api::Candidate>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::candidate::List::by(selector))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| page.into_iter().map(Into::into).collect())
    }

    /// Selects the [`api::Company`]s by the provided
    /// [`read::company::list::Selector`].
    async fn select_companies(
        selector: read::company::list::Selector,
        ctx: &Context,
    ) -> Result<Vec<api::Company>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::company::List::by(selector))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| page.into_iter().map(Into::into).collect())
    }

    /// Selects the [`api::Booking`]s by the provided
    /// [`read::booking::list::Selector`].
    async fn select_bookings(
        selector: read::booking::list::Selector,
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(query::booking::List::by(selector))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| page.into_iter().map(Into::into).collect())
    }
}

/// Parses the raw pagination arguments.
///
/// # Errors
///
/// With [`api::PaginationError::Invalid`] if `first` or `skip` is negative.
fn arguments<C>(
    first: Option<i32>,
    skip: Option<i32>,
    after: Option<C>,
    ctx: &Context,
) -> Result<Arguments<C>, Error> {
    Arguments::new(first, skip, after)
        .ok_or_else(|| api::PaginationError::Invalid.into())
        .map_err(ctx.error())
}

/// Picks the only node of the provided `page`, failing with the `missing`
/// error if there are none or many.
fn the_only<T>(page: Vec<T>, missing: impl Into<Error>) -> Result<T, Error> {
    page.into_iter().exactly_one().map_err(|_| missing.into())
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "me",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn me(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists the `User`s whose name contains the provided `query`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - `first` or `skip` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            first = ?first,
            gql.name = "users",
            order_by = ?order_by,
            otel.name = Self::SPAN_NAME,
            query = ?query,
            skip = ?skip,
        ),
    )]
    pub async fn users(
        query: Option<String>,
        first: Option<i32>,
        skip: Option<i32>,
        after: Option<api::user::Id>,
        order_by: Option<api::user::list::OrderBy>,
        ctx: &Context,
    ) -> Result<Vec<api::User>, Error> {
        let arguments = arguments(first, skip, after.map(Into::into), ctx)?;

        ctx.service()
            .execute(query::user::List::by(read::user::list::Selector {
                arguments,
                filter: read::user::list::Filter {
                    id: None,
                    name: query,
                },
                ordering: order_by.map(Into::into).unwrap_or_default(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| page.into_iter().map(Into::into).collect())
    }

    /// Lists the `Candidate`s whose forename or surname contains the
    /// provided `query` in any letter case.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `INVALID_PAGINATION_ARGUMENTS` - `first` or `skip` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            first = ?first,
            gql.name = "candidates",
            order_by = ?order_by,
            otel.name = Self::SPAN_NAME,
            query = ?query,
            skip = ?skip,
        ),
    )]
    pub async fn candidates(
        query: Option<String>,
        first: Option<i32>,
        skip: Option<i32>,
        after: Option<api::candidate::Id>,
        order_by: Option<api::candidate::list::OrderBy>,
        ctx: &Context,
    ) -> Result<Vec<api::Candidate>, Error> {
        let arguments = arguments(first, skip, after.map(Into::into), ctx)?;

        Self::select_candidates(
            read::candidate::list::Selector {
                arguments,
                filter: read::candidate::list::Filter {
                    id: None,
                    search: query.as_deref().map(CaseVariants::new),
                },
                ordering: order_by.map(Into::into).unwrap_or_default(),
            },
            ctx,
        )
        .await
    }

    /// Returns the `Candidate` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `CANDIDATE_NOT_EXISTS` - no `Candidate` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "candidate",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn candidate(
        id: api::candidate::Id,
        ctx: &Context,
    ) -> Result<api::Candidate, Error> {
        Self::select_candidates(
            read::candidate::list::Selector {
                filter: read::candidate::list::Filter {
                    id: Some(id.into()),
                    search: None,
                },
                ..read::candidate::list::Selector::default()
            },
            ctx,
        )
        .await
        .and_then(|page| the_only(page, CandidateError::NotExists))
        .map_err(ctx.error())
    }

    /// Lists the `Company`s whose name contains the provided `query` in any
    /// letter case.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `INVALID_PAGINATION_ARGUMENTS` - `first` or `skip` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            first = ?first,
            gql.name = "companies",
            order_by = ?order_by,
            otel.name = Self::SPAN_NAME,
            query = ?query,
            skip = ?skip,
        ),
    )]
    pub async fn companies(
        query: Option<String>,
        first: Option<i32>,
        skip: Option<i32>,
        after: Option<api::company::Id>,
        order_by: Option<api::company::list::OrderBy>,
        ctx: &Context,
    ) -> Result<Vec<api::Company>, Error> {
        let arguments = arguments(first, skip, after.map(Into::into), ctx)?;

        Self::select_companies(
            read::company::list::Selector {
                arguments,
                filter: read::company::list::Filter {
                    id: None,
                    search: query.as_deref().map(CaseVariants::new),
                },
                ordering: order_by.map(Into::into).unwrap_or_default(),
            },
            ctx,
        )
        .await
    }

    /// Returns the `Company` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `COMPANY_NOT_EXISTS` - no `Company` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "company",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn company(
        id: api::company::Id,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        Self::select_companies(
            read::company::list::Selector {
                filter: read::company::list::Filter {
                    id: Some(id.into()),
                    search: None,
                },
                ..read::company::list::Selector::default()
            },
            ctx,
        )
        .await
        .and_then(|page| the_only(page, CompanyError::NotExists))
        .map_err(ctx.error())
    }

    /// Lists the `Booking`s of the provided `Candidate` and/or `Company`.
    ///
    /// Both criteria apply when both are provided.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token.
    #[tracing::instrument(
        skip_all,
        fields(
            cand_id = ?cand_id,
            comp_id = ?comp_id,
            gql.name = "bookings",
            order_by = ?order_by,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn bookings(
        cand_id: Option<api::candidate::Id>,
        comp_id: Option<api::company::Id>,
        order_by: Option<api::booking::list::OrderBy>,
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        Self::select_bookings(
            read::booking::list::Selector {
                arguments: Arguments::default(),
                filter: read::booking::list::Filter {
                    candidate: cand_id.map(Into::into),
                    company: comp_id.map(Into::into),
                    ..read::booking::list::Filter::default()
                },
                ordering: order_by.map(Into::into).unwrap_or_default(),
            },
            ctx,
        )
        .await
    }

    /// Returns the `Booking` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `BOOKING_NOT_EXISTS` - no `Booking` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "booking",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn booking(
        id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        Self::select_bookings(
            read::booking::list::Selector {
                filter: read::booking::list::Filter {
                    id: Some(id.into()),
                    ..read::booking::list::Filter::default()
                },
                ..read::booking::list::Selector::default()
            },
            ctx,
        )
        .await
        .and_then(|page| the_only(page, BookingError::NotExists))
        .map_err(ctx.error())
    }

    /// Lists all the `CandStatus`es ordered by their short codes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "candStatuses",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cand_statuses(
        ctx: &Context,
    ) -> Result<Vec<api::code::CandStatus>, Error> {
        ctx.service()
            .execute(query::code::List::<code::CandStatus>::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|codes| codes.into_iter().map(Into::into).collect())
    }

    /// Lists all the `CandRole`s ordered by their short codes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "candRoles",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cand_roles(
        ctx: &Context,
    ) -> Result<Vec<api::code::CandRole>, Error> {
        ctx.service()
            .execute(query::code::List::<code::CandRole>::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|codes| codes.into_iter().map(Into::into).collect())
    }

    /// Lists all the `CompStatus`es ordered by their short codes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "compStatuses",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn comp_statuses(
        ctx: &Context,
    ) -> Result<Vec<api::code::CompStatus>, Error> {
        ctx.service()
            .execute(query::code::List::<code::CompStatus>::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|codes| codes.into_iter().map(Into::into).collect())
    }

    /// Lists all the `BusType`s ordered by their short codes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "busTypes",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn bus_types(
        ctx: &Context,
    ) -> Result<Vec<api::code::BusType>, Error> {
        ctx.service()
            .execute(query::code::List::<code::BusType>::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|codes| codes.into_iter().map(Into::into).collect())
    }
}
