//! [`Company`]-related definitions.

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
        code::{BusType, CompStatus, ShortCode},
        contact::{Email, Phone},
        scalar::{self, Notes},
    },
    define_error, AsError, Context, Error,
};

/// A client [`Company`] hiring through the office.
#[derive(Clone, Debug)]
pub struct Company {
    /// ID of this [`Company`].
    pub id: Id,

    /// [`domain::Company`] representing this [`Company`].
    company: OnceCell<domain::Company>,
}

impl From<domain::Company> for Company {
    fn from(company: domain::Company) -> Self {
        Self {
            id: company.id.into(),
            company: OnceCell::new_with(Some(company)),
        }
    }
}

impl Company {
    /// Creates a new [`Company`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Company`] with the provided ID exists,
    /// otherwise accessing this [`Company`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            company: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Company`] representing this [`Company`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Company`] doesn't exist.
    async fn company(&self, ctx: &Context) -> Result<&domain::Company, Error> {
        let id = self.id.into();
        self.company
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::company::ById::by(id))
                    .map_err(AsError::into_error)
                    .and_then(|c| {
                        future::ready(
                            c.ok_or_else(|| CompanyError::NotExists.into()),
                        )
                    })
                    .map_err(ctx.error())
            })
            .await
    }
}

/// A client `Company` hiring through the office.
#[graphql_object(context = Context)]
impl Company {
    /// Unique identifier of this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.company(ctx).await?.name.clone().into())
    }

    /// Email of this `Company`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(&self, ctx: &Context) -> Result<Option<Email>, Error> {
        Ok(self.company(ctx).await?.email.clone().map(Into::into))
    }

    /// Phone of this `Company`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn phone(&self, ctx: &Context) -> Result<Option<Phone>, Error> {
        Ok(self.company(ctx).await?.phone.clone().map(Into::into))
    }

    /// Website of this `Company`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.website",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn website(
        &self,
        ctx: &Context,
    ) -> Result<Option<Website>, Error> {
        Ok(self.company(ctx).await?.website.clone().map(Into::into))
    }

    /// Notes about this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.notes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn notes(&self, ctx: &Context) -> Result<Option<Notes>, Error> {
        Ok(self.company(ctx).await?.notes.clone().map(Into::into))
    }

    /// Consultant `User` looking after this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.consultant",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn consultant(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.company(ctx).await?.consultant))
    }

    /// Current status of this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<CompStatus, Error> {
        let short_code = self.company(ctx).await?.status.clone();
        CompStatus::by_short_code(short_code, ctx).await
    }

    /// Business type of this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.businessType",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn business_type(
        &self,
        ctx: &Context,
    ) -> Result<BusType, Error> {
        let short_code = self.company(ctx).await?.business_type.clone();
        BusType::by_short_code(short_code, ctx).await
    }

    /// `Booking`s made with this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.bookings",
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
                    company: Some(self.id.into()),
                    ..read::booking::list::Filter::default()
                },
                ordering: order_by.map(Into::into).unwrap_or_default(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| page.into_iter().map(Into::into).collect())
    }

    /// `User` who created this `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.createdBy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_by(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.company(ctx).await?.created_by))
    }

    /// `User` who updated this `Company` the last.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.updatedBy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_by(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(api::User::referenced(self.company(ctx).await?.updated_by))
    }

    /// `DateTime` when this `Company` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.company(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Company` was updated the last.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Company.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.company(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `Company`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::company::Id)]
#[into(domain::company::Id)]
#[graphql(name = "CompanyId", transparent)]
pub struct Id(Uuid);

/// Name of a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CompanyName",
    with = scalar::Via::<domain::company::Name>,
)]
pub struct Name(domain::company::Name);

/// Website address of a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::company::Website>)]
pub struct Website(domain::company::Website);

/// Data of a new `Company`.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "CompanyInput")]
pub struct Input {
    /// Name of the `Company`.
    pub name: Name,

    /// Email of the `Company`.
    pub email: Option<Email>,

    /// Phone of the `Company`.
    pub phone: Option<Phone>,

    /// Website of the `Company`.
    pub website: Option<Website>,

    /// Notes about the `Company`.
    pub notes: Option<Notes>,

    /// Consultant `User` looking after the `Company`.
    ///
    /// Omitted or `"Unspecified"` leaves the `Company` without one.
    pub consultant: Option<api::user::Reference>,

    /// Short code of the `CompStatus`.
    pub status: ShortCode,

    /// Short code of the `BusType`.
    pub business_type: ShortCode,
}

impl From<Input> for command::create_company::Data {
    fn from(input: Input) -> Self {
        let Input {
            name,
            email,
            phone,
            website,
            notes,
            consultant,
            status,
            business_type,
        } = input;
        Self {
            name: name.into(),
            email: email.map(Into::into),
            phone: phone.map(Into::into),
            website: website.map(Into::into),
            notes: notes.map(Into::into),
            consultant: consultant
                .map_or(common::Reference::Unspecified, Into::into),
            status: status.into(),
            business_type: business_type.into(),
        }
    }
}

/// Changes to the data of an existing `Company`.
///
/// Omitted fields are left untouched, while an explicit `null` clears an
/// optional one.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "CompanyUpdateInput")]
pub struct UpdateInput {
    /// New name of the `Company`.
    pub name: Option<Name>,

    /// New email of the `Company`.
    pub email: Nullable<Email>,

    /// New phone of the `Company`.
    pub phone: Nullable<Phone>,

    /// New website of the `Company`.
    pub website: Nullable<Website>,

    /// New notes about the `Company`.
    pub notes: Nullable<Notes>,

    /// Consultant `User` looking after the `Company`.
    ///
    /// Omitted or `"Unspecified"` unassigns the current one.
    pub consultant: Option<api::user::Reference>,

    /// Short code of the new `CompStatus`.
    pub status: Option<ShortCode>,

    /// Short code of the new `BusType`.
    pub business_type: Option<ShortCode>,
}

impl From<UpdateInput> for command::update_company::Data {
    fn from(input: UpdateInput) -> Self {
        let UpdateInput {
            name,
            email,
            phone,
            website,
            notes,
            consultant,
            status,
            business_type,
        } = input;
        Self {
            name: name.map(Into::into),
            email: email.explicit().map(|v| v.map(Into::into)),
            phone: phone.explicit().map(|v| v.map(Into::into)),
            website: website.explicit().map(|v| v.map(Into::into)),
            notes: notes.explicit().map(|v| v.map(Into::into)),
            consultant: consultant
                .map_or(common::Reference::Unspecified, Into::into),
            status: status.map(Into::into),
            business_type: business_type.map(Into::into),
        }
    }
}

define_error! {
    enum CompanyError {
        #[code = "COMPANY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Company not found"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Company`] list.
    //!
    //! [`Company`]: super::Company

    use common::pagination::Ordering;
    use juniper::GraphQLEnum;
    use service::read::company::list::Field;

    /// Ordering of a `Company` list.
    #[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "CompanyOrderByInput")]
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
                OrderBy::NameAsc => Self::asc(Field::Name),
                OrderBy::NameDesc => Self::desc(Field::Name),
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
    use juniper::Nullable;
    use service::{command::update_company::Data, domain};

    use super::UpdateInput;

    #[test]
    fn update_keeps_omitted_and_clears_nulls() {
        let data = Data::from(UpdateInput {
            name: None,
            email: Nullable::ImplicitNull,
            phone: Nullable::ImplicitNull,
            website: Nullable::ExplicitNull,
            notes: Nullable::Some(
                domain::Notes::new("Pays late").unwrap().into(),
            ),
            consultant: None,
            status: Some(domain::code::ShortCode::new("LEAD").unwrap().into()),
            business_type: None,
        });

        assert!(data.name.is_none());
        assert!(data.email.is_none());
        assert!(data.phone.is_none());
        assert_eq!(data.website, Some(None));
        assert_eq!(
            data.notes.flatten().as_ref().map(AsRef::<str>::as_ref),
            Some("Pays late"),
        );
        assert_eq!(data.consultant, common::Reference::Unspecified);
        assert_eq!(
            data.status.as_ref().map(AsRef::<str>::as_ref),
            Some("LEAD"),
        );
        assert!(data.business_type.is_none());
    }
}
