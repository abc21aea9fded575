//! Lookup code definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{
    domain::{self, code},
    query, Query as _,
};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    define_error, AsError, Context, Error,
};

/// Defines a GraphQL object for the lookup code of the provided kind, along
/// with the scalar of its ID.
macro_rules! define_code {
    (
        $(#[doc = $doc:literal])*
        $kind:ident,
        #[doc = $id_doc:literal]
        $id:ident $(,)?
    ) => {
        $(#[doc = $doc])*
        #[derive(Clone, Debug, From, Into)]
        pub struct $kind(domain::Code<code::$kind>);

        impl $kind {
            #[doc = concat!(
                "Loads the [`", stringify!($kind), "`] other records refer \
                 to by the provided [`code::ShortCode`].",
            )]
            ///
            /// # Errors
            ///
            /// Errors if no such code exists.
            pub(crate) async fn by_short_code(
                short_code: code::ShortCode,
                ctx: &Context,
            ) -> Result<Self, Error> {
                ctx.service()
                    .execute(
                        query::code::ByShortCode::<code::$kind>::by(short_code),
                    )
                    .await
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())?
                    .ok_or_else(|| CodeError::NotExists.into())
                    .map_err(ctx.error())
                    .map(Self)
            }
        }

        $(#[doc = $doc])*
        #[graphql_object(context = Context)]
        impl $kind {
            /// Unique identifier of this code.
            #[tracing::instrument(
                skip_all,
                fields(
                    gql.name = concat!(stringify!($kind), ".id"),
                    otel.name = api::Query::SPAN_NAME,
                ),
            )]
            pub fn id(&self) -> $id {
                self.0.id.into()
            }

            /// Short code other records refer to this code by.
            #[tracing::instrument(
                skip_all,
                fields(
                    gql.name = concat!(stringify!($kind), ".shortCode"),
                    otel.name = api::Query::SPAN_NAME,
                ),
            )]
            pub fn short_code(&self) -> ShortCode {
                self.0.short_code.clone().into()
            }

            /// Human-readable description of this code.
            #[tracing::instrument(
                skip_all,
                fields(
                    gql.name = concat!(stringify!($kind), ".description"),
                    otel.name = api::Query::SPAN_NAME,
                ),
            )]
            pub fn description(&self) -> Description {
                self.0.description.clone().into()
            }
        }

        #[doc = $id_doc]
        #[derive(
            Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into,
            PartialEq,
        )]
        #[from(code::Id)]
        #[into(code::Id)]
        #[graphql(transparent)]
        pub struct $id(Uuid);
    };
}

define_code! {
    /// Status of a `Candidate` in the recruitment pipeline.
    CandStatus,
    /// Unique identifier of a `CandStatus`.
    CandStatusId,
}

define_code! {
    /// Role a `Candidate` may be placed in.
    CandRole,
    /// Unique identifier of a `CandRole`.
    CandRoleId,
}

define_code! {
    /// Status of a client `Company`.
    CompStatus,
    /// Unique identifier of a `CompStatus`.
    CompStatusId,
}

define_code! {
    /// Business type of a client `Company`.
    BusType,
    /// Unique identifier of a `BusType`.
    BusTypeId,
}

/// Short code of a lookup code, unique within its kind.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<code::ShortCode>)]
pub struct ShortCode(code::ShortCode);

/// Description of a lookup code.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CodeDescription",
    with = scalar::Via::<code::Description>,
)]
pub struct Description(code::Description);

/// Data of a lookup code.
#[derive(Debug, GraphQLInputObject)]
#[graphql(name = "CodeInput")]
pub struct Input {
    /// Short code, unique within the kind.
    pub short_code: ShortCode,

    /// Human-readable description.
    pub description: Description,
}

define_error! {
    enum CodeError {
        #[code = "CODE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Code not found"]
        NotExists,
    }
}
