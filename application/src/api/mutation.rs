//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use secrecy::SecretBox;
use service::{command, domain::code, Command as _};

use crate::{
    api, context::AuthError, define_error, AsError, Context, Error, Session,
};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";

    /// Remembers the [`Session`] described by the provided
    /// [`command::create_user_session::Output`] as the current one.
    async fn start_session(
        output: command::create_user_session::Output,
        ctx: &Context,
    ) -> api::user::session::AuthPayload {
        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        output.into()
    }
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Signs up a new `User` and authenticates it.
    ///
    /// Granting `delPermission` or `officeManager` requires the request to
    /// be authenticated by an office manager.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `Email` is used by another `User`;
    /// - `AUTHORIZATION_REQUIRED` - permissions are requested without a
    ///                              valid token;
    /// - `NOT_OFFICE_MANAGER` - permissions are requested by a `User` who
    ///                          is not an office manager.
    #[tracing::instrument(
        skip_all,
        fields(
            del_permission = ?data.del_permission,
            email = %data.email,
            gql.name = "createUser",
            name = %data.name,
            office_manager = ?data.office_manager,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        data: api::user::CreateInput,
        ctx: &Context,
    ) -> Result<api::user::session::AuthPayload, Error> {
        let api::user::CreateInput {
            name,
            email,
            password,
            del_permission,
            office_manager,
        } = data;
        let del_permission = del_permission.unwrap_or_default();
        let office_manager = office_manager.unwrap_or_default();

        let issuer = if del_permission || office_manager {
            Some(ctx.current_session().await?.user_id.into())
        } else {
            None
        };

        let user = ctx
            .service()
            .execute(command::CreateUser {
                name: name.into(),
                email: email.into(),
                password: SecretBox::init_with(move || password.into()),
                del_permission,
                office_manager,
                issuer,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByUserId(user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(Self::start_session(output, ctx).await)
    }

    /// Authenticates the `User` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials don't match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %data.email,
            gql.name = "login",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn login(
        data: api::user::LoginInput,
        ctx: &Context,
    ) -> Result<api::user::session::AuthPayload, Error> {
        let api::user::LoginInput { email, password } = data;

        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                email: email.into(),
                password: SecretBox::init_with(move || password.into()),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(Self::start_session(output, ctx).await)
    }

    /// Updates the authenticated `User` with the provided data.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `EMAIL_OCCUPIED` - provided `Email` is used by another `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = ?data.email,
            gql.name = "updateUser",
            name = ?data.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_user(
        data: api::user::UpdateInput,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let api::user::UpdateInput {
            name,
            email,
            password,
        } = data;

        ctx.service()
            .execute(command::UpdateUser {
                user_id: my_id.into(),
                name: name.map(Into::into),
                email: email.map(Into::into),
                password: password
                    .map(|p| SecretBox::init_with(move || p.into())),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the account of the authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteUser {
                user_id: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Candidate` with the provided data.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token.
    #[tracing::instrument(
        skip_all,
        fields(
            forename = %data.forename,
            gql.name = "createCandidate",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_candidate(
        data: api::candidate::Input,
        ctx: &Context,
    ) -> Result<api::Candidate, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateCandidate {
                by: my_id.into(),
                data: data.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the data of the `Candidate` with the provided ID.
    ///
    /// Omitted fields are left untouched, except the `consultant`, which is
    /// unassigned then.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `CANDIDATE_NOT_EXISTS` - no `Candidate` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCandidate",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_candidate(
        id: api::candidate::Id,
        data: api::candidate::UpdateInput,
        ctx: &Context,
    ) -> Result<api::Candidate, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateCandidate {
                by: my_id.into(),
                id: id.into(),
                data: data.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Candidate` with the provided ID along with its
    /// `Booking`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records;
    /// - `CANDIDATE_NOT_EXISTS` - no `Candidate` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCandidate",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_candidate(
        id: api::candidate::Id,
        ctx: &Context,
    ) -> Result<api::Candidate, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteCandidate {
                by: my_id.into(),
                id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Company` with the provided data.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCompany",
            name = %data.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_company(
        data: api::company::Input,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateCompany {
                by: my_id.into(),
                data: data.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the data of the `Company` with the provided ID.
    ///
    /// Omitted fields are left untouched, except the `consultant`, which is
    /// unassigned then.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `COMPANY_NOT_EXISTS` - no `Company` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCompany",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_company(
        id: api::company::Id,
        data: api::company::UpdateInput,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateCompany {
                by: my_id.into(),
                id: id.into(),
                data: data.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Company` with the provided ID along with its `Booking`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records;
    /// - `COMPANY_NOT_EXISTS` - no `Company` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCompany",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_company(
        id: api::company::Id,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteCompany {
                by: my_id.into(),
                id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Books the `Candidate` at the `Company` for the provided day.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `CANDIDATE_NOT_EXISTS` - no `Candidate` has the provided ID;
    /// - `COMPANY_NOT_EXISTS` - no `Company` has the provided ID;
    /// - `ROLE_NOT_EXISTS` - no `CandRole` has the provided short code;
    /// - `DAY_ALREADY_BOOKED` - the `Candidate` is booked for that day.
    #[tracing::instrument(
        skip_all,
        fields(
            candidate = %data.candidate,
            company = %data.company,
            date = %data.date,
            gql.name = "createBooking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_booking(
        data: api::booking::Input,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateBooking {
                by: my_id.into(),
                data: data.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the data of the `Booking` with the provided ID.
    ///
    /// Omitted fields are left untouched.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `BOOKING_NOT_EXISTS` - no `Booking` has the provided ID;
    /// - `CANDIDATE_NOT_EXISTS` - no `Candidate` has the provided ID;
    /// - `COMPANY_NOT_EXISTS` - no `Company` has the provided ID;
    /// - `ROLE_NOT_EXISTS` - no `CandRole` has the provided short code;
    /// - `DAY_ALREADY_BOOKED` - the `Candidate` has another `Booking` for
    ///                          that day.
    #[tracing::instrument(
        skip_all,
        fields(
            date = ?data.date,
            gql.name = "updateBooking",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_booking(
        id: api::booking::Id,
        data: api::booking::UpdateInput,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateBooking {
                by: my_id.into(),
                id: id.into(),
                data: data.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Booking` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records;
    /// - `BOOKING_NOT_EXISTS` - no `Booking` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteBooking",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_booking(
        id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteBooking {
                by: my_id.into(),
                id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `CandStatus`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCandStatus",
            otel.name = Self::SPAN_NAME,
            short_code = %data.short_code,
        ),
    )]
    pub async fn create_cand_status(
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::CandStatus, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateCode::<code::CandStatus>::new(
                my_id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `CandStatus` with the provided ID.
    ///
    /// `Candidate`s keep referring to the updated `CandStatus`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `CODE_NOT_EXISTS` - no `CandStatus` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCandStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_cand_status(
        id: api::code::CandStatusId,
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::CandStatus, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateCode::<code::CandStatus>::new(
                my_id.into(),
                id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `CandStatus` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records;
    /// - `CODE_NOT_EXISTS` - no `CandStatus` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCandStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_cand_status(
        id: api::code::CandStatusId,
        ctx: &Context,
    ) -> Result<api::code::CandStatus, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteCode::<code::CandStatus>::new(
                my_id.into(),
                id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `CandRole`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCandRole",
            otel.name = Self::SPAN_NAME,
            short_code = %data.short_code,
        ),
    )]
    pub async fn create_cand_role(
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::CandRole, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateCode::<code::CandRole>::new(
                my_id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `CandRole` with the provided ID.
    ///
    /// `Candidate`s and `Booking`s keep referring to the updated `CandRole`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `CODE_NOT_EXISTS` - no `CandRole` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCandRole",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_cand_role(
        id: api::code::CandRoleId,
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::CandRole, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateCode::<code::CandRole>::new(
                my_id.into(),
                id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `CandRole` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records;
    /// - `CODE_NOT_EXISTS` - no `CandRole` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCandRole",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_cand_role(
        id: api::code::CandRoleId,
        ctx: &Context,
    ) -> Result<api::code::CandRole, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteCode::<code::CandRole>::new(
                my_id.into(),
                id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `CompStatus`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCompStatus",
            otel.name = Self::SPAN_NAME,
            short_code = %data.short_code,
        ),
    )]
    pub async fn create_comp_status(
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::CompStatus, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateCode::<code::CompStatus>::new(
                my_id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `CompStatus` with the provided ID.
    ///
    /// `Company`s keep referring to the updated `CompStatus`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `CODE_NOT_EXISTS` - no `CompStatus` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCompStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_comp_status(
        id: api::code::CompStatusId,
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::CompStatus, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateCode::<code::CompStatus>::new(
                my_id.into(),
                id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `CompStatus` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records;
    /// - `CODE_NOT_EXISTS` - no `CompStatus` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCompStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_comp_status(
        id: api::code::CompStatusId,
        ctx: &Context,
    ) -> Result<api::code::CompStatus, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteCode::<code::CompStatus>::new(
                my_id.into(),
                id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `BusType`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createBusType",
            otel.name = Self::SPAN_NAME,
            short_code = %data.short_code,
        ),
    )]
    pub async fn create_bus_type(
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::BusType, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateCode::<code::BusType>::new(
                my_id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `BusType` with the provided ID.
    ///
    /// `Company`s keep referring to the updated `BusType`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `CODE_NOT_EXISTS` - no `BusType` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateBusType",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_bus_type(
        id: api::code::BusTypeId,
        data: api::code::Input,
        ctx: &Context,
    ) -> Result<api::code::BusType, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateCode::<code::BusType>::new(
                my_id.into(),
                id.into(),
                data.short_code.into(),
                data.description.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `BusType` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid token;
    /// - `NOT_OFFICE_MANAGER` - the `User` is not an office manager;
    /// - `NO_DELETE_PERMISSION` - the `User` may not delete records;
    /// - `CODE_NOT_EXISTS` - no `BusType` has the provided ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteBusType",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_bus_type(
        id: api::code::BusTypeId,
        ctx: &Context,
    ) -> Result<api::code::BusType, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteCode::<code::BusType>::new(
                my_id.into(),
                id.into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "Email is used by another user"]
                EmailOccupied,
            }
        }

        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
            Self::IssuerRequired => {
                Some(AuthError::AuthorizationRequired.into())
            }
            Self::PasswordHash(_) => None,
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = UNAUTHORIZED]
                #[message = "Unable to login"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::update_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "Email is used by another user"]
                EmailOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
            Self::PasswordHash(_) => None,
            Self::UserNotExists(_) => {
                Some(AuthError::AuthorizationRequired.into())
            }
        }
    }
}

impl AsError for command::delete_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => {
                Some(AuthError::AuthorizationRequired.into())
            }
        }
    }
}

impl AsError for command::create_candidate::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_candidate::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CANDIDATE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to update candidate"]
                CandidateNotExists,
            }
        }

        match self {
            Self::CandidateNotExists(_) => {
                Some(Error::CandidateNotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_candidate::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CANDIDATE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to delete candidate"]
                CandidateNotExists,
            }
        }

        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::CandidateNotExists(_) => {
                Some(Error::CandidateNotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::create_company::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_company::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "COMPANY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to update company"]
                CompanyNotExists,
            }
        }

        match self {
            Self::CompanyNotExists(_) => Some(Error::CompanyNotExists.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_company::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "COMPANY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to delete company"]
                CompanyNotExists,
            }
        }

        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::CompanyNotExists(_) => Some(Error::CompanyNotExists.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum BookingError {
        #[code = "DAY_ALREADY_BOOKED"]
        #[status = CONFLICT]
        #[message = "Unable to make booking, day already booked"]
        DayAlreadyBooked,

        #[code = "CANDIDATE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Unable to make booking, candidate not found"]
        CandidateNotExists,

        #[code = "COMPANY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Unable to make booking, company not found"]
        CompanyNotExists,

        #[code = "ROLE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Unable to make booking, role not found"]
        RoleNotExists,
    }
}

impl AsError for command::create_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::CandidateNotExists(_) => {
                Some(BookingError::CandidateNotExists.into())
            }
            Self::CompanyNotExists(_) => {
                Some(BookingError::CompanyNotExists.into())
            }
            Self::RoleNotExists(_) => Some(BookingError::RoleNotExists.into()),
            Self::DayAlreadyBooked(_) => {
                Some(BookingError::DayAlreadyBooked.into())
            }
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "BOOKING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to update Booking"]
                BookingNotExists,
            }
        }

        match self {
            Self::BookingNotExists(_) => Some(Error::BookingNotExists.into()),
            Self::CandidateNotExists(_) => {
                Some(BookingError::CandidateNotExists.into())
            }
            Self::CompanyNotExists(_) => {
                Some(BookingError::CompanyNotExists.into())
            }
            Self::RoleNotExists(_) => Some(BookingError::RoleNotExists.into()),
            Self::DayAlreadyBooked(_) => {
                Some(BookingError::DayAlreadyBooked.into())
            }
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "BOOKING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to delete Booking"]
                BookingNotExists,
            }
        }

        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::BookingNotExists(_) => Some(Error::BookingNotExists.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::create_code::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_code::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CODE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to update Code"]
                CodeNotExists,
            }
        }

        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::CodeNotExists(_) => Some(Error::CodeNotExists.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_code::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CODE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Unable to delete Code"]
                CodeNotExists,
            }
        }

        match self {
            Self::Authorization(e) => e.try_as_error(),
            Self::CodeNotExists(_) => Some(Error::CodeNotExists.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}
