//! [`Command`] for authorizing a [`User`] to perform a privileged action.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, permission::PermissionDenied, Permission},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`User`] to perform a privileged action.
///
/// The [`User`] is loaded afresh on every execution, so revoked
/// [`Permission`]s take effect immediately.
#[derive(Clone, Debug)]
pub struct AuthorizeUser {
    /// ID of the [`User`] to authorize.
    pub user_id: user::Id,

    /// [`Permission`]s the [`User`] must be granted, checked in order.
    pub permissions: Vec<Permission>,
}

impl AuthorizeUser {
    /// Creates a new [`AuthorizeUser`] [`Command`] requiring the provided
    /// [`Permission`]s.
    #[must_use]
    pub fn new(user_id: user::Id, permissions: &[Permission]) -> Self {
        Self {
            user_id,
            permissions: permissions.to_vec(),
        }
    }
}

impl<Db> Command<AuthorizeUser> for Service<Db>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AuthorizeUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUser {
            user_id,
            permissions,
        } = cmd;

        let user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        user.require(&permissions)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`AuthorizeUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] lacks a required [`Permission`].
    #[display("{_0}")]
    PermissionDenied(PermissionDenied),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

impl ExecutionError {
    /// Returns the [`Permission`] the [`User`] lacks, if that's the cause.
    #[must_use]
    pub fn denied_permission(&self) -> Option<Permission> {
        match self {
            Self::PermissionDenied(PermissionDenied(p)) => Some(*p),
            Self::Db(_) | Self::UserNotExists(_) => None,
        }
    }
}
