//! [`Command`] for updating a [`User`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Password};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::{create_user::EMAIL_CONSTRAINT, Command};

/// [`Command`] for updating a [`User`].
///
/// Only the provided fields are changed.
#[derive(Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to update.
    pub user_id: user::Id,

    /// New [`Name`] of the [`User`].
    pub name: Option<user::Name>,

    /// New [`Email`] of the [`User`].
    pub email: Option<user::Email>,

    /// New [`Password`] of the [`User`].
    pub password: Option<SecretBox<user::Password>>,
}

impl<Db> Command<UpdateUser> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<User>, &'l user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser {
            user_id,
            name,
            email,
            password,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `User`.
        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut user = tx
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        if let Some(email) = email.filter(|e| *e != user.email) {
            let occupant = tx
                .execute(Select(By::new(&email)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if occupant.is_some() {
                return Err(tracerr::new!(E::EmailOccupied(email)));
            }
            user.email = email;
        }
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(password) = password {
            user.password_hash =
                user::PasswordHash::new(password.expose_secret())
                    .map_err(tracerr::from_and_wrap!(=> E))?;
        }

        tx.execute(Update(user.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some(EMAIL_CONSTRAINT)) {
                    tracerr::new!(E::EmailOccupied(user.email.clone()))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Email`] is already occupied by another [`User`].
    #[display("`{_0}` email is occupied")]
    #[from(ignore)]
    EmailOccupied(#[error(not(source))] user::Email),

    /// [`Password`] hashing failed.
    #[display("Failed to hash `Password`: {_0}")]
    PasswordHash(password_hash::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
