//! [`Command`] for creating a [`Session`].

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::{session::Token, Email, Password};
use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`].
#[derive(Debug, From)]
pub enum CreateUserSession {
    /// Create a new [`Session`] by [`User`] credentials.
    ByCredentials {
        /// [`Email`] of a [`User`].
        email: user::Email,

        /// [`Password`] of a [`User`].
        password: SecretBox<user::Password>,
    },

    /// Create a new [`Session`] by [`User`] ID.
    ByUserId(user::Id),
}

/// Output of [`CreateUserSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: session::Token,

    /// [`User`] whose [`Session`] has been created.
    pub user: User,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<Db> Command<CreateUserSession> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<User>, &'l user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use CreateUserSession as Cmd;
        use ExecutionError as E;

        let user = match cmd {
            Cmd::ByCredentials { email, password } => {
                let user = self
                    .database()
                    .execute(Select(By::new(&email)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::WrongCredentials)
                    .map_err(tracerr::wrap!())?;

                if !user.password_hash.verify(password.expose_secret()) {
                    log::debug!("wrong password for `User(id: {})`", user.id);
                    return Err(tracerr::new!(E::WrongCredentials));
                }

                user
            }
            Cmd::ByUserId(user_id) => self
                .database()
                .execute(Select(By::new(user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(user_id))
                .map_err(tracerr::wrap!())?,
        };

        let session = Session {
            user_id: user.id,
            expires_at: (DateTime::now() + self.config().session_lifetime)
                .coerce(),
        };
        let token = session
            .encode(&self.config().jwt_encoding_key)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(Output {
            token,
            user,
            expires_at: session.expires_at,
        })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`CreateUserSession::ByCredentials`] contains wrong credentials.
    #[display("Wrong `User` credentials")]
    WrongCredentials,
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use secrecy::SecretBox;

    use crate::{
        command::Command as _,
        domain::user::{self, Session},
        mock,
    };

    use super::{CreateUserSession, ExecutionError};

    #[tokio::test]
    async fn signs_in_with_right_password_only() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);

        let out = svc
            .execute(CreateUserSession::ByCredentials {
                email: user::Email::new("ANN@example.com").unwrap(),
                password: SecretBox::new(Box::new(mock::PASSWORD.into())),
            })
            .await
            .unwrap();
        assert_eq!(out.user.id, ann.id);
        assert!(out.expires_at > DateTime::now().coerce());

        let session =
            Session::decode(&out.token, &svc.config().jwt_decoding_key)
                .unwrap();
        assert_eq!(session.user_id, ann.id);

        let err = svc
            .execute(CreateUserSession::ByCredentials {
                email: user::Email::new("ann@example.com").unwrap(),
                password: SecretBox::new(Box::new("wrong-one".into())),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
    }

    #[tokio::test]
    async fn rejects_unknown_email() {
        let (svc, _) = mock::service();

        let err = svc
            .execute(CreateUserSession::ByCredentials {
                email: user::Email::new("nobody@example.com").unwrap(),
                password: SecretBox::new(Box::new(mock::PASSWORD.into())),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
    }
}
