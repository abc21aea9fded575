//! [`Command`] for authorizing a [`Session`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`] by its [`session::Token`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeUserSession> for Service<Db>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        let session = Session::decode(&token, &self.config().jwt_decoding_key)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        drop(
            self.database()
                .execute(Select(By::new(session.user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(session.user_id))
                .map_err(tracerr::wrap!())?,
        );

        Ok(session)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`session::Token`] is malformed, forged or expired.
    #[display("Invalid `Session` token: {_0}")]
    InvalidToken(jsonwebtoken::errors::Error),

    /// [`User`] the [`Session`] belongs to does not exist anymore.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use jsonwebtoken::EncodingKey;

    use crate::{
        command::{Command as _, CreateUserSession},
        domain::user::{self, Session},
        mock,
    };

    use super::{AuthorizeUserSession, ExecutionError};

    #[tokio::test]
    async fn authorizes_issued_token() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);
        let out = svc
            .execute(CreateUserSession::ByUserId(ann.id))
            .await
            .unwrap();

        let session = svc
            .execute(AuthorizeUserSession { token: out.token })
            .await
            .unwrap();

        assert_eq!(session.user_id, ann.id);
    }

    #[tokio::test]
    async fn rejects_foreign_and_expired_tokens() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);

        let foreign = Session {
            user_id: ann.id,
            expires_at: (DateTime::now() + Duration::from_secs(60)).coerce(),
        }
        .encode(&EncodingKey::from_secret(b"other-secret"))
        .unwrap();
        let err = svc
            .execute(AuthorizeUserSession { token: foreign })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::InvalidToken(_)));

        let expired = Session {
            user_id: ann.id,
            expires_at: (DateTime::now() - Duration::from_secs(3600)).coerce(),
        }
        .encode(&EncodingKey::from_secret(b"test-secret"))
        .unwrap();
        let err = svc
            .execute(AuthorizeUserSession { token: expired })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn rejects_token_of_deleted_user() {
        let (svc, _) = mock::service();

        let token = Session {
            user_id: user::Id::new(),
            expires_at: (DateTime::now() + Duration::from_secs(60)).coerce(),
        }
        .encode(&svc.config().jwt_encoding_key)
        .unwrap();
        let err = svc
            .execute(AuthorizeUserSession { token })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }
}
