//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Password};
use crate::{
    command::{authorize_user, AuthorizeUser},
    domain::{
        user::{self, Permission},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// Name of the storage constraint keeping [`User`] emails unique.
pub(crate) const EMAIL_CONSTRAINT: &str = "users_email_key";

/// [`Command`] for creating a new [`User`].
#[derive(Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// Whether a new [`User`] is allowed to delete records.
    pub del_permission: bool,

    /// Whether a new [`User`] manages the office.
    pub office_manager: bool,

    /// ID of the [`User`] creating a new one, if authenticated.
    ///
    /// Required to be an office manager for granting any permissions.
    pub issuer: Option<user::Id>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<User>, &'l user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            email,
            password,
            del_permission,
            office_manager,
            issuer,
        } = cmd;

        if del_permission || office_manager {
            let issuer = issuer
                .ok_or(E::IssuerRequired)
                .map_err(tracerr::wrap!())?;
            drop(
                self.execute(AuthorizeUser::new(
                    issuer,
                    &[Permission::OfficeManager],
                ))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
            );
        }

        let u = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let user = User {
            id: user::Id::new(),
            name,
            email,
            password_hash: user::PasswordHash::new(password.expose_secret())
                .map_err(tracerr::from_and_wrap!(=> E))?,
            del_permission,
            office_manager,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(user.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some(EMAIL_CONSTRAINT)) {
                    tracerr::new!(E::EmailOccupied(user.email.clone()))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Issuer is not allowed to grant permissions.
    #[display("Not allowed to grant permissions: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`user::Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    #[from(ignore)]
    EmailOccupied(#[error(not(source))] user::Email),

    /// Permissions are requested without an authenticated issuer.
    #[display("Granting permissions requires an authenticated issuer")]
    IssuerRequired,

    /// [`Password`] hashing failed.
    #[display("Failed to hash `Password`: {_0}")]
    PasswordHash(password_hash::Error),
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::{authorize_user, Command as _},
        domain::user::{self, Permission},
        mock,
    };

    use super::{CreateUser, ExecutionError};

    fn cmd(email: &str, office_manager: bool, issuer: Option<user::Id>) -> CreateUser {
        CreateUser {
            name: user::Name::new("Bob").unwrap(),
            email: user::Email::new(email).unwrap(),
            password: SecretBox::new(Box::new(mock::PASSWORD.into())),
            del_permission: false,
            office_manager,
            issuer,
        }
    }

    #[tokio::test]
    async fn creates_plain_user_without_issuer() {
        let (svc, db) = mock::service();

        let user = svc
            .execute(cmd("Bob@Example.com", false, None))
            .await
            .unwrap();

        assert_eq!(AsRef::<str>::as_ref(&user.email), "bob@example.com");
        assert!(user.password_hash.verify(&mock::PASSWORD.into()));
        assert_eq!(db.users().len(), 1);
    }

    #[tokio::test]
    async fn rejects_occupied_email() {
        let (svc, db) = mock::service();
        drop(db.add_user("bob@example.com", false, false));

        let err = svc
            .execute(cmd("BOB@example.com", false, None))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmailOccupied(_)));
        assert_eq!(db.users().len(), 1);
    }

    #[tokio::test]
    async fn grants_permissions_by_office_manager_only() {
        let (svc, db) = mock::service();
        let clerk = db.add_user("clerk@example.com", true, false);
        let manager = db.add_user("boss@example.com", true, true);

        let err = svc
            .execute(cmd("a@example.com", true, None))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::IssuerRequired));

        let err = svc
            .execute(cmd("b@example.com", true, Some(clerk.id)))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Authorization(e)
                if e.denied_permission() == Some(Permission::OfficeManager),
        ));
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Authorization(
                authorize_user::ExecutionError::PermissionDenied(_),
            ),
        ));

        let user = svc
            .execute(cmd("c@example.com", true, Some(manager.id)))
            .await
            .unwrap();
        assert!(user.office_manager);
        assert_eq!(db.users().len(), 3);
    }
}
