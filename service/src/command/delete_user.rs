//! [`Command`] for deleting a [`User`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

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

/// [`Command`] for deleting a [`User`] account by its owner.
///
/// Records referring to the deleted [`User`] lose that reference.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteUser {
    /// ID of the [`User`] to delete.
    pub user_id: user::Id,
}

impl<Db> Command<DeleteUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteUser { user_id } = cmd;

        drop(
            self.execute(AuthorizeUser::new(user_id, &[Permission::Delete]))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let user = tx
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`DeleteUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`User`] is not allowed to delete.
    #[display("Not allowed to delete `User`: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use crate::{command::Command as _, mock};

    use super::{DeleteUser, ExecutionError};

    #[tokio::test]
    async fn requires_delete_permission() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);
        let bob = db.add_user("bob@example.com", true, false);

        let err = svc.execute(DeleteUser::from(ann.id)).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Authorization(_)));
        assert_eq!(db.users().len(), 2);

        let deleted = svc.execute(DeleteUser::from(bob.id)).await.unwrap();
        assert_eq!(deleted.id, bob.id);
        assert_eq!(db.users().len(), 1);
    }
}
