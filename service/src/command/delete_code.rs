//! [`Command`] for deleting a lookup [`Code`].

use std::marker::PhantomData;

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    command::{authorize_user, AuthorizeUser},
    domain::{
        code,
        user::{self, Permission},
        Code, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Code`] of the `K`ind.
///
/// Requires the deleting [`User`] to be an office manager allowed to delete
/// records. A [`Code`] still referred to cannot be deleted.
#[derive(Clone, Copy, Debug)]
pub struct DeleteCode<K> {
    /// ID of the [`User`] deleting the [`Code`].
    pub by: user::Id,

    /// ID of the [`Code`] to delete.
    pub id: code::Id,

    /// Kind of the [`Code`].
    pub kind: PhantomData<K>,
}

impl<K> DeleteCode<K> {
    /// Creates a new [`DeleteCode`] [`Command`].
    #[must_use]
    pub fn new(by: user::Id, id: code::Id) -> Self {
        Self {
            by,
            id,
            kind: PhantomData,
        }
    }
}

impl<Db, K> Command<DeleteCode<K>> for Service<Db>
where
    K: code::Kind,
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Code<K>>, code::Id>>,
            Ok = Option<Code<K>>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Code<K>, code::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Code<K>, code::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Code<K>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteCode<K>) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteCode { by, id, .. } = cmd;

        drop(
            self.execute(AuthorizeUser::new(
                by,
                &[Permission::OfficeManager, Permission::Delete],
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Code<K>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let code = tx
            .execute(Select(By::<Option<Code<K>>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CodeNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Code<K>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(code)
    }
}

/// Error of [`DeleteCode`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`User`] is not allowed to delete [`Code`]s.
    #[display("Not allowed to delete `Code`: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Code`] doesn't exist.
    #[display("`Code(id: {_0})` does not exist")]
    #[from(ignore)]
    CodeNotExists(#[error(not(source))] code::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{code::BusType, user::Permission},
        mock,
    };

    use super::{DeleteCode, ExecutionError};

    #[tokio::test]
    async fn checks_office_manager_before_delete_permission() {
        let (svc, db) = mock::service();
        let deleter = db.add_user("del@example.com", true, false);
        let manager = db.add_user("boss@example.com", false, true);
        let owner = db.add_user("owner@example.com", true, true);
        let code = db.add_code::<BusType>("IT");

        for (user, denied) in [
            (deleter.id, Permission::OfficeManager),
            (manager.id, Permission::Delete),
        ] {
            let err = svc
                .execute(DeleteCode::<BusType>::new(user, code.id))
                .await
                .unwrap_err();
            match err.as_ref() {
                ExecutionError::Authorization(e) => {
                    assert_eq!(e.denied_permission(), Some(denied));
                }
                e => panic!("unexpected error: {e}"),
            }
        }
        assert!(db.writes().is_empty());

        let deleted = svc
            .execute(DeleteCode::<BusType>::new(owner.id, code.id))
            .await
            .unwrap();
        assert_eq!(deleted.id, code.id);
        assert_eq!(db.writes().len(), 1);
    }
}
