//! [`Command`] for deleting a [`Candidate`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Booking;
use crate::{
    command::{authorize_user, AuthorizeUser},
    domain::{
        candidate,
        user::{self, Permission},
        Candidate, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Candidate`] along with its [`Booking`]s.
#[derive(Clone, Copy, Debug)]
pub struct DeleteCandidate {
    /// ID of the [`User`] deleting the [`Candidate`].
    pub by: user::Id,

    /// ID of the [`Candidate`] to delete.
    pub id: candidate::Id,
}

impl<Db> Command<DeleteCandidate> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Candidate>, candidate::Id>>,
            Ok = Option<Candidate>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Candidate, candidate::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Candidate, candidate::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Candidate;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteCandidate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteCandidate { by, id } = cmd;

        drop(
            self.execute(AuthorizeUser::new(by, &[Permission::Delete]))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let candidate = tx
            .execute(Select(By::<Option<Candidate>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CandidateNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(candidate)
    }
}

/// Error of [`DeleteCandidate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`User`] is not allowed to delete.
    #[display("Not allowed to delete `Candidate`: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Candidate`] doesn't exist.
    #[display("`Candidate(id: {_0})` does not exist")]
    #[from(ignore)]
    CandidateNotExists(#[error(not(source))] candidate::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{authorize_user, Command as _},
        domain::{candidate, user::Permission},
        mock,
    };

    use super::{DeleteCandidate, ExecutionError};

    #[tokio::test]
    async fn refuses_without_delete_permission() {
        let (svc, db) = mock::service();
        let clerk = db.add_user("clerk@example.com", false, true);
        let jo = db.add_candidate("Jo");

        let err = svc
            .execute(DeleteCandidate {
                by: clerk.id,
                id: jo.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Authorization(
                authorize_user::ExecutionError::PermissionDenied(_),
            ),
        ));
        if let ExecutionError::Authorization(e) = err.as_ref() {
            assert_eq!(e.denied_permission(), Some(Permission::Delete));
        }
        assert_eq!(db.candidates().len(), 1);
        assert!(db.writes().is_empty());
    }

    #[tokio::test]
    async fn deletes_existing_candidate() {
        let (svc, db) = mock::service();
        let admin = db.add_user("admin@example.com", true, false);
        let jo = db.add_candidate("Jo");

        let deleted = svc
            .execute(DeleteCandidate {
                by: admin.id,
                id: jo.id,
            })
            .await
            .unwrap();

        assert_eq!(deleted.id, jo.id);
        assert!(db.candidates().is_empty());
    }

    #[tokio::test]
    async fn fails_on_missing_candidate() {
        let (svc, db) = mock::service();
        let admin = db.add_user("admin@example.com", true, false);

        let err = svc
            .execute(DeleteCandidate {
                by: admin.id,
                id: candidate::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::CandidateNotExists(_)));
        assert!(db.writes().is_empty());
    }
}
