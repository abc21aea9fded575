//! [`Command`] for deleting a [`Booking`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    command::{authorize_user, AuthorizeUser},
    domain::{
        booking,
        user::{self, Permission},
        Booking, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Booking`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteBooking {
    /// ID of the [`User`] deleting the [`Booking`].
    pub by: user::Id,

    /// ID of the [`Booking`] to delete.
    pub id: booking::Id,
}

impl<Db> Command<DeleteBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Booking, booking::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Booking, booking::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteBooking { by, id } = cmd;

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
        let booking = tx
            .execute(Select(By::<Option<Booking>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(booking)
    }
}

/// Error of [`DeleteBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`User`] is not allowed to delete.
    #[display("Not allowed to delete `Booking`: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{authorize_user, Command as _},
        domain::{booking, user::Permission},
        mock,
    };

    use super::{DeleteBooking, ExecutionError};

    #[tokio::test]
    async fn refuses_without_delete_permission() {
        let (svc, db) = mock::service();
        let clerk = db.add_user("clerk@example.com", false, true);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        let b1 = db.add_booking(jo.id, acme.id, "2024-05-01");

        let err = svc
            .execute(DeleteBooking {
                by: clerk.id,
                id: b1.id,
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
        assert_eq!(db.bookings().len(), 1);
        assert!(db.writes().is_empty());
    }

    #[tokio::test]
    async fn deletes_existing_booking() {
        let (svc, db) = mock::service();
        let admin = db.add_user("admin@example.com", true, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        let b1 = db.add_booking(jo.id, acme.id, "2024-05-01");

        let deleted = svc
            .execute(DeleteBooking {
                by: admin.id,
                id: b1.id,
            })
            .await
            .unwrap();

        assert_eq!(deleted.id, b1.id);
        assert_eq!(deleted.date.to_string(), "2024-05-01");
        assert!(db.bookings().is_empty());
    }

    #[tokio::test]
    async fn fails_on_missing_booking() {
        let (svc, db) = mock::service();
        let admin = db.add_user("admin@example.com", true, false);

        let err = svc
            .execute(DeleteBooking {
                by: admin.id,
                id: booking::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::BookingNotExists(_)));
        assert!(db.writes().is_empty());
    }
}
