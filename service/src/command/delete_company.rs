//! [`Command`] for deleting a [`Company`].

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
        company,
        user::{self, Permission},
        Company, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Company`] along with its [`Booking`]s.
#[derive(Clone, Copy, Debug)]
pub struct DeleteCompany {
    /// ID of the [`User`] deleting the [`Company`].
    pub by: user::Id,

    /// ID of the [`Company`] to delete.
    pub id: company::Id,
}

impl<Db> Command<DeleteCompany> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Company, company::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Company, company::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Company;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteCompany) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteCompany { by, id } = cmd;

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
        let company = tx
            .execute(Select(By::<Option<Company>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CompanyNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(company)
    }
}

/// Error of [`DeleteCompany`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`User`] is not allowed to delete.
    #[display("Not allowed to delete `Company`: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Company`] doesn't exist.
    #[display("`Company(id: {_0})` does not exist")]
    #[from(ignore)]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{authorize_user, Command as _},
        domain::{company, user::Permission},
        mock,
    };

    use super::{DeleteCompany, ExecutionError};

    #[tokio::test]
    async fn refuses_without_delete_permission() {
        let (svc, db) = mock::service();
        let clerk = db.add_user("clerk@example.com", false, true);
        let acme = db.add_company("Acme");

        let err = svc
            .execute(DeleteCompany {
                by: clerk.id,
                id: acme.id,
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
        assert_eq!(db.companies().len(), 1);
        assert!(db.writes().is_empty());
    }

    #[tokio::test]
    async fn deletes_company_with_its_bookings() {
        let (svc, db) = mock::service();
        let admin = db.add_user("admin@example.com", true, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        let globex = db.add_company("Globex");
        drop(db.add_booking(jo.id, acme.id, "2024-05-01"));
        let kept = db.add_booking(jo.id, globex.id, "2024-05-02");

        let deleted = svc
            .execute(DeleteCompany {
                by: admin.id,
                id: acme.id,
            })
            .await
            .unwrap();

        assert_eq!(deleted.id, acme.id);
        assert_eq!(AsRef::<str>::as_ref(&deleted.name), "Acme");
        assert_eq!(db.companies().len(), 1);
        let bookings = db.bookings();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, kept.id);
    }

    #[tokio::test]
    async fn fails_on_missing_company() {
        let (svc, db) = mock::service();
        let admin = db.add_user("admin@example.com", true, false);

        let err = svc
            .execute(DeleteCompany {
                by: admin.id,
                id: company::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::CompanyNotExists(_)));
        assert!(db.writes().is_empty());
    }
}
