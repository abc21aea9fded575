//! [`Command`] for creating a new [`Booking`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    Connect, Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        candidate,
        code::{CandRole, ShortCode},
        company, user, Booking, Candidate, Code, Company, Notes,
    },
    infra::{database, Database},
    read, write, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Booking`].
#[derive(Clone, Debug)]
pub struct CreateBooking {
    /// ID of the [`User`] making the [`Booking`].
    pub by: user::Id,

    /// [`Data`] of the new [`Booking`].
    pub data: Data,
}

/// [`Booking`] data submitted by a client.
#[derive(Clone, Debug)]
pub struct Data {
    /// Booked [`Date`].
    pub date: Date,

    /// ID of the booked [`Candidate`].
    pub candidate: candidate::Id,

    /// ID of the [`Company`] the [`Candidate`] is booked at.
    pub company: company::Id,

    /// [`ShortCode`] of the [`CandRole`] to work in.
    pub role: ShortCode,

    /// [`Notes`] about the [`Booking`].
    pub notes: Option<Notes>,
}

impl Data {
    /// Builds a [`write::booking::Draft`] out of this [`Data`] submitted by
    /// the provided [`User`].
    #[must_use]
    pub fn into_draft(self, by: user::Id) -> write::booking::Draft {
        let Self {
            date,
            candidate,
            company,
            role,
            notes,
        } = self;
        write::booking::Draft {
            date,
            candidate: Connect(candidate),
            company: Connect(company),
            role: Connect(role),
            notes,
            created_by: Connect(by),
            updated_by: Connect(by),
        }
    }
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<
                By<read::booking::list::Page, read::booking::list::Selector>,
            >,
            Ok = read::booking::list::Page,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Candidate>, candidate::Id>>,
            Ok = Option<Candidate>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Code<CandRole>>, ShortCode>>,
            Ok = Option<Code<CandRole>>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Candidate, candidate::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<write::booking::Draft>,
            Ok = Booking,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking { by, data } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize bookings of the same `Candidate`.
        tx.execute(Lock(By::new(data.candidate)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if tx
            .execute(Select(By::<Option<Candidate>, _>::new(data.candidate)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_none()
        {
            return Err(tracerr::new!(E::CandidateNotExists(data.candidate)));
        }
        if tx
            .execute(Select(By::<Option<Company>, _>::new(data.company)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_none()
        {
            return Err(tracerr::new!(E::CompanyNotExists(data.company)));
        }
        if tx
            .execute(Select(By::<Option<Code<CandRole>>, _>::new(
                data.role.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_none()
        {
            return Err(tracerr::new!(E::RoleNotExists(data.role)));
        }

        let same_day = tx
            .execute(Select(By::new(read::booking::list::same_day(
                data.candidate,
                data.date,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !same_day.is_empty() {
            return Err(tracerr::new!(E::DayAlreadyBooked(data.date)));
        }

        let booking = tx
            .execute(Insert(data.into_draft(by)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(booking)
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Candidate`] to book doesn't exist.
    #[display("`Candidate(id: {_0})` does not exist")]
    #[from(ignore)]
    CandidateNotExists(#[error(not(source))] candidate::Id),

    /// [`Company`] to book at doesn't exist.
    #[display("`Company(id: {_0})` does not exist")]
    #[from(ignore)]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`CandRole`] to book for doesn't exist.
    #[display("`CandRole(short_code: {_0})` does not exist")]
    #[from(ignore)]
    RoleNotExists(#[error(not(source))] ShortCode),

    /// [`Candidate`] is already booked for the [`Date`].
    #[display("`Candidate` is already booked on {_0}")]
    #[from(ignore)]
    DayAlreadyBooked(#[error(not(source))] Date),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{candidate, code::CandRole, company},
        mock,
    };

    use super::{CreateBooking, ExecutionError};

    #[tokio::test]
    async fn refuses_second_booking_on_same_day() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        drop(db.add_code::<CandRole>("DEV"));

        let first = svc
            .execute(CreateBooking {
                by: u1.id,
                data: mock::booking_data(jo.id, acme.id, "2024-05-01"),
            })
            .await
            .unwrap();
        assert_eq!(first.candidate, jo.id);
        assert_eq!(first.created_by, Some(u1.id));

        let err = svc
            .execute(CreateBooking {
                by: u1.id,
                data: mock::booking_data(jo.id, acme.id, "2024-05-01"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::DayAlreadyBooked(_)));
        assert_eq!(db.bookings().len(), 1);

        drop(
            svc.execute(CreateBooking {
                by: u1.id,
                data: mock::booking_data(jo.id, acme.id, "2024-05-02"),
            })
            .await
            .unwrap(),
        );
        assert_eq!(db.bookings().len(), 2);
    }

    #[tokio::test]
    async fn allows_other_candidates_on_same_day() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let max = db.add_candidate("Max");
        let acme = db.add_company("Acme");
        drop(db.add_code::<CandRole>("DEV"));

        for candidate in [jo.id, max.id] {
            drop(
                svc.execute(CreateBooking {
                    by: u1.id,
                    data: mock::booking_data(candidate, acme.id, "2024-05-01"),
                })
                .await
                .unwrap(),
            );
        }

        assert_eq!(db.bookings().len(), 2);
    }

    #[tokio::test]
    async fn fails_on_missing_references() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");

        let err = svc
            .execute(CreateBooking {
                by: u1.id,
                data: mock::booking_data(
                    candidate::Id::new(),
                    acme.id,
                    "2024-05-01",
                ),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CandidateNotExists(_)));

        let err = svc
            .execute(CreateBooking {
                by: u1.id,
                data: mock::booking_data(
                    jo.id,
                    company::Id::new(),
                    "2024-05-01",
                ),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CompanyNotExists(_)));

        let err = svc
            .execute(CreateBooking {
                by: u1.id,
                data: mock::booking_data(jo.id, acme.id, "2024-05-01"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::RoleNotExists(_)));

        assert!(db.bookings().is_empty());
        assert!(db.writes().is_empty());
    }
}
