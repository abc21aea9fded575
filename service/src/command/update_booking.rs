//! [`Command`] for updating a [`Booking`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Connect, Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        booking, candidate,
        code::{CandRole, ShortCode},
        company, user, Booking, Candidate, Code, Company, Notes,
    },
    infra::{database, Database},
    read, write, Service,
};

use super::Command;

/// [`Command`] for changing the data of an existing [`Booking`].
#[derive(Clone, Debug)]
pub struct UpdateBooking {
    /// ID of the [`User`] updating the [`Booking`].
    pub by: user::Id,

    /// ID of the [`Booking`] to update.
    pub id: booking::Id,

    /// Changed [`Data`] of the [`Booking`].
    pub data: Data,
}

/// [`Booking`] data changes submitted by a client.
///
/// A [`None`] field is left untouched, while a `Some(None)` one is reset.
#[derive(Clone, Debug, Default)]
pub struct Data {
    /// New booked [`Date`].
    pub date: Option<Date>,

    /// ID of the newly booked [`Candidate`].
    pub candidate: Option<candidate::Id>,

    /// ID of the [`Company`] the [`Candidate`] is booked at now.
    pub company: Option<company::Id>,

    /// New [`ShortCode`] of the [`CandRole`] to work in.
    pub role: Option<ShortCode>,

    /// New [`Notes`] about the [`Booking`].
    pub notes: Option<Option<Notes>>,
}

impl Data {
    /// Builds a [`write::booking::Changes`] out of this [`Data`] submitted by
    /// the provided [`User`].
    #[must_use]
    pub fn into_changes(
        self,
        id: booking::Id,
        by: user::Id,
    ) -> write::booking::Changes {
        let Self {
            date,
            candidate,
            company,
            role,
            notes,
        } = self;
        write::booking::Changes {
            id,
            date,
            candidate: candidate.map(Connect),
            company: company.map(Connect),
            role: role.map(Connect),
            notes,
            updated_by: Connect(by),
        }
    }
}

impl<Db> Command<UpdateBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
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
            Lock<By<Booking, booking::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Candidate, candidate::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Update<write::booking::Changes>,
            Ok = Booking,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBooking { by, id, data } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Booking, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let current = tx
            .execute(Select(By::<Option<Booking>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(id))
            .map_err(tracerr::wrap!())?;

        let candidate = data.candidate.unwrap_or(current.candidate);
        let date = data.date.unwrap_or(current.date);

        // Serialize bookings of the same `Candidate`.
        tx.execute(Lock(By::<Candidate, _>::new(candidate)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if data.candidate.is_some()
            && tx
                .execute(Select(By::<Option<Candidate>, _>::new(candidate)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .is_none()
        {
            return Err(tracerr::new!(E::CandidateNotExists(candidate)));
        }
        if let Some(company) = data.company {
            if tx
                .execute(Select(By::<Option<Company>, _>::new(company)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .is_none()
            {
                return Err(tracerr::new!(E::CompanyNotExists(company)));
            }
        }
        if let Some(role) = &data.role {
            if tx
                .execute(Select(By::<Option<Code<CandRole>>, _>::new(
                    role.clone(),
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .is_none()
            {
                return Err(tracerr::new!(E::RoleNotExists(role.clone())));
            }
        }

        let same_day = tx
            .execute(Select(By::new(read::booking::list::same_day(
                candidate, date,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if same_day.iter().any(|b| b.id != id) {
            return Err(tracerr::new!(E::DayAlreadyBooked(date)));
        }

        let booking = tx
            .execute(Update(data.into_changes(id, by)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(booking)
    }
}

/// Error of [`UpdateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),

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

    /// Candidate is already booked for the [`Date`] by another [`Booking`].
    #[display("`Candidate` is already booked on {_0}")]
    #[from(ignore)]
    DayAlreadyBooked(#[error(not(source))] Date),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        command::Command as _,
        domain::{booking, candidate, Notes},
        mock,
    };

    use super::{Data, ExecutionError, UpdateBooking};

    fn on(date: &str) -> Data {
        Data {
            date: Some(Date::parse(date).unwrap()),
            ..Data::default()
        }
    }

    #[tokio::test]
    async fn keeps_own_day() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let u2 = db.add_user("bob@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        let b1 = db.add_booking(jo.id, acme.id, "2024-05-01");

        let updated = svc
            .execute(UpdateBooking {
                by: u2.id,
                id: b1.id,
                data: on("2024-05-01"),
            })
            .await
            .unwrap();

        assert_eq!(updated.id, b1.id);
        assert_eq!(updated.updated_by, Some(u2.id));
        assert_ne!(updated.updated_by, Some(u1.id));
    }

    #[tokio::test]
    async fn keeps_untouched_fields() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        let b1 = db.add_booking(jo.id, acme.id, "2024-05-01");
        drop(
            svc.execute(UpdateBooking {
                by: u1.id,
                id: b1.id,
                data: Data {
                    notes: Some(Notes::new("Bring laptop")),
                    ..Data::default()
                },
            })
            .await
            .unwrap(),
        );

        let updated = svc
            .execute(UpdateBooking {
                by: u1.id,
                id: b1.id,
                data: on("2024-05-03"),
            })
            .await
            .unwrap();

        assert_eq!(updated.date.to_string(), "2024-05-03");
        assert_eq!(updated.candidate, jo.id);
        assert_eq!(updated.company, acme.id);
        assert_eq!(AsRef::<str>::as_ref(&updated.role), "DEV");
        assert_eq!(
            updated.notes.as_ref().map(AsRef::<str>::as_ref),
            Some("Bring laptop"),
        );

        let cleared = svc
            .execute(UpdateBooking {
                by: u1.id,
                id: b1.id,
                data: Data {
                    notes: Some(None),
                    ..Data::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(cleared.notes, None);
        assert_eq!(cleared.date.to_string(), "2024-05-03");
    }

    #[tokio::test]
    async fn refuses_moving_onto_booked_day() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        drop(db.add_booking(jo.id, acme.id, "2024-05-01"));
        let b2 = db.add_booking(jo.id, acme.id, "2024-05-02");

        let err = svc
            .execute(UpdateBooking {
                by: u1.id,
                id: b2.id,
                data: on("2024-05-01"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::DayAlreadyBooked(_)));
        assert!(db.writes().is_empty());
    }

    #[tokio::test]
    async fn refuses_moving_onto_other_candidates_booked_day() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let max = db.add_candidate("Max");
        let acme = db.add_company("Acme");
        drop(db.add_booking(max.id, acme.id, "2024-05-01"));
        let b2 = db.add_booking(jo.id, acme.id, "2024-05-01");

        let err = svc
            .execute(UpdateBooking {
                by: u1.id,
                id: b2.id,
                data: Data {
                    candidate: Some(max.id),
                    ..Data::default()
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::DayAlreadyBooked(_)));
        assert!(db.writes().is_empty());
    }

    #[tokio::test]
    async fn fails_on_missing_references() {
        let (svc, db) = mock::service();
        let u1 = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate("Jo");
        let acme = db.add_company("Acme");
        let b1 = db.add_booking(jo.id, acme.id, "2024-05-01");

        let err = svc
            .execute(UpdateBooking {
                by: u1.id,
                id: booking::Id::new(),
                data: on("2024-05-01"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::BookingNotExists(_)));

        let err = svc
            .execute(UpdateBooking {
                by: u1.id,
                id: b1.id,
                data: Data {
                    candidate: Some(candidate::Id::new()),
                    ..Data::default()
                },
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CandidateNotExists(_)));

        assert!(db.writes().is_empty());
    }
}
