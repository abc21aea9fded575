//! [`Command`] for updating a [`Candidate`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Connect, Reference,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::code::{CandRole, CandStatus};
use crate::{
    domain::{
        candidate,
        code::ShortCode,
        contact::{Email, Phone},
        user, Candidate, Notes,
    },
    infra::{database, Database},
    write, Service,
};

use super::Command;

/// [`Command`] for changing the data of an existing [`Candidate`].
#[derive(Clone, Debug)]
pub struct UpdateCandidate {
    /// ID of the [`User`] updating the [`Candidate`].
    ///
    /// [`User`]: crate::domain::User
    pub by: user::Id,

    /// ID of the [`Candidate`] to update.
    pub id: candidate::Id,

    /// Changed [`Data`] of the [`Candidate`].
    pub data: Data,
}

/// [`Candidate`] data changes submitted by a client.
///
/// A [`None`] field is left untouched, while a `Some(None)` one is reset.
#[derive(Clone, Debug, Default)]
pub struct Data {
    /// New [`candidate::Forename`] of the [`Candidate`].
    pub forename: Option<candidate::Forename>,

    /// New [`candidate::Surname`] of the [`Candidate`].
    pub surname: Option<Option<candidate::Surname>>,

    /// New [`Email`] of the [`Candidate`].
    pub email: Option<Option<Email>>,

    /// New [`Phone`] of the [`Candidate`].
    pub phone: Option<Option<Phone>>,

    /// New [`Notes`] about the [`Candidate`].
    pub notes: Option<Option<Notes>>,

    /// Consultant of the [`Candidate`].
    ///
    /// Always applied: a [`Reference::Unspecified`] one unassigns the current
    /// consultant.
    pub consultant: Reference<user::Id>,

    /// New [`ShortCode`] of the [`CandStatus`].
    pub status: Option<ShortCode>,

    /// New [`ShortCode`] of the [`CandRole`].
    pub role: Option<ShortCode>,
}

impl Data {
    /// Builds a [`write::candidate::Changes`] out of this [`Data`] submitted
    /// by the provided [`User`].
    ///
    /// [`User`]: crate::domain::User
    #[must_use]
    pub fn into_changes(
        self,
        id: candidate::Id,
        by: user::Id,
    ) -> write::candidate::Changes {
        let Self {
            forename,
            surname,
            email,
            phone,
            notes,
            consultant,
            status,
            role,
        } = self;
        write::candidate::Changes {
            id,
            forename,
            surname,
            email,
            phone,
            notes,
            consultant: consultant.on_update(),
            status: status.map(Connect),
            role: role.map(Connect),
            updated_by: Connect(by),
        }
    }
}

impl<Db> Command<UpdateCandidate> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Candidate>, candidate::Id>>,
            Ok = Option<Candidate>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Candidate, candidate::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Update<write::candidate::Changes>,
            Ok = Candidate,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Candidate;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateCandidate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCandidate { by, id, data } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if tx
            .execute(Select(By::<Option<Candidate>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_none()
        {
            return Err(tracerr::new!(E::CandidateNotExists(id)));
        }

        let candidate = tx
            .execute(Update(data.into_changes(id, by)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(candidate)
    }
}

/// Error of [`UpdateCandidate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
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
    use common::{Reference, Relation};

    use crate::{
        command::Command as _,
        domain::{candidate, code::ShortCode, contact::Email},
        mock,
    };

    use super::{Data, ExecutionError, UpdateCandidate};

    #[tokio::test]
    async fn keeps_untouched_fields() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate_with(|c| {
            c.surname = Some(candidate::Surname::new("Smith").unwrap());
            c.email = Some(Email::new("jo@example.com").unwrap());
        });

        let updated = svc
            .execute(UpdateCandidate {
                by: ann.id,
                id: jo.id,
                data: Data {
                    forename: Some(candidate::Forename::new("Joe").unwrap()),
                    ..Data::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(AsRef::<str>::as_ref(&updated.forename), "Joe");
        assert_eq!(
            updated.surname.as_ref().map(AsRef::<str>::as_ref),
            Some("Smith"),
        );
        assert_eq!(
            updated.email.as_ref().map(AsRef::<str>::as_ref),
            Some("jo@example.com"),
        );
        assert_eq!(AsRef::<str>::as_ref(&updated.status), "ACT");
        assert_eq!(AsRef::<str>::as_ref(&updated.role), "DEV");
        assert_eq!(updated.updated_by, Some(ann.id));
        assert_eq!(db.candidates()[0].surname, updated.surname);
    }

    #[tokio::test]
    async fn resets_explicitly_cleared_fields() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);
        let jo = db.add_candidate_with(|c| {
            c.surname = Some(candidate::Surname::new("Smith").unwrap());
        });

        let updated = svc
            .execute(UpdateCandidate {
                by: ann.id,
                id: jo.id,
                data: Data {
                    surname: Some(None),
                    role: Some(ShortCode::new("QA").unwrap()),
                    ..Data::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.surname, None);
        assert_eq!(AsRef::<str>::as_ref(&updated.role), "QA");
        assert_eq!(AsRef::<str>::as_ref(&updated.forename), "Jo");
    }

    #[tokio::test]
    async fn disconnects_unspecified_consultant() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);
        let bob = db.add_user("bob@example.com", false, false);
        let jo = db.add_candidate_with(|c| c.consultant = Some(bob.id));

        let updated = svc
            .execute(UpdateCandidate {
                by: ann.id,
                id: jo.id,
                data: Data::default(),
            })
            .await
            .unwrap();

        let changes = db.last_candidate_changes().unwrap();
        assert_eq!(changes.consultant, Relation::Disconnect);
        assert_eq!(updated.consultant, None);

        let updated = svc
            .execute(UpdateCandidate {
                by: ann.id,
                id: jo.id,
                data: Data {
                    consultant: Reference::To(bob.id),
                    ..Data::default()
                },
            })
            .await
            .unwrap();

        let changes = db.last_candidate_changes().unwrap();
        assert_eq!(changes.consultant, Relation::Connect(bob.id));
        assert_eq!(updated.consultant, Some(bob.id));
    }

    #[tokio::test]
    async fn fails_on_missing_candidate() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);

        let err = svc
            .execute(UpdateCandidate {
                by: ann.id,
                id: candidate::Id::new(),
                data: Data::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::CandidateNotExists(_)));
        assert!(db.writes().is_empty());
    }
}
