//! [`Command`] for creating a new [`Candidate`].

use common::{operations::Insert, Connect, Reference};
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

/// [`Command`] for creating a new [`Candidate`].
#[derive(Clone, Debug)]
pub struct CreateCandidate {
    /// ID of the [`User`] creating the [`Candidate`].
    ///
    /// [`User`]: crate::domain::User
    pub by: user::Id,

    /// [`Data`] of the new [`Candidate`].
    pub data: Data,
}

/// [`Candidate`] data submitted by a client.
#[derive(Clone, Debug)]
pub struct Data {
    /// [`candidate::Forename`] of the [`Candidate`].
    pub forename: candidate::Forename,

    /// [`candidate::Surname`] of the [`Candidate`].
    pub surname: Option<candidate::Surname>,

    /// [`Email`] of the [`Candidate`].
    pub email: Option<Email>,

    /// [`Phone`] of the [`Candidate`].
    pub phone: Option<Phone>,

    /// [`Notes`] about the [`Candidate`].
    pub notes: Option<Notes>,

    /// Consultant of the [`Candidate`].
    pub consultant: Reference<user::Id>,

    /// [`ShortCode`] of the [`CandStatus`].
    pub status: ShortCode,

    /// [`ShortCode`] of the [`CandRole`].
    pub role: ShortCode,
}

impl Data {
    /// Builds a [`write::candidate::Draft`] out of this [`Data`] submitted by
    /// the provided [`User`].
    ///
    /// [`User`]: crate::domain::User
    #[must_use]
    pub fn into_draft(self, by: user::Id) -> write::candidate::Draft {
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
        write::candidate::Draft {
            forename,
            surname,
            email,
            phone,
            notes,
            consultant: consultant.on_create(),
            status: Connect(status),
            role: Connect(role),
            created_by: Connect(by),
            updated_by: Connect(by),
        }
    }
}

impl<Db> Command<CreateCandidate> for Service<Db>
where
    Db: Database<
        Insert<write::candidate::Draft>,
        Ok = Candidate,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Candidate;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateCandidate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCandidate { by, data } = cmd;

        self.database()
            .execute(Insert(data.into_draft(by)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateCandidate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::{Connect, Reference, Relation};

    use crate::{
        command::Command as _,
        domain::{candidate, code::ShortCode, user},
        mock,
    };

    use super::{CreateCandidate, Data};

    fn data(forename: &str) -> Data {
        Data {
            forename: candidate::Forename::new(forename).unwrap(),
            surname: None,
            email: None,
            phone: None,
            notes: None,
            consultant: Reference::Unspecified,
            status: ShortCode::new("ACT").unwrap(),
            role: ShortCode::new("DEV").unwrap(),
        }
    }

    #[tokio::test]
    async fn connects_codes_and_stamps_author() {
        let (svc, db) = mock::service();
        let u1 = user::Id::new();

        let created = svc
            .execute(CreateCandidate {
                by: u1,
                data: data("Jo"),
            })
            .await
            .unwrap();

        let draft = db.last_candidate_draft().unwrap();
        assert_eq!(draft.status, Connect(ShortCode::new("ACT").unwrap()));
        assert_eq!(draft.role, Connect(ShortCode::new("DEV").unwrap()));
        assert_eq!(draft.consultant, None);
        assert_eq!(draft.created_by, Connect(u1));
        assert_eq!(draft.updated_by, Connect(u1));

        assert_eq!(AsRef::<str>::as_ref(&created.forename), "Jo");
        assert_eq!(created.consultant, None);
        assert_eq!(created.created_by, Some(u1));
        assert_eq!(created.updated_by, Some(u1));
    }

    #[tokio::test]
    async fn connects_consultant_when_specified() {
        let (svc, db) = mock::service();
        let u1 = user::Id::new();
        let consultant = user::Id::new();

        let created = svc
            .execute(CreateCandidate {
                by: u1,
                data: Data {
                    consultant: Reference::To(consultant),
                    ..data("Jo")
                },
            })
            .await
            .unwrap();

        let draft = db.last_candidate_draft().unwrap();
        assert_eq!(draft.consultant, Some(Relation::Connect(consultant)));
        assert_eq!(created.consultant, Some(consultant));
    }
}
