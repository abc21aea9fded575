//! [`Command`] for updating a [`Company`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Connect, Reference,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    code::{BusType, CompStatus},
    User,
};
use crate::{
    domain::{
        code::ShortCode,
        company,
        contact::{Email, Phone},
        user, Company, Notes,
    },
    infra::{database, Database},
    write, Service,
};

use super::Command;

/// [`Command`] for changing the data of an existing [`Company`].
#[derive(Clone, Debug)]
pub struct UpdateCompany {
    /// ID of the [`User`] updating the [`Company`].
    pub by: user::Id,

    /// ID of the [`Company`] to update.
    pub id: company::Id,

    /// Changed [`Data`] of the [`Company`].
    pub data: Data,
}

/// [`Company`] data changes submitted by a client.
///
/// A [`None`] field is left untouched, while a `Some(None)` one is reset.
#[derive(Clone, Debug, Default)]
pub struct Data {
    /// New [`company::Name`] of the [`Company`].
    pub name: Option<company::Name>,

    /// New [`Email`] of the [`Company`].
    pub email: Option<Option<Email>>,

    /// New [`Phone`] of the [`Company`].
    pub phone: Option<Option<Phone>>,

    /// New [`company::Website`] of the [`Company`].
    pub website: Option<Option<company::Website>>,

    /// New [`Notes`] about the [`Company`].
    pub notes: Option<Option<Notes>>,

    /// Consultant of the [`Company`].
    ///
    /// Always applied: a [`Reference::Unspecified`] one unassigns the current
    /// consultant.
    pub consultant: Reference<user::Id>,

    /// New [`ShortCode`] of the [`CompStatus`].
    pub status: Option<ShortCode>,

    /// New [`ShortCode`] of the [`BusType`].
    pub business_type: Option<ShortCode>,
}

impl Data {
    /// Builds a [`write::company::Changes`] out of this [`Data`] submitted by
    /// the provided [`User`].
    #[must_use]
    pub fn into_changes(
        self,
        id: company::Id,
        by: user::Id,
    ) -> write::company::Changes {
        let Self {
            name,
            email,
            phone,
            website,
            notes,
            consultant,
            status,
            business_type,
        } = self;
        write::company::Changes {
            id,
            name,
            email,
            phone,
            website,
            notes,
            consultant: consultant.on_update(),
            status: status.map(Connect),
            business_type: business_type.map(Connect),
            updated_by: Connect(by),
        }
    }
}

impl<Db> Command<UpdateCompany> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Company, company::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Update<write::company::Changes>,
            Ok = Company,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Company;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateCompany) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCompany { by, id, data } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if tx
            .execute(Select(By::<Option<Company>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_none()
        {
            return Err(tracerr::new!(E::CompanyNotExists(id)));
        }

        let company = tx
            .execute(Update(data.into_changes(id, by)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(company)
    }
}

/// Error of [`UpdateCompany`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
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
    use common::{Reference, Relation};

    use crate::{
        command::Command as _,
        domain::{code::ShortCode, company},
        mock,
    };

    use super::{Data, ExecutionError, UpdateCompany};

    #[tokio::test]
    async fn keeps_untouched_fields() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);
        let acme = db.add_company_with(|c| {
            c.website = company::Website::new("https://acme.example");
        });

        let updated = svc
            .execute(UpdateCompany {
                by: ann.id,
                id: acme.id,
                data: Data {
                    status: Some(ShortCode::new("PROSPECT").unwrap()),
                    ..Data::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(AsRef::<str>::as_ref(&updated.status), "PROSPECT");
        assert_eq!(AsRef::<str>::as_ref(&updated.name), "Acme");
        assert_eq!(AsRef::<str>::as_ref(&updated.business_type), "IT");
        assert_eq!(
            updated.website.as_ref().map(AsRef::<str>::as_ref),
            Some("https://acme.example"),
        );
        assert_eq!(updated.updated_by, Some(ann.id));
        assert_eq!(db.companies()[0].website, updated.website);
    }

    #[tokio::test]
    async fn disconnects_unspecified_consultant() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);
        let acme = db.add_company_with(|c| c.consultant = Some(ann.id));

        let updated = svc
            .execute(UpdateCompany {
                by: ann.id,
                id: acme.id,
                data: Data {
                    website: Some(None),
                    ..Data::default()
                },
            })
            .await
            .unwrap();

        let changes = db.last_company_changes().unwrap();
        assert_eq!(changes.consultant, Relation::Disconnect);
        assert_eq!(updated.consultant, None);
        assert_eq!(updated.website, None);

        let updated = svc
            .execute(UpdateCompany {
                by: ann.id,
                id: acme.id,
                data: Data {
                    consultant: Reference::To(ann.id),
                    ..Data::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.consultant, Some(ann.id));
    }

    #[tokio::test]
    async fn fails_on_missing_company() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);

        let err = svc
            .execute(UpdateCompany {
                by: ann.id,
                id: company::Id::new(),
                data: Data::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::CompanyNotExists(_)));
        assert!(db.writes().is_empty());
    }
}
