//! [`Command`] for creating a new [`Company`].

use common::{operations::Insert, Connect, Reference};
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

/// [`Command`] for creating a new [`Company`].
#[derive(Clone, Debug)]
pub struct CreateCompany {
    /// ID of the [`User`] creating the [`Company`].
    pub by: user::Id,

    /// [`Data`] of the new [`Company`].
    pub data: Data,
}

/// [`Company`] data submitted by a client.
#[derive(Clone, Debug)]
pub struct Data {
    /// [`company::Name`] of the [`Company`].
    pub name: company::Name,

    /// [`Email`] of the [`Company`].
    pub email: Option<Email>,

    /// [`Phone`] of the [`Company`].
    pub phone: Option<Phone>,

    /// [`company::Website`] of the [`Company`].
    pub website: Option<company::Website>,

    /// [`Notes`] about the [`Company`].
    pub notes: Option<Notes>,

    /// Consultant of the [`Company`].
    pub consultant: Reference<user::Id>,

    /// [`ShortCode`] of the [`CompStatus`].
    pub status: ShortCode,

    /// [`ShortCode`] of the [`BusType`].
    pub business_type: ShortCode,
}

impl Data {
    /// Builds a [`write::company::Draft`] out of this [`Data`] submitted by
    /// the provided [`User`].
    #[must_use]
    pub fn into_draft(self, by: user::Id) -> write::company::Draft {
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
        write::company::Draft {
            name,
            email,
            phone,
            website,
            notes,
            consultant: consultant.on_create(),
            status: Connect(status),
            business_type: Connect(business_type),
            created_by: Connect(by),
            updated_by: Connect(by),
        }
    }
}

impl<Db> Command<CreateCompany> for Service<Db>
where
    Db: Database<
        Insert<write::company::Draft>,
        Ok = Company,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Company;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCompany) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCompany { by, data } = cmd;

        self.database()
            .execute(Insert(data.into_draft(by)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateCompany`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::{Reference, Relation};

    use crate::{
        command::Command as _,
        domain::{code::ShortCode, company, user},
        mock,
    };

    use super::{CreateCompany, Data};

    fn data(name: &str) -> Data {
        Data {
            name: company::Name::new(name).unwrap(),
            email: None,
            phone: None,
            website: None,
            notes: None,
            consultant: Reference::Unspecified,
            status: ShortCode::new("CLIENT").unwrap(),
            business_type: ShortCode::new("IT").unwrap(),
        }
    }

    #[test]
    fn omits_unspecified_consultant_on_create() {
        let u1 = user::Id::new();

        let draft = data("Acme").into_draft(u1);
        assert_eq!(draft.consultant, None);

        let consultant = user::Id::new();
        let draft = Data {
            consultant: Reference::To(consultant),
            ..data("Acme")
        }
        .into_draft(u1);
        assert_eq!(draft.consultant, Some(Relation::Connect(consultant)));
    }

    #[tokio::test]
    async fn connects_codes_and_stamps_author() {
        let (svc, db) = mock::service();
        let ann = db.add_user("ann@example.com", false, false);

        let created = svc
            .execute(CreateCompany {
                by: ann.id,
                data: data("Acme"),
            })
            .await
            .unwrap();

        assert_eq!(AsRef::<str>::as_ref(&created.name), "Acme");
        assert_eq!(AsRef::<str>::as_ref(&created.status), "CLIENT");
        assert_eq!(AsRef::<str>::as_ref(&created.business_type), "IT");
        assert_eq!(created.consultant, None);
        assert_eq!(created.created_by, Some(ann.id));
        assert_eq!(created.updated_by, Some(ann.id));
        assert_eq!(db.companies().len(), 1);
        assert_eq!(db.writes(), ["insert company"]);
    }
}
