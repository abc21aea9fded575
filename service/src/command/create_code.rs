//! [`Command`] for creating a new lookup [`Code`].

use std::marker::PhantomData;

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    command::{authorize_user, AuthorizeUser},
    domain::{
        code::{self, Description, ShortCode},
        user::{self, Permission},
        Code, User,
    },
    infra::{database, Database},
    write, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Code`] of the `K`ind.
///
/// Only office managers may create [`Code`]s.
#[derive(Clone, Debug)]
pub struct CreateCode<K> {
    /// ID of the [`User`] creating the [`Code`].
    pub by: user::Id,

    /// [`ShortCode`] of the new [`Code`].
    pub short_code: ShortCode,

    /// [`Description`] of the new [`Code`].
    pub description: Description,

    /// Kind of the new [`Code`].
    pub kind: PhantomData<K>,
}

impl<K> CreateCode<K> {
    /// Creates a new [`CreateCode`] [`Command`].
    #[must_use]
    pub fn new(
        by: user::Id,
        short_code: ShortCode,
        description: Description,
    ) -> Self {
        Self {
            by,
            short_code,
            description,
            kind: PhantomData,
        }
    }
}

impl<Db, K> Command<CreateCode<K>> for Service<Db>
where
    K: code::Kind,
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<write::code::Draft<K>>,
            Ok = Code<K>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Code<K>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCode<K>) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCode {
            by,
            short_code,
            description,
            kind,
        } = cmd;

        drop(
            self.execute(AuthorizeUser::new(by, &[Permission::OfficeManager]))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        self.database()
            .execute(Insert(write::code::Draft {
                short_code,
                description,
                kind,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateCode`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`User`] is not allowed to manage [`Code`]s.
    #[display("Not allowed to create `Code`: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::code::{CandStatus, Description, ShortCode},
        mock,
    };

    use super::{CreateCode, ExecutionError};

    fn cmd(by: crate::domain::user::Id) -> CreateCode<CandStatus> {
        CreateCode::new(
            by,
            ShortCode::new("ACT").unwrap(),
            Description::new("Actively looking").unwrap(),
        )
    }

    #[tokio::test]
    async fn requires_office_manager() {
        let (svc, db) = mock::service();
        let clerk = db.add_user("clerk@example.com", true, false);
        let boss = db.add_user("boss@example.com", false, true);

        let err = svc.execute(cmd(clerk.id)).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Authorization(_)));
        assert!(db.writes().is_empty());

        let code = svc.execute(cmd(boss.id)).await.unwrap();
        assert_eq!(AsRef::<str>::as_ref(&code.short_code), "ACT");
        assert_eq!(db.writes().len(), 1);
    }
}
