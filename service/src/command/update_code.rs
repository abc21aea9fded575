//! [`Command`] for updating a lookup [`Code`].

use std::marker::PhantomData;

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
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

/// [`Command`] for updating a [`Code`] of the `K`ind.
///
/// Only office managers may update [`Code`]s.
#[derive(Clone, Debug)]
pub struct UpdateCode<K> {
    /// ID of the [`User`] updating the [`Code`].
    pub by: user::Id,

    /// ID of the [`Code`] to update.
    pub id: code::Id,

    /// New [`ShortCode`] of the [`Code`].
    pub short_code: ShortCode,

    /// New [`Description`] of the [`Code`].
    pub description: Description,

    /// Kind of the [`Code`].
    pub kind: PhantomData<K>,
}

impl<K> UpdateCode<K> {
    /// Creates a new [`UpdateCode`] [`Command`].
    #[must_use]
    pub fn new(
        by: user::Id,
        id: code::Id,
        short_code: ShortCode,
        description: Description,
    ) -> Self {
        Self {
            by,
            id,
            short_code,
            description,
            kind: PhantomData,
        }
    }
}

impl<Db, K> Command<UpdateCode<K>> for Service<Db>
where
    K: code::Kind,
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Code<K>>, code::Id>>,
            Ok = Option<Code<K>>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Code<K>, code::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Update<write::code::Changes<K>>,
            Ok = Code<K>,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Code<K>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateCode<K>) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCode {
            by,
            id,
            short_code,
            description,
            kind,
        } = cmd;

        drop(
            self.execute(AuthorizeUser::new(by, &[Permission::OfficeManager]))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
        );

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Code<K>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if tx
            .execute(Select(By::<Option<Code<K>>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .is_none()
        {
            return Err(tracerr::new!(E::CodeNotExists(id)));
        }

        let code = tx
            .execute(Update(write::code::Changes {
                id,
                short_code,
                description,
                kind,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(code)
    }
}

/// Error of [`UpdateCode`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`User`] is not allowed to manage [`Code`]s.
    #[display("Not allowed to update `Code`: {_0}")]
    Authorization(authorize_user::ExecutionError),

    /// [`Code`] doesn't exist.
    #[display("`Code(id: {_0})` does not exist")]
    #[from(ignore)]
    CodeNotExists(#[error(not(source))] code::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{
            code::{self, CandStatus, CompStatus, Description, ShortCode},
            user::{self, Permission},
        },
        mock,
    };

    use super::{ExecutionError, UpdateCode};

    fn update<K>(by: user::Id, id: code::Id) -> UpdateCode<K> {
        UpdateCode::new(
            by,
            id,
            ShortCode::new("HOLD").unwrap(),
            Description::new("On hold").unwrap(),
        )
    }

    #[tokio::test]
    async fn updates_as_office_manager_only() {
        let (svc, db) = mock::service();
        let clerk = db.add_user("clerk@example.com", true, false);
        let boss = db.add_user("boss@example.com", false, true);
        let code = db.add_code::<CandStatus>("ACT");

        let err = svc
            .execute(update::<CandStatus>(clerk.id, code.id))
            .await
            .unwrap_err();
        match err.as_ref() {
            ExecutionError::Authorization(e) => assert_eq!(
                e.denied_permission(),
                Some(Permission::OfficeManager),
            ),
            e => panic!("unexpected error: {e}"),
        }
        assert!(db.writes().is_empty());

        let updated = svc
            .execute(update::<CandStatus>(boss.id, code.id))
            .await
            .unwrap();
        assert_eq!(updated.id, code.id);
        assert_eq!(AsRef::<str>::as_ref(&updated.short_code), "HOLD");
        assert_eq!(AsRef::<str>::as_ref(&updated.description), "On hold");
        assert_eq!(db.writes(), ["update code"]);
    }

    #[tokio::test]
    async fn fails_on_code_of_other_kind() {
        let (svc, db) = mock::service();
        let boss = db.add_user("boss@example.com", false, true);
        let code = db.add_code::<CandStatus>("ACT");

        let err = svc
            .execute(update::<CompStatus>(boss.id, code.id))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::CodeNotExists(_)));
        assert!(db.writes().is_empty());
    }
}
