//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{
            self,
            postgres::{list::List, Connection, Contains},
            Postgres,
        },
        Database,
    },
    read::user::list::{Field, Filter, Page, Selector},
};

/// Columns of the `users` table a [`User`] is read from.
const COLUMNS: &str = "\
    id, name, email, password_hash, \
    del_permission, office_manager, created_at";

/// Reads a [`User`] from the provided [`Row`] selected with [`COLUMNS`].
fn from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        del_permission: row.get("del_permission"),
        office_manager: row.get("office_manager"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<User>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1::UUID");
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<'e, C> Database<Select<By<Option<User>, &'e user::Email>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'e user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        let sql =
            format!("SELECT {COLUMNS} FROM users WHERE email = $1::VARCHAR");
        Ok(self
            .query_opt(&sql, &[email])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Page, Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Selector {
            arguments,
            filter: Filter { id, name },
            ordering,
        } = by.into_inner();

        let name = name.as_deref().map(Contains::new);

        let mut list = List::new();
        if let Some(id) = &id {
            let idx = list.bind(id);
            list.filter(format!("id = ${idx}::UUID"));
        }
        if let Some(name) = &name {
            let idx = list.bind(name);
            list.filter(format!("name LIKE ${idx}::VARCHAR"));
        }
        let sort = match ordering.field {
            Field::Name => "name",
            Field::Email => "email",
            Field::CreatedAt => "created_at",
        };
        let (sql, params) =
            list.build(COLUMNS, "users", sort, ordering.order, &arguments);

        Ok(self
            .query(&sql, &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<User>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            name,
            email,
            password_hash,
            del_permission,
            office_manager,
            created_at,
        } = user;

        const SQL: &str = "\
            INSERT INTO users (\
                id, name, email, password_hash, \
                del_permission, office_manager, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::BOOL, $6::BOOL, $7::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &email,
                &password_hash,
                &del_permission,
                &office_manager,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<User>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            name,
            email,
            password_hash,
            del_permission,
            office_manager,
            created_at: _,
        } = user;

        const SQL: &str = "\
            UPDATE users \
            SET name = $2::VARCHAR, \
                email = $3::VARCHAR, \
                password_hash = $4::VARCHAR, \
                del_permission = $5::BOOL, \
                office_manager = $6::BOOL \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &email,
                &password_hash,
                &del_permission,
                &office_manager,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<User, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM users WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<User, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: user::Id = by.into_inner();

        const SQL: &str = "SELECT id FROM users WHERE id = $1::UUID FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
