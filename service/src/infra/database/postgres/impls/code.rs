//! Lookup [`Code`]-related [`Database`] implementations.
//!
//! Every [`Kind`] of [`Code`]s lives in its own [`Table`] of identical shape.

use std::marker::PhantomData;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        code::{self, BusType, CandRole, CandStatus, CompStatus, Kind, ShortCode},
        Code,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    write,
};

/// [`Kind`] of [`Code`]s stored in a dedicated table.
pub trait Table: Kind {
    /// Name of the table storing [`Code`]s of this [`Kind`].
    const TABLE: &'static str;
}

impl Table for CandStatus {
    const TABLE: &'static str = "cand_statuses";
}

impl Table for CandRole {
    const TABLE: &'static str = "cand_roles";
}

impl Table for CompStatus {
    const TABLE: &'static str = "comp_statuses";
}

impl Table for BusType {
    const TABLE: &'static str = "bus_types";
}

/// Reads a [`Code`] from the provided [`Row`].
fn from_row<K: Kind>(row: &Row) -> Code<K> {
    Code {
        id: row.get("id"),
        short_code: row.get("short_code"),
        description: row.get("description"),
        kind: PhantomData,
    }
}

impl<C, K> Database<Select<By<Option<Code<K>>, code::Id>>> for Postgres<C>
where
    C: Connection,
    K: Table,
{
    type Ok = Option<Code<K>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Code<K>>, code::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT id, short_code, description \
             FROM {} \
             WHERE id = $1::UUID",
            K::TABLE,
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C, K> Database<Select<By<Option<Code<K>>, ShortCode>>> for Postgres<C>
where
    C: Connection,
    K: Table,
{
    type Ok = Option<Code<K>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Code<K>>, ShortCode>>,
    ) -> Result<Self::Ok, Self::Err> {
        let short_code = by.into_inner();

        let sql = format!(
            "SELECT id, short_code, description \
             FROM {} \
             WHERE short_code = $1::VARCHAR",
            K::TABLE,
        );
        Ok(self
            .query_opt(&sql, &[&short_code])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C, K> Database<Select<By<Vec<Code<K>>, ()>>> for Postgres<C>
where
    C: Connection,
    K: Table,
{
    type Ok = Vec<Code<K>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Code<K>>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT id, short_code, description \
             FROM {} \
             ORDER BY short_code ASC",
            K::TABLE,
        );
        Ok(self
            .query(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C, K> Database<Insert<write::code::Draft<K>>> for Postgres<C>
where
    C: Connection,
    K: Table,
{
    type Ok = Code<K>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<write::code::Draft<K>>,
    ) -> Result<Self::Ok, Self::Err> {
        let write::code::Draft {
            short_code,
            description,
            kind: _,
        } = draft;

        let sql = format!(
            "INSERT INTO {} (id, short_code, description) \
             VALUES (gen_random_uuid(), $1::VARCHAR, $2::VARCHAR) \
             RETURNING id, short_code, description",
            K::TABLE,
        );
        self.query_one(&sql, &[&short_code, &description])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| from_row(&row))
    }
}

impl<C, K> Database<Update<write::code::Changes<K>>> for Postgres<C>
where
    C: Connection,
    K: Table,
{
    type Ok = Code<K>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<write::code::Changes<K>>,
    ) -> Result<Self::Ok, Self::Err> {
        let write::code::Changes {
            id,
            short_code,
            description,
            kind: _,
        } = changes;

        let sql = format!(
            "UPDATE {} \
             SET short_code = $2::VARCHAR, \
                 description = $3::VARCHAR \
             WHERE id = $1::UUID \
             RETURNING id, short_code, description",
            K::TABLE,
        );
        self.query_one(&sql, &[&id, &short_code, &description])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| from_row(&row))
    }
}

impl<C, K> Database<Delete<By<Code<K>, code::Id>>> for Postgres<C>
where
    C: Connection,
    K: Table,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Code<K>, code::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("DELETE FROM {} WHERE id = $1::UUID", K::TABLE);
        self.exec(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C, K> Database<Lock<By<Code<K>, code::Id>>> for Postgres<C>
where
    C: Connection,
    K: Table,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Code<K>, code::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT id FROM {} WHERE id = $1::UUID FOR UPDATE",
            K::TABLE,
        );
        self.query(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
