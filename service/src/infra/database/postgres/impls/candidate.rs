//! [`Candidate`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Lock, Select, Update},
    Connect, Relation,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{candidate, Candidate},
    infra::{
        database::{
            self,
            postgres::{
                assignments::Assignments, list::List, Connection, Contains,
            },
            Postgres,
        },
        Database,
    },
    read::candidate::list::{Field, Filter, Page, Selector},
    write,
};

/// Columns of the `candidates` table a [`Candidate`] is read from.
const COLUMNS: &str = "\
    id, forename, surname, email, phone, notes, \
    consultant_id, status, role, \
    created_by, updated_by, created_at, updated_at";

/// Reads a [`Candidate`] from the provided [`Row`] selected with [`COLUMNS`].
fn from_row(row: &Row) -> Candidate {
    Candidate {
        id: row.get("id"),
        forename: row.get("forename"),
        surname: row.get("surname"),
        email: row.get("email"),
        phone: row.get("phone"),
        notes: row.get("notes"),
        consultant: row.get("consultant_id"),
        status: row.get("status"),
        role: row.get("role"),
        created_by: row.get("created_by"),
        updated_by: row.get("updated_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Candidate>, candidate::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Candidate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Candidate>, candidate::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql =
            format!("SELECT {COLUMNS} FROM candidates WHERE id = $1::UUID");
        Ok(self
            .query_opt(&sql, &[&id])
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
            filter: Filter { id, search },
            ordering,
        } = by.into_inner();

        let patterns = search.map(|variants| {
            variants
                .iter()
                .map(|v| Contains::new(v))
                .collect::<Vec<_>>()
        });

        let mut list = List::new();
        if let Some(id) = &id {
            let idx = list.bind(id);
            list.filter(format!("id = ${idx}::UUID"));
        }
        if let Some(patterns) = &patterns {
            let idx = list.bind(patterns);
            list.filter(format!(
                "(forename LIKE ANY(${idx}::VARCHAR[]) \
                  OR surname LIKE ANY(${idx}::VARCHAR[]))",
            ));
        }
        let sort = match ordering.field {
            Field::Forename => "forename",
            Field::Surname => "COALESCE(surname, '')",
            Field::Email => "COALESCE(email, '')",
            Field::CreatedAt => "created_at",
            Field::UpdatedAt => "updated_at",
        };
        let (sql, params) = list.build(
            COLUMNS,
            "candidates",
            sort,
            ordering.order,
            &arguments,
        );

        Ok(self
            .query(&sql, &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<write::candidate::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Candidate;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<write::candidate::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let write::candidate::Draft {
            forename,
            surname,
            email,
            phone,
            notes,
            consultant,
            status,
            role,
            created_by,
            updated_by,
        } = draft;
        let consultant = consultant.and_then(Relation::into_target);

        let sql = format!(
            "INSERT INTO candidates (\
                id, forename, surname, email, phone, notes, \
                consultant_id, status, role, \
                created_by, updated_by, created_at, updated_at\
             ) \
             VALUES (\
                gen_random_uuid(), \
                $1::VARCHAR, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::TEXT, $6::UUID, $7::VARCHAR, $8::VARCHAR, \
                $9::UUID, $10::UUID, NOW(), NOW()\
             ) \
             RETURNING {COLUMNS}",
        );
        self.query_one(
            &sql,
            &[
                &forename,
                &surname,
                &email,
                &phone,
                &notes,
                &consultant,
                status.key(),
                role.key(),
                created_by.key(),
                updated_by.key(),
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| from_row(&row))
    }
}

impl<C> Database<Update<write::candidate::Changes>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Candidate;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<write::candidate::Changes>,
    ) -> Result<Self::Ok, Self::Err> {
        let write::candidate::Changes {
            id,
            forename,
            surname,
            email,
            phone,
            notes,
            consultant,
            status,
            role,
            updated_by,
        } = changes;
        let consultant = consultant.into_target();

        let mut set = Assignments::new(&id);
        set.set_some("forename", "VARCHAR", forename.as_ref());
        set.set_some("surname", "VARCHAR", surname.as_ref());
        set.set_some("email", "VARCHAR", email.as_ref());
        set.set_some("phone", "VARCHAR", phone.as_ref());
        set.set_some("notes", "TEXT", notes.as_ref());
        set.set("consultant_id", "UUID", &consultant);
        set.set_some("status", "VARCHAR", status.as_ref().map(Connect::key));
        set.set_some("role", "VARCHAR", role.as_ref().map(Connect::key));
        set.set("updated_by", "UUID", updated_by.key());
        let (sql, params) = set.build("candidates", COLUMNS);

        self.query_one(&sql, &params)
            .await
            .map_err(tracerr::wrap!())
            .map(|row| from_row(&row))
    }
}

impl<C> Database<Delete<By<Candidate, candidate::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Candidate, candidate::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM candidates WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Candidate, candidate::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Candidate, candidate::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id FROM candidates WHERE id = $1::UUID FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
