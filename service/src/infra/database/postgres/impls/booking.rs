//! [`Booking`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Lock, Select, Update},
    Connect,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{booking, Booking},
    infra::{
        database::{
            self,
            postgres::{assignments::Assignments, list::List, Connection},
            Postgres,
        },
        Database,
    },
    read::booking::list::{Field, Filter, Page, Selector},
    write,
};

/// Columns of the `bookings` table a [`Booking`] is read from.
const COLUMNS: &str = "\
    id, date, candidate_id, company_id, role, notes, \
    created_by, updated_by, created_at, updated_at";

/// Reads a [`Booking`] from the provided [`Row`] selected with [`COLUMNS`].
fn from_row(row: &Row) -> Booking {
    Booking {
        id: row.get("id"),
        date: row.get("date"),
        candidate: row.get("candidate_id"),
        company: row.get("company_id"),
        role: row.get("role"),
        notes: row.get("notes"),
        created_by: row.get("created_by"),
        updated_by: row.get("updated_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1::UUID");
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
            filter:
                Filter {
                    id,
                    candidate,
                    company,
                    date,
                },
            ordering,
        } = by.into_inner();

        let mut list = List::new();
        if let Some(id) = &id {
            let idx = list.bind(id);
            list.filter(format!("id = ${idx}::UUID"));
        }
        if let Some(candidate) = &candidate {
            let idx = list.bind(candidate);
            list.filter(format!("candidate_id = ${idx}::UUID"));
        }
        if let Some(company) = &company {
            let idx = list.bind(company);
            list.filter(format!("company_id = ${idx}::UUID"));
        }
        if let Some(date) = &date {
            let idx = list.bind(date);
            list.filter(format!("date = ${idx}::DATE"));
        }
        let sort = match ordering.field {
            Field::Date => "date",
            Field::CreatedAt => "created_at",
            Field::UpdatedAt => "updated_at",
        };
        let (sql, params) =
            list.build(COLUMNS, "bookings", sort, ordering.order, &arguments);

        Ok(self
            .query(&sql, &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<write::booking::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Booking;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<write::booking::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let write::booking::Draft {
            date,
            candidate,
            company,
            role,
            notes,
            created_by,
            updated_by,
        } = draft;

        let sql = format!(
            "INSERT INTO bookings (\
                id, date, candidate_id, company_id, role, notes, \
                created_by, updated_by, created_at, updated_at\
             ) \
             VALUES (\
                gen_random_uuid(), \
                $1::DATE, $2::UUID, $3::UUID, $4::VARCHAR, $5::TEXT, \
                $6::UUID, $7::UUID, NOW(), NOW()\
             ) \
             RETURNING {COLUMNS}",
        );
        self.query_one(
            &sql,
            &[
                &date,
                candidate.key(),
                company.key(),
                role.key(),
                &notes,
                created_by.key(),
                updated_by.key(),
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| from_row(&row))
    }
}

impl<C> Database<Update<write::booking::Changes>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Booking;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<write::booking::Changes>,
    ) -> Result<Self::Ok, Self::Err> {
        let write::booking::Changes {
            id,
            date,
            candidate,
            company,
            role,
            notes,
            updated_by,
        } = changes;

        let mut set = Assignments::new(&id);
        set.set_some("date", "DATE", date.as_ref());
        set.set_some(
            "candidate_id",
            "UUID",
            candidate.as_ref().map(Connect::key),
        );
        set.set_some("company_id", "UUID", company.as_ref().map(Connect::key));
        set.set_some("role", "VARCHAR", role.as_ref().map(Connect::key));
        set.set_some("notes", "TEXT", notes.as_ref());
        set.set("updated_by", "UUID", updated_by.key());
        let (sql, params) = set.build("bookings", COLUMNS);

        self.query_one(&sql, &params)
            .await
            .map_err(tracerr::wrap!())
            .map(|row| from_row(&row))
    }
}

impl<C> Database<Delete<By<Booking, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "DELETE FROM bookings WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Booking, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id FROM bookings WHERE id = $1::UUID FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
