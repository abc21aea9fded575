//! [`Assignments`] SQL builder.

use itertools::Itertools as _;
use postgres_types::ToSql;

/// Builder of an `UPDATE` statement changing only the columns it was provided
/// values for.
///
/// The row to update is identified by its `id`, always bound as `$1`.
#[derive(Debug)]
pub(super) struct Assignments<'p> {
    /// Parameters bound so far, in their `$n` order.
    params: Vec<&'p (dyn ToSql + Sync)>,

    /// `column = $n::TYPE` assignments.
    columns: Vec<String>,
}

impl<'p> Assignments<'p> {
    /// Creates a new [`Assignments`] builder of the row with the provided
    /// `id`.
    pub(super) fn new(id: &'p (dyn ToSql + Sync)) -> Self {
        Self {
            params: vec![id],
            columns: Vec::new(),
        }
    }

    /// Assigns the `value` of the `ty` SQL type to the `column`.
    pub(super) fn set(
        &mut self,
        column: &str,
        ty: &str,
        value: &'p (dyn ToSql + Sync),
    ) {
        self.params.push(value);
        let idx = self.params.len();
        self.columns.push(format!("{column} = ${idx}::{ty}"));
    }

    /// Assigns the `value` of the `ty` SQL type to the `column`, if there is
    /// any.
    ///
    /// A [`None`] leaves the `column` untouched, while a provided `NULL`able
    /// value (like `Some(&None)`) resets it.
    pub(super) fn set_some<T>(
        &mut self,
        column: &str,
        ty: &str,
        value: Option<&'p T>,
    ) where
        T: ToSql + Sync,
    {
        if let Some(v) = value {
            self.set(column, ty, v);
        }
    }

    /// Builds the statement updating the row of the `table` and returning its
    /// `columns`.
    ///
    /// The `updated_at` column is always bumped.
    pub(super) fn build(
        self,
        table: &str,
        columns: &str,
    ) -> (String, Vec<&'p (dyn ToSql + Sync)>) {
        let sql = format!(
            "UPDATE {table} \
             SET {assignments}updated_at = NOW() \
             WHERE id = $1::UUID \
             RETURNING {columns}",
            assignments = self
                .columns
                .iter()
                .map(|c| format!("{c}, "))
                .join(""),
        );
        (sql, self.params)
    }
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use super::Assignments;

    #[test]
    fn touches_only_provided_columns() {
        let id = Uuid::nil();
        let forename = "Jo".to_owned();
        let surname: Option<String> = None;
        let email: Option<Option<String>> = None;

        let mut set = Assignments::new(&id);
        set.set("forename", "VARCHAR", &forename);
        set.set_some("surname", "VARCHAR", Some(&surname));
        set.set_some("email", "VARCHAR", email.as_ref());
        let (sql, params) = set.build("candidates", "id");

        assert_eq!(
            sql,
            "UPDATE candidates \
             SET forename = $2::VARCHAR, surname = $3::VARCHAR, \
             updated_at = NOW() \
             WHERE id = $1::UUID \
             RETURNING id",
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn bumps_update_time_only() {
        let id = Uuid::nil();

        let (sql, params) = Assignments::new(&id).build("bookings", "id");

        assert_eq!(
            sql,
            "UPDATE bookings \
             SET updated_at = NOW() \
             WHERE id = $1::UUID \
             RETURNING id",
        );
        assert_eq!(params.len(), 1);
    }
}
