//! [`List`] SQL builder.

use common::pagination::{Arguments, Order};
use itertools::Itertools as _;
use postgres_types::ToSql;

/// Builder of a `SELECT` statement returning a filtered, ordered and
/// paginated list of rows.
#[derive(Debug, Default)]
pub(super) struct List<'p> {
    /// Parameters bound so far, in their `$n` order.
    params: Vec<&'p (dyn ToSql + Sync)>,

    /// Conditions all the selected rows must satisfy.
    filters: Vec<String>,
}

impl<'p> List<'p> {
    /// Creates a new empty [`List`] builder.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Binds the provided `param` and returns its `$n` index.
    pub(super) fn bind(&mut self, param: &'p (dyn ToSql + Sync)) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Adds the provided `condition` the selected rows must satisfy.
    pub(super) fn filter(&mut self, condition: impl Into<String>) {
        self.filters.push(condition.into());
    }

    /// Builds the statement selecting the `columns` from the `table`, ordered
    /// by the `sort` expression and then by `id`, and paginated with the
    /// provided [`Arguments`].
    ///
    /// Rows up to and including the cursor row are skipped in the requested
    /// [`Order`]. A cursor naming no existing row (a deleted one, say)
    /// selects nothing, so the returned page is empty.
    pub(super) fn build<C>(
        mut self,
        columns: &str,
        table: &str,
        sort: &str,
        order: Order,
        arguments: &'p Arguments<C>,
    ) -> (String, Vec<&'p (dyn ToSql + Sync)>)
    where
        C: ToSql + Sync,
    {
        if let Some(cursor) = &arguments.after {
            let idx = self.bind(cursor);
            let op = order.after_operator();
            self.filter(format!(
                "({sort}, id) {op} (\
                    SELECT {sort}, id FROM {table} WHERE id = ${idx}::UUID\
                 )",
            ));
        }

        let limit = arguments.first.map_or_else(
            || "ALL".to_owned(),
            |n| i64::try_from(n).unwrap_or(i64::MAX).to_string(),
        );
        let offset = i64::try_from(arguments.skip).unwrap_or(i64::MAX);
        let order = order.sql();

        let sql = format!(
            "SELECT {columns} \
             FROM {table} \
             {filters} \
             ORDER BY {sort} {order}, id {order} \
             LIMIT {limit} OFFSET {offset}",
            filters = if self.filters.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", self.filters.iter().join(" AND "))
            },
        );
        (sql, self.params)
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::{Arguments, Order};
    use uuid::Uuid;

    use super::List;

    #[test]
    fn builds_unfiltered_list() {
        let args = Arguments::<Uuid>::default();

        let (sql, params) = List::new().build(
            "id, name",
            "users",
            "created_at",
            Order::Ascending,
            &args,
        );

        assert_eq!(
            sql,
            "SELECT id, name \
             FROM users  \
             ORDER BY created_at ASC, id ASC \
             LIMIT ALL OFFSET 0",
        );
        assert!(params.is_empty());
    }

    #[test]
    fn places_cursor_after_filters() {
        let name = "jo".to_owned();
        let args = Arguments {
            first: Some(10),
            skip: 5,
            after: Some(Uuid::nil()),
        };

        let mut list = List::new();
        let idx = list.bind(&name);
        list.filter(format!("name LIKE ${idx}::VARCHAR"));
        let (sql, params) =
            list.build("id", "users", "name", Order::Descending, &args);

        assert_eq!(
            sql,
            "SELECT id \
             FROM users \
             WHERE name LIKE $1::VARCHAR \
             AND (name, id) < (\
                SELECT name, id FROM users WHERE id = $2::UUID\
             ) \
             ORDER BY name DESC, id DESC \
             LIMIT 10 OFFSET 5",
        );
        assert_eq!(params.len(), 2);
    }
}
