//! SQL assembly for the request-to-SQL mapping layer.
//!
//! Two builders live here:
//!
//! - [`SelectBuilder`] renders filtered, paginated SELECT statements. Filters
//!   are an ordered list of `(column, operator, parameter)` tuples combined
//!   with `AND` only; positional placeholders are allocated strictly
//!   left-to-right, predicates first, then `LIMIT`/`OFFSET`, so `$1..$n` is
//!   always contiguous.
//! - [`UpdateBuilder`] renders COALESCE partial updates: each registered
//!   column keeps its stored value unless the bound parameter is non-NULL,
//!   and `updated_at` is refreshed on every invocation.
//!
//! Both produce `(String, Vec<Bind>)` and nothing else; execution belongs
//! to the repositories.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A typed positional argument.
///
/// A `None` payload binds SQL NULL, which the partial-update statements rely
/// on for their "retain stored value" arm.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Int(Option<i64>),
    Text(Option<String>),
    Timestamp(Option<DateTime<Utc>>),
}

impl Bind {
    pub fn int(value: i64) -> Self {
        Bind::Int(Some(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Bind::Text(Some(value.into()))
    }

    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Bind::Timestamp(Some(value))
    }
}

/// One filter condition contributed to a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: &'static str,
    pub value: Bind,
}

/// Bounded pagination, parsed leniently from raw query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    /// Parse `page` and `page_size` from their raw query-string values.
    ///
    /// Values that are absent, unparseable or not positive silently fall
    /// back to the defaults (1 and 20); `page_size` is additionally clamped
    /// to 100. Nothing here ever errors.
    pub fn from_params(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let page_size = parse_positive(page_size)
            .map(|v| v.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|r| r.parse::<i64>().ok()).filter(|v| *v > 0)
}

/// Strict RFC3339 timestamp parsing.
///
/// Callers that want the "silently drop unparseable filters" behaviour get
/// it by chaining `and_then` over this.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Builds one parameterized SELECT statement.
///
/// Results are always ordered `id DESC`. Identifiers are monotonically
/// assigned, so this is most-recently-created-first; there is no
/// caller-supplied sort.
#[derive(Debug)]
pub struct SelectBuilder {
    table: &'static str,
    columns: &'static str,
    predicates: Vec<Predicate>,
}

impl SelectBuilder {
    pub fn new(table: &'static str, columns: &'static str) -> Self {
        Self {
            table,
            columns,
            predicates: Vec::new(),
        }
    }

    /// Append a predicate. Order of calls is the order of placeholders.
    pub fn filter(mut self, column: &'static str, op: &'static str, value: Bind) -> Self {
        self.predicates.push(Predicate { column, op, value });
        self
    }

    /// Append a predicate only when a value survived parsing.
    pub fn maybe_filter(self, column: &'static str, op: &'static str, value: Option<Bind>) -> Self {
        match value {
            Some(value) => self.filter(column, op, value),
            None => self,
        }
    }

    /// Render the statement and its ordered argument list.
    pub fn build(self, page: &Pagination) -> (String, Vec<Bind>) {
        let mut sql = format!("SELECT {} FROM {}", self.columns, self.table);
        let mut binds = Vec::with_capacity(self.predicates.len() + 2);

        for (i, predicate) in self.predicates.into_iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!(
                "{} {} ${}",
                predicate.column,
                predicate.op,
                i + 1
            ));
            binds.push(predicate.value);
        }

        sql.push_str(&format!(
            " ORDER BY id DESC LIMIT ${} OFFSET ${}",
            binds.len() + 1,
            binds.len() + 2
        ));
        binds.push(Bind::int(page.page_size));
        binds.push(Bind::int(page.offset()));

        (sql, binds)
    }
}

/// Builds one partial UPDATE statement.
///
/// Every registered column renders as `col = COALESCE($n, col)`: a NULL bind
/// retains the stored value, a non-NULL bind overwrites it. `updated_at` is
/// set unconditionally, so an empty change-set still produces a valid
/// statement that refreshes the timestamp.
#[derive(Debug)]
pub struct UpdateBuilder {
    table: &'static str,
    id: i64,
    assignments: Vec<(&'static str, Bind)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str, id: i64) -> Self {
        Self {
            table,
            id,
            assignments: Vec::new(),
        }
    }

    pub fn coalesce(mut self, column: &'static str, value: Bind) -> Self {
        self.assignments.push((column, value));
        self
    }

    /// Render the statement and its ordered argument list; the target id is
    /// always the final parameter.
    pub fn build(self) -> (String, Vec<Bind>) {
        let mut sql = format!("UPDATE {} SET ", self.table);
        let mut binds = Vec::with_capacity(self.assignments.len() + 1);

        for (column, value) in self.assignments {
            sql.push_str(&format!(
                "{col} = COALESCE(${}, {col}), ",
                binds.len() + 1,
                col = column
            ));
            binds.push(value);
        }

        sql.push_str(&format!("updated_at = now() WHERE id = ${}", binds.len() + 1));
        binds.push(Bind::int(self.id));

        (sql, binds)
    }
}

/// Replay an argument list onto a row-returning query.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    binds: Vec<Bind>,
) -> Query<'q, Postgres, PgArguments> {
    for bind in binds {
        query = match bind {
            Bind::Int(v) => query.bind(v),
            Bind::Text(v) => query.bind(v),
            Bind::Timestamp(v) => query.bind(v),
        };
    }
    query
}

/// Replay an argument list onto a typed query.
pub fn bind_all_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    binds: Vec<Bind>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for bind in binds {
        query = match bind {
            Bind::Int(v) => query.bind(v),
            Bind::Text(v) => query.bind(v),
            Bind::Timestamp(v) => query.bind(v),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_when_absent() {
        let page = Pagination::from_params(None, None);
        assert_eq!(page, Pagination { page: 1, page_size: 20 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn pagination_accepts_valid_values() {
        let page = Pagination::from_params(Some("3"), Some("50"));
        assert_eq!(page, Pagination { page: 3, page_size: 50 });
        assert_eq!(page.offset(), 100);
    }

    #[test]
    fn pagination_clamps_page_size_to_maximum() {
        let page = Pagination::from_params(None, Some("500"));
        assert_eq!(page.page_size, 100);
    }

    #[test]
    fn pagination_rejects_non_positive_and_garbage() {
        assert_eq!(Pagination::from_params(Some("0"), Some("0")), Pagination::default());
        assert_eq!(Pagination::from_params(Some("-2"), Some("-7")), Pagination::default());
        assert_eq!(Pagination::from_params(Some("abc"), Some("ten")), Pagination::default());
        assert_eq!(Pagination::from_params(Some(""), Some("")), Pagination::default());
    }

    #[test]
    fn select_without_filters_has_only_pagination_params() {
        let (sql, binds) = SelectBuilder::new("clinicians", "id, full_name")
            .build(&Pagination::default());

        assert_eq!(
            sql,
            "SELECT id, full_name FROM clinicians ORDER BY id DESC LIMIT $1 OFFSET $2"
        );
        assert_eq!(binds, vec![Bind::int(20), Bind::int(0)]);
    }

    #[test]
    fn select_numbers_placeholders_contiguously() {
        let from = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        let (sql, binds) = SelectBuilder::new("assessments", "id")
            .filter("patient_id", "=", Bind::int(1))
            .filter("created_at", ">=", Bind::timestamp(from))
            .build(&Pagination::from_params(Some("2"), Some("10")));

        assert_eq!(
            sql,
            "SELECT id FROM assessments WHERE patient_id = $1 AND created_at >= $2 \
             ORDER BY id DESC LIMIT $3 OFFSET $4"
        );
        assert_eq!(
            binds,
            vec![
                Bind::int(1),
                Bind::timestamp(from),
                Bind::int(10),
                Bind::int(10),
            ]
        );
    }

    #[test]
    fn maybe_filter_skips_dropped_values() {
        let (sql, binds) = SelectBuilder::new("assessments", "id")
            .maybe_filter("patient_id", "=", None)
            .maybe_filter("clinician_id", "=", Some(Bind::int(4)))
            .build(&Pagination::default());

        assert_eq!(
            sql,
            "SELECT id FROM assessments WHERE clinician_id = $1 \
             ORDER BY id DESC LIMIT $2 OFFSET $3"
        );
        assert_eq!(binds.len(), 3);
    }

    #[test]
    fn update_renders_coalesce_per_column() {
        let (sql, binds) = UpdateBuilder::new("clinicians", 9)
            .coalesce("full_name", Bind::text("Jo Marsh"))
            .coalesce("email", Bind::Text(None))
            .build();

        assert_eq!(
            sql,
            "UPDATE clinicians SET full_name = COALESCE($1, full_name), \
             email = COALESCE($2, email), updated_at = now() WHERE id = $3"
        );
        assert_eq!(
            binds,
            vec![Bind::text("Jo Marsh"), Bind::Text(None), Bind::int(9)]
        );
    }

    #[test]
    fn update_with_empty_change_set_still_touches_updated_at() {
        let (sql, binds) = UpdateBuilder::new("patients", 5).build();

        assert_eq!(sql, "UPDATE patients SET updated_at = now() WHERE id = $1");
        assert_eq!(binds, vec![Bind::int(5)]);
    }

    #[test]
    fn null_bind_renders_retain_semantics() {
        // A field the caller never sent and a field sent as JSON null both
        // arrive here as a NULL bind; the rendered statement keeps the
        // stored value for either.
        let (sql, binds) = UpdateBuilder::new("patients", 1)
            .coalesce("gender", Bind::Text(None))
            .build();

        assert_eq!(
            sql,
            "UPDATE patients SET gender = COALESCE($1, gender), \
             updated_at = now() WHERE id = $2"
        );
        assert_eq!(binds, vec![Bind::Text(None), Bind::int(1)]);
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_only() {
        assert!(parse_timestamp("2024-01-01T00:00:00Z").is_some());
        assert!(parse_timestamp("2024-01-01T00:00:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-01").is_none());
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
