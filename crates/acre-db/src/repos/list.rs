//! Paginated list queries with search and equality filters.

use acre_core::responses::{Page, num_pages};

use crate::error::DatabaseError;
use crate::helpers::contains_pattern;
use crate::service::AcreService;

/// WHERE-clause builder with positional parameters.
#[derive(Debug, Default)]
pub(crate) struct Conditions {
    clauses: Vec<String>,
    params: Vec<libsql::Value>,
}

impl Conditions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on any of `columns`. Blank terms are ignored.
    pub(crate) fn search(&mut self, columns: &[&str], term: Option<&str>) -> &mut Self {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self;
        };
        self.params.push(contains_pattern(term).into());
        let idx = self.params.len();
        let any = columns
            .iter()
            .map(|col| format!("{col} LIKE ?{idx} ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.clauses.push(format!("({any})"));
        self
    }

    /// `column = value` when a value is given.
    pub(crate) fn eq<V: Into<libsql::Value>>(&mut self, column: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.params.push(value.into());
            self.clauses.push(format!("{column} = ?{}", self.params.len()));
        }
        self
    }

    pub(crate) fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn params(&self) -> Vec<libsql::Value> {
        self.params.clone()
    }
}

/// The shape of one list query.
pub(crate) struct ListSql<'a> {
    /// Column list, in the order the row mapper reads them.
    pub columns: &'a str,
    pub table: &'a str,
    pub order_by: &'a str,
}

impl AcreService {
    /// Run a paginated list query. Pages start at 1.
    ///
    /// Page 1 of an empty result is an empty page; any other page past the
    /// last is `PageNotFound`.
    pub(crate) async fn paginate<T>(
        &self,
        sql: &ListSql<'_>,
        conditions: &Conditions,
        page: u32,
        map_row: fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Page<T>, DatabaseError> {
        let where_sql = conditions.where_sql();
        let total = self
            .db()
            .query_count(
                &format!("SELECT COUNT(*) FROM {} {where_sql}", sql.table),
                conditions.params(),
            )
            .await?;
        let total = u64::try_from(total).unwrap_or_default();

        let page_size = self.page_size();
        let pages = num_pages(total, page_size);
        if page == 0 || page > pages {
            return Err(DatabaseError::PageNotFound {
                page,
                num_pages: pages,
            });
        }

        let offset = u64::from(page - 1) * u64::from(page_size);
        let query = format!(
            "SELECT {} FROM {} {where_sql} ORDER BY {} LIMIT {page_size} OFFSET {offset}",
            sql.columns, sql.table, sql.order_by
        );
        let mut rows = self
            .db()
            .conn()
            .query(&query, libsql::params_from_iter(conditions.params()))
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(map_row(&row)?);
        }
        Ok(Page::new(items, page, page_size, total))
    }
}
