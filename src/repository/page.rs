//! Generic paged queries
//!
//! The console's list screens share one query shape: an optional search key
//! bound as a LIKE parameter, newest rows first, LIMIT/OFFSET paging. The
//! gateway writes a `key` column into every table the console lists.

use serde::Serialize;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, MySqlPool};

use crate::error::Result;

/// Page size used when the client did not choose one
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Page index used when the client did not choose one
pub const DEFAULT_PAGE_ID: i64 = 1;

/// Normalized page bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub size: i64,
    pub id: i64,
}

impl Page {
    /// Apply the console defaulting rule: values below 1 take the default
    pub fn new(size: i64, id: i64) -> Self {
        Self {
            size: if size < 1 { DEFAULT_PAGE_SIZE } else { size },
            id: if id < 1 { DEFAULT_PAGE_ID } else { id },
        }
    }

    /// Row offset of this page. Saturates instead of overflowing so an
    /// out-of-range id cannot panic or go negative.
    pub fn offset(&self) -> i64 {
        self.id.saturating_sub(1).saturating_mul(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// One page of rows plus paging metadata
#[derive(Debug, Clone, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page_id: i64,
    pub page_size: i64,
    pub page_count: i64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total: i64, page: Page) -> Self {
        let page_count = (total as f64 / page.size as f64).ceil() as i64;
        Self {
            items,
            total,
            page_id: page.id,
            page_size: page.size,
            page_count,
        }
    }
}

fn select_sql(table: &str, keyed: bool) -> String {
    let mut sql = format!("SELECT * FROM {} WHERE 1=1", table);
    if keyed {
        sql.push_str(" AND `key` LIKE ?");
    }
    sql.push_str(" ORDER BY id DESC LIMIT ? OFFSET ?");
    sql
}

fn count_sql(table: &str, keyed: bool) -> String {
    let mut sql = format!("SELECT COUNT(*) FROM {} WHERE 1=1", table);
    if keyed {
        sql.push_str(" AND `key` LIKE ?");
    }
    sql
}

fn like_pattern(key: &str) -> String {
    format!("%{}%", key)
}

/// Run one page query plus its count against `table`.
///
/// `table` must be a crate-internal constant, never request input. The
/// optional `key` is the single bound parameter, matched as a substring.
pub async fn query_page<T>(
    pool: &MySqlPool,
    table: &str,
    key: Option<&str>,
    page: Page,
) -> Result<PageResult<T>>
where
    T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
{
    let pattern = key.map(like_pattern);
    let select = select_sql(table, pattern.is_some());
    let count = count_sql(table, pattern.is_some());

    let mut rows = sqlx::query_as::<_, T>(&select);
    if let Some(ref pattern) = pattern {
        rows = rows.bind(pattern);
    }
    let items = rows
        .bind(page.size)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    let mut total_rows = sqlx::query_as::<_, (i64,)>(&count);
    if let Some(ref pattern) = pattern {
        total_rows = total_rows.bind(pattern);
    }
    let (total,) = total_rows.fetch_one(pool).await?;

    Ok(PageResult::new(items, total, page))
}
