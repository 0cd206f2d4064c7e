//! Dining Table Repository

use super::RepoResult;
use crate::db::models::{DiningTable, DiningTableCreate, TableLayoutItem};
use sqlx::SqliteExecutor;

const COLUMNS: &str =
    "id, department_id, code, name, capacity, pos_x, pos_y, width, height, active";

/// Find all tables of a department, ordered by code
pub async fn find_all(ex: impl SqliteExecutor<'_>, department_id: i64) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_tables WHERE department_id = ? ORDER BY code"
    ))
    .bind(department_id)
    .fetch_all(ex)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_tables WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(table)
}

/// Load a batch of tables by id (order not guaranteed)
pub async fn find_by_ids(
    ex: impl SqliteExecutor<'_>,
    ids: &[i64],
) -> RepoResult<Vec<DiningTable>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    // Dynamic IN placeholder list — keep as runtime query
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!("SELECT {COLUMNS} FROM dining_tables WHERE id IN ({placeholders})");
    let mut query = sqlx::query_as::<_, DiningTable>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(ex).await?)
}

/// Whether a code is taken within the department, optionally ignoring one row
pub async fn code_exists(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    code: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dining_tables WHERE department_id = ? AND code = ? AND id != ?",
    )
    .bind(department_id)
    .bind(code)
    .bind(exclude_id.unwrap_or(-1))
    .fetch_one(ex)
    .await?;
    Ok(count > 0)
}

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    data: &DiningTableCreate,
) -> RepoResult<DiningTable> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "INSERT INTO dining_tables \
         (department_id, code, name, capacity, pos_x, pos_y, width, height, active) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1) RETURNING {COLUMNS}"
    ))
    .bind(department_id)
    .bind(&data.code)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.pos_x)
    .bind(data.pos_y)
    .bind(data.width)
    .bind(data.height)
    .fetch_one(ex)
    .await?;
    Ok(table)
}

/// Patch-style update; absent fields keep their current value
#[allow(clippy::too_many_arguments)]
pub async fn update(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    code: Option<&str>,
    name: Option<&str>,
    capacity: Option<i64>,
    pos_x: Option<i64>,
    pos_y: Option<i64>,
    width: Option<i64>,
    height: Option<i64>,
    active: Option<bool>,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "UPDATE dining_tables SET \
           code = COALESCE(?1, code), \
           name = COALESCE(?2, name), \
           capacity = COALESCE(?3, capacity), \
           pos_x = COALESCE(?4, pos_x), \
           pos_y = COALESCE(?5, pos_y), \
           width = COALESCE(?6, width), \
           height = COALESCE(?7, height), \
           active = COALESCE(?8, active) \
         WHERE id = ?9 RETURNING {COLUMNS}"
    ))
    .bind(code)
    .bind(name)
    .bind(capacity)
    .bind(pos_x)
    .bind(pos_y)
    .bind(width)
    .bind(height)
    .bind(active)
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(table)
}

/// Layout reposition — position/size fields only
pub async fn update_layout(
    ex: impl SqliteExecutor<'_>,
    item: &TableLayoutItem,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE dining_tables SET \
           pos_x = COALESCE(?1, pos_x), \
           pos_y = COALESCE(?2, pos_y), \
           width = COALESCE(?3, width), \
           height = COALESCE(?4, height) \
         WHERE id = ?5",
    )
    .bind(item.pos_x)
    .bind(item.pos_y)
    .bind(item.width)
    .bind(item.height)
    .bind(item.id)
    .execute(ex)
    .await?
    .rows_affected();
    Ok(rows > 0)
}

/// Hard delete
pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_tables WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?
        .rows_affected();
    Ok(rows > 0)
}
