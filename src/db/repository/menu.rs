//! Menu Repository (read-only inside this core)

use super::RepoResult;
use crate::db::models::Menu;
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, department_id, category, name, price, description, sold_out, active";

/// Lookup for order-item snapshotting; department-checked so a foreign
/// menu id cannot leak another tenant's prices.
pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    id: i64,
) -> RepoResult<Option<Menu>> {
    let menu = sqlx::query_as::<_, Menu>(&format!(
        "SELECT {COLUMNS} FROM menus WHERE id = ? AND department_id = ?"
    ))
    .bind(id)
    .bind(department_id)
    .fetch_optional(ex)
    .await?;
    Ok(menu)
}

/// Public menu listing (active entries, grouped client-side by category)
pub async fn list_active(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
) -> RepoResult<Vec<Menu>> {
    let menus = sqlx::query_as::<_, Menu>(&format!(
        "SELECT {COLUMNS} FROM menus WHERE department_id = ? AND active = 1 \
         ORDER BY category, name"
    ))
    .bind(department_id)
    .fetch_all(ex)
    .await?;
    Ok(menus)
}

/// Seed/bootstrap helper (used by tests and demo data loading)
pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    category: Option<&str>,
    name: &str,
    price: i64,
) -> RepoResult<Menu> {
    let menu = sqlx::query_as::<_, Menu>(&format!(
        "INSERT INTO menus (department_id, category, name, price, sold_out, active) \
         VALUES (?, ?, ?, ?, 0, 1) RETURNING {COLUMNS}"
    ))
    .bind(department_id)
    .bind(category)
    .bind(name)
    .bind(price)
    .fetch_one(ex)
    .await?;
    Ok(menu)
}
