//! Department Repository

use super::RepoResult;
use crate::db::models::Department;
use crate::utils::now_millis;
use sqlx::SqliteExecutor;

pub async fn find_by_slug(
    ex: impl SqliteExecutor<'_>,
    slug: &str,
) -> RepoResult<Option<Department>> {
    let dept = sqlx::query_as::<_, Department>(
        "SELECT id, slug, name, active, created_at FROM departments WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(ex)
    .await?;
    Ok(dept)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Department>> {
    let dept = sqlx::query_as::<_, Department>(
        "SELECT id, slug, name, active, created_at FROM departments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(dept)
}

pub async fn create(ex: impl SqliteExecutor<'_>, slug: &str, name: &str) -> RepoResult<Department> {
    let dept = sqlx::query_as::<_, Department>(
        "INSERT INTO departments (slug, name, active, created_at) VALUES (?, ?, 1, ?) \
         RETURNING id, slug, name, active, created_at",
    )
    .bind(slug)
    .bind(name)
    .bind(now_millis())
    .fetch_one(ex)
    .await?;
    Ok(dept)
}
