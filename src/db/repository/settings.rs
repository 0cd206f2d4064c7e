//! Department Settings Repository (one JSON document per department)

use super::RepoResult;
use crate::utils::now_millis;
use sqlx::SqliteExecutor;

pub async fn get_raw(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
) -> RepoResult<Option<String>> {
    let raw = sqlx::query_scalar::<_, String>(
        "SELECT settings FROM department_settings WHERE department_id = ?",
    )
    .bind(department_id)
    .fetch_optional(ex)
    .await?;
    Ok(raw)
}

pub async fn upsert(ex: impl SqliteExecutor<'_>, department_id: i64, json: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO department_settings (department_id, settings, updated_at) \
         VALUES (?1, ?2, ?3) \
         ON CONFLICT(department_id) DO UPDATE SET settings = ?2, updated_at = ?3",
    )
    .bind(department_id)
    .bind(json)
    .bind(now_millis())
    .execute(ex)
    .await?;
    Ok(())
}
