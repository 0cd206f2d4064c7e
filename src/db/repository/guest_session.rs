//! Guest Session Repository
//!
//! The uniqueness rules behind sessions (occupancy, reservation link,
//! session code) are partial unique indexes — inserts and table updates
//! here can fail with `RepoError::Unique`, which the session service maps
//! to business errors.

use super::RepoResult;
use crate::db::models::{GuestSession, SessionStatus, SessionType};
use crate::utils::now_millis;
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, department_id, session_type, reservation_id, table_id, session_code, \
                       guest_name, guest_phone, people, status, created_at, closed_at";

/// Insert payload assembled by the session service
#[derive(Debug, Clone)]
pub struct NewSession {
    pub department_id: i64,
    pub session_type: SessionType,
    pub reservation_id: Option<i64>,
    pub table_id: Option<i64>,
    pub session_code: Option<String>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub people: Option<i64>,
}

pub async fn insert(ex: impl SqliteExecutor<'_>, data: &NewSession) -> RepoResult<GuestSession> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "INSERT INTO guest_sessions \
         (department_id, session_type, reservation_id, table_id, session_code, \
          guest_name, guest_phone, people, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'ACTIVE', ?) RETURNING {COLUMNS}"
    ))
    .bind(data.department_id)
    .bind(data.session_type)
    .bind(data.reservation_id)
    .bind(data.table_id)
    .bind(&data.session_code)
    .bind(&data.guest_name)
    .bind(&data.guest_phone)
    .bind(data.people)
    .bind(now_millis())
    .fetch_one(ex)
    .await?;
    Ok(session)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<GuestSession>> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "SELECT {COLUMNS} FROM guest_sessions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(session)
}

pub async fn find_by_code(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    code: &str,
) -> RepoResult<Option<GuestSession>> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "SELECT {COLUMNS} FROM guest_sessions WHERE department_id = ? AND session_code = ?"
    ))
    .bind(department_id)
    .bind(code)
    .fetch_optional(ex)
    .await?;
    Ok(session)
}

pub async fn find_by_reservation(
    ex: impl SqliteExecutor<'_>,
    reservation_id: i64,
) -> RepoResult<Option<GuestSession>> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "SELECT {COLUMNS} FROM guest_sessions WHERE reservation_id = ?"
    ))
    .bind(reservation_id)
    .fetch_optional(ex)
    .await?;
    Ok(session)
}

/// The ACTIVE session on a table, if any, optionally ignoring one session
pub async fn find_active_on_table(
    ex: impl SqliteExecutor<'_>,
    table_id: i64,
    exclude_id: Option<i64>,
) -> RepoResult<Option<GuestSession>> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "SELECT {COLUMNS} FROM guest_sessions \
         WHERE table_id = ? AND status = 'ACTIVE' AND id != ?"
    ))
    .bind(table_id)
    .bind(exclude_id.unwrap_or(-1))
    .fetch_optional(ex)
    .await?;
    Ok(session)
}

/// List a department's sessions, newest first, optionally by status
pub async fn list(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    status: Option<SessionStatus>,
) -> RepoResult<Vec<GuestSession>> {
    let sessions = match status {
        Some(status) => {
            sqlx::query_as::<_, GuestSession>(&format!(
                "SELECT {COLUMNS} FROM guest_sessions \
                 WHERE department_id = ? AND status = ? ORDER BY created_at DESC"
            ))
            .bind(department_id)
            .bind(status)
            .fetch_all(ex)
            .await?
        }
        None => {
            sqlx::query_as::<_, GuestSession>(&format!(
                "SELECT {COLUMNS} FROM guest_sessions \
                 WHERE department_id = ? ORDER BY created_at DESC"
            ))
            .bind(department_id)
            .fetch_all(ex)
            .await?
        }
    };
    Ok(sessions)
}

/// Set or clear the table assignment. Setting can trip the occupancy
/// index when another ACTIVE session holds the table.
pub async fn set_table(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    table_id: Option<i64>,
) -> RepoResult<Option<GuestSession>> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "UPDATE guest_sessions SET table_id = ?1 WHERE id = ?2 RETURNING {COLUMNS}"
    ))
    .bind(table_id)
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(session)
}

pub async fn close(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<GuestSession>> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "UPDATE guest_sessions SET status = 'CLOSED', closed_at = ?1 \
         WHERE id = ?2 RETURNING {COLUMNS}"
    ))
    .bind(now_millis())
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(session)
}

/// Reopen can trip the occupancy index when the table was re-seated while
/// this session was closed.
pub async fn reopen(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<GuestSession>> {
    let session = sqlx::query_as::<_, GuestSession>(&format!(
        "UPDATE guest_sessions SET status = 'ACTIVE', closed_at = NULL \
         WHERE id = ?1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(session)
}

pub async fn delete(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM guest_sessions WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?
        .rows_affected();
    Ok(rows > 0)
}
