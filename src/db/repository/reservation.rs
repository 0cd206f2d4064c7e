//! Reservation Repository

use super::RepoResult;
use crate::db::models::{Reservation, ReservationStatus};
use crate::utils::now_millis;
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, department_id, name, phone, reservation_time, people, status, \
                       seated_at, finished_at, created_at";

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservations WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(reservation)
}

pub async fn list(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    status: Option<ReservationStatus>,
) -> RepoResult<Vec<Reservation>> {
    let reservations = match status {
        Some(status) => {
            sqlx::query_as::<_, Reservation>(&format!(
                "SELECT {COLUMNS} FROM reservations \
                 WHERE department_id = ? AND status = ? ORDER BY created_at"
            ))
            .bind(department_id)
            .bind(status)
            .fetch_all(ex)
            .await?
        }
        None => {
            sqlx::query_as::<_, Reservation>(&format!(
                "SELECT {COLUMNS} FROM reservations \
                 WHERE department_id = ? ORDER BY created_at DESC"
            ))
            .bind(department_id)
            .fetch_all(ex)
            .await?
        }
    };
    Ok(reservations)
}

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    name: &str,
    phone: &str,
    reservation_time: &str,
    people: i64,
) -> RepoResult<Reservation> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "INSERT INTO reservations \
         (department_id, name, phone, reservation_time, people, status, created_at) \
         VALUES (?, ?, ?, ?, ?, 'WAITING', ?) RETURNING {COLUMNS}"
    ))
    .bind(department_id)
    .bind(name)
    .bind(phone)
    .bind(reservation_time)
    .bind(people)
    .bind(now_millis())
    .fetch_one(ex)
    .await?;
    Ok(reservation)
}

/// Status change; SEATED stamps `seated_at`, DONE stamps `finished_at`
pub async fn update_status(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Option<Reservation>> {
    let now = now_millis();
    let (seated_at, finished_at) = match status {
        ReservationStatus::Seated => (Some(now), None),
        ReservationStatus::Done => (None, Some(now)),
        _ => (None, None),
    };
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "UPDATE reservations SET status = ?1, \
           seated_at = COALESCE(?2, seated_at), \
           finished_at = COALESCE(?3, finished_at) \
         WHERE id = ?4 RETURNING {COLUMNS}"
    ))
    .bind(status)
    .bind(seated_at)
    .bind(finished_at)
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(reservation)
}
