//! Reservation Service
//!
//! Booking intake and status tracking. Creation is refused for slots the
//! staff have closed; the closed list holds verbatim ISO-8601 strings and
//! matching is exact, not range-based.

use sqlx::SqlitePool;

use crate::db::models::{Reservation, ReservationCreateRequest, ReservationStatus};
use crate::db::repository::reservation as reservation_repo;
use crate::services::SettingsService;
use crate::utils::error::codes;
use crate::utils::{AppError, AppResult};

const DEFAULT_PEOPLE: i64 = 2;

#[derive(Clone)]
pub struct ReservationService {
    pool: SqlitePool,
    settings: SettingsService,
}

impl ReservationService {
    pub fn new(pool: SqlitePool, settings: SettingsService) -> Self {
        Self { pool, settings }
    }

    pub async fn get(&self, department_id: i64, reservation_id: i64) -> AppResult<Reservation> {
        reservation_repo::find_by_id(&self.pool, reservation_id)
            .await?
            .filter(|r| r.department_id == department_id)
            .ok_or_else(|| reservation_not_found(reservation_id))
    }

    pub async fn list(
        &self,
        department_id: i64,
        status: Option<ReservationStatus>,
    ) -> AppResult<Vec<Reservation>> {
        Ok(reservation_repo::list(&self.pool, department_id, status).await?)
    }

    /// 예약 생성 — WAITING unless the slot has been closed
    pub async fn create(
        &self,
        department_id: i64,
        request: &ReservationCreateRequest,
    ) -> AppResult<Reservation> {
        let closed = self.settings.closed_slots(department_id).await?;
        if closed.iter().any(|slot| *slot == request.reservation_time) {
            return Err(AppError::business(
                codes::SLOT_CLOSED,
                format!("Slot {} is closed for reservations", request.reservation_time),
            ));
        }

        Ok(reservation_repo::insert(
            &self.pool,
            department_id,
            &request.name,
            &request.phone,
            &request.reservation_time,
            request.people.unwrap_or(DEFAULT_PEOPLE),
        )
        .await?)
    }

    /// Staff status change; timestamps stamped in the repository
    pub async fn update_status(
        &self,
        department_id: i64,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        self.get(department_id, reservation_id).await?;
        reservation_repo::update_status(&self.pool, reservation_id, status)
            .await?
            .ok_or_else(|| reservation_not_found(reservation_id))
    }
}

fn reservation_not_found(reservation_id: i64) -> AppError {
    AppError::not_found(format!("Reservation {reservation_id} not found"))
}
