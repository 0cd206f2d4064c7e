//! Reservation Model

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Waiting,
    Seated,
    Done,
    Cancelled,
}

/// Reservation entity — a booking request whose contact info sessions
/// and orders may inherit.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub department_id: i64,
    pub name: String,
    pub phone: String,
    /// ISO-8601 local datetime, matched verbatim against closed slots
    pub reservation_time: String,
    pub people: i64,
    pub status: ReservationStatus,
    pub seated_at: Option<i64>,
    pub finished_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreateRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    pub reservation_time: String,
    pub people: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusRequest {
    pub status: ReservationStatus,
}
