//! Guest Session Model

use serde::{Deserialize, Serialize};

/// How a guest entered the venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Reservation,
    Qr,
    Code,
}

/// Session lifecycle state. Transitions: create → ACTIVE,
/// ACTIVE → CLOSED (`close`), CLOSED → ACTIVE (`reopen`). Nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Active,
    Closed,
}

/// Guest session entity — one continuous visit, linking zero-or-more
/// orders to a table / reservation / entry code.
///
/// Invariants (enforced by unique indexes, see migrations):
/// - at most one ACTIVE session per (department, table)
/// - at most one session per reservation
/// - session codes unique per department
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GuestSession {
    pub id: i64,
    pub department_id: i64,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub reservation_id: Option<i64>,
    pub table_id: Option<i64>,
    pub session_code: Option<String>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub people: Option<i64>,
    pub status: SessionStatus,
    pub created_at: i64,
    pub closed_at: Option<i64>,
}

/// Start-session payload. Which fields are required depends on `type`:
/// RESERVATION needs `reservationId`, QR needs `tableId`, CODE takes an
/// optional `sessionCode` (generated when absent). Explicit guest fields
/// override anything inherited from a reservation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub reservation_id: Option<i64>,
    pub table_id: Option<i64>,
    pub session_code: Option<String>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub people: Option<i64>,
}

/// Assign-table payload; `tableId: null` clears the assignment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTableRequest {
    pub table_id: Option<i64>,
}
