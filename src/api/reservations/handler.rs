//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::api::resolve_department;
use crate::core::ServerState;
use crate::db::models::{
    Reservation, ReservationCreateRequest, ReservationStatus, ReservationStatusRequest,
};
use crate::utils::error::ApiResponse;
use crate::utils::{AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<ReservationStatus>,
}

/// POST /api/{dept}/reservations - 예약 생성
pub async fn create(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Json(payload): Json<ReservationCreateRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    payload.validate()?;
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state
        .reservations
        .create(department.id, &payload)
        .await?))
}

/// GET /api/{dept}/admin/reservations?status= - 예약 목록
pub async fn list(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state
        .reservations
        .list(department.id, query.status)
        .await?))
}

/// PATCH /api/{dept}/admin/reservations/{id}/status - 상태 변경
pub async fn update_status(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
    Json(payload): Json<ReservationStatusRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state
        .reservations
        .update_status(department.id, id, payload.status)
        .await?))
}
