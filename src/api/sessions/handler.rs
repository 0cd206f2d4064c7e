//! Guest Session API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::resolve_department;
use crate::core::ServerState;
use crate::db::models::{AssignTableRequest, GuestSession, SessionStatus, StartSessionRequest};
use crate::utils::error::ApiResponse;
use crate::utils::{AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<SessionStatus>,
}

/// POST /api/{dept}/sessions/start - 세션 시작
pub async fn start(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Json(payload): Json<StartSessionRequest>,
) -> AppResult<Json<ApiResponse<GuestSession>>> {
    let department = resolve_department(&state, &dept).await?;
    let session = state.sessions.start_session(department.id, &payload).await?;
    Ok(ok(session))
}

/// GET /api/{dept}/sessions/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<GuestSession>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.sessions.get(department.id, id).await?))
}

/// GET /api/{dept}/sessions/code/{code}
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path((dept, code)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<GuestSession>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.sessions.get_by_code(department.id, &code).await?))
}

/// GET /api/{dept}/admin/sessions?status= - 세션 목록
pub async fn list(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<GuestSession>>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.sessions.list(department.id, query.status).await?))
}

/// PATCH /api/{dept}/admin/sessions/{id}/assign-table - 테이블 배정
pub async fn assign_table(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
    Json(payload): Json<AssignTableRequest>,
) -> AppResult<Json<ApiResponse<GuestSession>>> {
    let department = resolve_department(&state, &dept).await?;
    let session = state
        .sessions
        .assign_table(department.id, id, payload.table_id)
        .await?;
    Ok(ok(session))
}

/// PATCH /api/{dept}/admin/sessions/{id}/close
pub async fn close(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<GuestSession>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.sessions.close(department.id, id).await?))
}

/// PATCH /api/{dept}/admin/sessions/{id}/reopen
pub async fn reopen(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<GuestSession>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.sessions.reopen(department.id, id).await?))
}

/// DELETE /api/{dept}/admin/sessions/{id} - 세션과 주문 전체 삭제
pub async fn delete(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let department = resolve_department(&state, &dept).await?;
    state.sessions.delete(department.id, id).await?;
    Ok(ok(true))
}
