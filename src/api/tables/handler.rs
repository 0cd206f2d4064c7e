//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::resolve_department;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableLayoutRequest};
use crate::utils::error::ApiResponse;
use crate::utils::{AppResult, ok};

/// GET /api/{dept}/admin/tables - 获取所有桌台
pub async fn list(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.tables.list(department.id).await?))
}

/// POST /api/{dept}/admin/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    payload.validate()?;
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.tables.create(department.id, &payload).await?))
}

/// PATCH /api/{dept}/admin/tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.tables.update(department.id, id, &payload).await?))
}

/// DELETE /api/{dept}/admin/tables/{id} - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.tables.delete(department.id, id).await?))
}

/// PUT /api/{dept}/admin/tables/layout - 批量保存布局
pub async fn update_layout(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Json(payload): Json<TableLayoutRequest>,
) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state
        .tables
        .update_layout(department.id, &payload)
        .await?))
}
