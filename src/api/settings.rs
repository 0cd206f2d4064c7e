//! Department Settings API (admin)

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::api::resolve_department;
use crate::core::ServerState;
use crate::db::models::DepartmentSettings;
use crate::utils::error::ApiResponse;
use crate::utils::{AppResult, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/{dept}/admin/settings",
        get(get_settings).put(update_settings),
    )
}

/// GET /api/{dept}/admin/settings
async fn get_settings(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
) -> AppResult<Json<ApiResponse<DepartmentSettings>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.settings.get(department.id).await?))
}

/// PUT /api/{dept}/admin/settings - typed replace of the whole document
async fn update_settings(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Json(payload): Json<DepartmentSettings>,
) -> AppResult<Json<ApiResponse<DepartmentSettings>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.settings.update(department.id, &payload).await?))
}
