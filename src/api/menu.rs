//! Public Menu API

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::api::resolve_department;
use crate::core::ServerState;
use crate::db::models::Menu;
use crate::db::repository::menu as menu_repo;
use crate::utils::error::ApiResponse;
use crate::utils::{AppResult, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/{dept}/menu", get(list))
}

/// GET /api/{dept}/menu - 公开菜单 (active 항목만)
async fn list(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Menu>>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(menu_repo::list_active(state.pool(), department.id).await?))
}
