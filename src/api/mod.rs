//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`sessions`] - 게스트 세션 (public + admin)
//! - [`orders`] - 订单 (public + admin)
//! - [`tables`] - 桌台管理 (admin)
//! - [`reservations`] - 예약 (public + admin)
//! - [`settings`] - 部门设置 (admin)
//! - [`menu`] - 公开菜单
//!
//! Every route except `/api/health` lives under `/api/{dept}` where
//! `{dept}` is the department slug. Handlers resolve the slug to a
//! department row first; an unknown or inactive slug is NOT_FOUND.

pub mod health;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod sessions;
pub mod settings;
pub mod tables;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::db::models::Department;
use crate::db::repository::department as department_repo;
use crate::utils::{AppError, AppResult};

/// Assemble all routers
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(sessions::router())
        .merge(orders::router())
        .merge(tables::router())
        .merge(reservations::router())
        .merge(settings::router())
        .merge(menu::router())
}

/// Router plus the middleware stack, ready to serve
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Resolve the `{dept}` path segment to its department row
pub(crate) async fn resolve_department(
    state: &ServerState,
    slug: &str,
) -> AppResult<Department> {
    department_repo::find_by_slug(state.pool(), slug)
        .await?
        .filter(|d| d.active)
        .ok_or_else(|| AppError::not_found(format!("Department '{slug}' not found")))
}
