//! Dining Table API 模块 (admin)

mod handler;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/{dept}/admin/tables",
            get(handler::list).post(handler::create),
        )
        .route("/api/{dept}/admin/tables/layout", put(handler::update_layout))
        .route(
            "/api/{dept}/admin/tables/{id}",
            patch(handler::update).delete(handler::delete),
        )
}
