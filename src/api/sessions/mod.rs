//! Guest Session API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let public = Router::new()
        .route("/api/{dept}/sessions/start", post(handler::start))
        .route("/api/{dept}/sessions/{id}", get(handler::get_by_id))
        .route("/api/{dept}/sessions/code/{code}", get(handler::get_by_code));

    let admin = Router::new()
        .route("/api/{dept}/admin/sessions", get(handler::list))
        .route(
            "/api/{dept}/admin/sessions/{id}/assign-table",
            patch(handler::assign_table),
        )
        .route("/api/{dept}/admin/sessions/{id}/close", patch(handler::close))
        .route("/api/{dept}/admin/sessions/{id}/reopen", patch(handler::reopen))
        .route("/api/{dept}/admin/sessions/{id}", delete(handler::delete));

    public.merge(admin)
}
