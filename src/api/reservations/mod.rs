//! Reservation API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/{dept}/reservations", post(handler::create))
        .route("/api/{dept}/admin/reservations", get(handler::list))
        .route(
            "/api/{dept}/admin/reservations/{id}/status",
            patch(handler::update_status),
        )
}
