//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let public = Router::new()
        .route("/api/{dept}/orders", post(handler::create))
        .route("/api/{dept}/orders/{id}", get(handler::get_by_id))
        .route(
            "/api/{dept}/sessions/{id}/orders",
            get(handler::list_by_session),
        );

    let admin = Router::new()
        .route("/api/{dept}/admin/orders", get(handler::list))
        .route("/api/{dept}/admin/orders/{id}", patch(handler::update))
        .route("/api/{dept}/admin/orders/{id}/cancel", post(handler::cancel))
        .route(
            "/api/{dept}/admin/orders/{id}/send-receipt",
            post(handler::send_receipt),
        );

    public.merge(admin)
}
