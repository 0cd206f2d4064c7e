//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::resolve_department;
use crate::core::ServerState;
use crate::db::models::{
    OrderCreateRequest, OrderDto, OrderStatus, OrderUpdateRequest, SendReceiptRequest,
};
use crate::utils::error::ApiResponse;
use crate::utils::{AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub sent: bool,
}

/// POST /api/{dept}/orders - 下单
pub async fn create(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Json(payload): Json<OrderCreateRequest>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    payload.validate()?;
    let department = resolve_department(&state, &dept).await?;
    let order = state.orders.create_order(&department, &payload).await?;
    Ok(ok(order))
}

/// GET /api/{dept}/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.orders.get(department.id, id).await?))
}

/// GET /api/{dept}/sessions/{id}/orders - 세션의 주문 내역
pub async fn list_by_session(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<Vec<OrderDto>>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.orders.list_by_session(department.id, id).await?))
}

/// GET /api/{dept}/admin/orders?status= - 订单列表
pub async fn list(
    State(state): State<ServerState>,
    Path(dept): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<OrderDto>>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.orders.list(department.id, query.status).await?))
}

/// PATCH /api/{dept}/admin/orders/{id} - 状态/支付状态变更
pub async fn update(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
    Json(payload): Json<OrderUpdateRequest>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.orders.update(&department, id, &payload).await?))
}

/// POST /api/{dept}/admin/orders/{id}/cancel - 取消订单
pub async fn cancel(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    let department = resolve_department(&state, &dept).await?;
    Ok(ok(state.orders.cancel(&department, id).await?))
}

/// POST /api/{dept}/admin/orders/{id}/send-receipt - 영수증 재전송
pub async fn send_receipt(
    State(state): State<ServerState>,
    Path((dept, id)): Path<(String, i64)>,
    Json(payload): Json<SendReceiptRequest>,
) -> AppResult<Json<ApiResponse<ReceiptResponse>>> {
    let department = resolve_department(&state, &dept).await?;
    let sent = state
        .orders
        .send_receipt(department.id, id, &payload)
        .await?;
    Ok(ok(ReceiptResponse { sent }))
}
