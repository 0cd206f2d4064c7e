//! Order Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kitchen-side order state. Staff may set any status at any time; the
/// core does not block transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Done,
    Cancelled,
}

/// Payment state, reported by staff (not verified). CONFIRMED while the
/// order is still PENDING auto-advances the order to PREPARING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Failed,
    NotRequired,
}

/// Order entity
///
/// `table_id` / `reservation_id` are denormalized copies taken from the
/// session at creation time. Money invariant:
/// `total_price == max(0, subtotal + table_fee + corkage + discount)`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub department_id: i64,
    pub session_id: Option<i64>,
    pub table_id: Option<i64>,
    pub reservation_id: Option<i64>,
    pub guest_phone: Option<String>,
    pub note: Option<String>,
    /// 菜品小计 (不含桌费/折扣)
    pub subtotal: i64,
    pub table_fee: i64,
    pub corkage: i64,
    /// Discount amount (negative reduces the total)
    pub discount: i64,
    pub total_price: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: i64,
}

/// Order item — immutable snapshot of name/price at order time. Later
/// catalog edits must not alter historical orders.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_id: Option<i64>,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub created_at: i64,
}

impl OrderItem {
    pub fn subtotal(&self) -> i64 {
        self.price * self.quantity
    }
}

/// Create order payload. Each item either references a menu id (current
/// name/price snapshotted) or supplies an explicit manual name+price.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
    pub session_id: Option<i64>,
    pub reservation_id: Option<i64>,
    pub discount_code: Option<String>,
    pub guest_phone: Option<String>,
    pub note: Option<String>,
    /// Default true; ignored for anything but the first order of a session
    pub include_table_fee: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<i64>,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Admin order patch — status and/or payment status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateRequest {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceiptRequest {
    /// Falls back to the phone stored on the order
    pub phone: Option<String>,
}

/// Order plus its items and the table code, for list/detail responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub table_code: Option<String>,
}
