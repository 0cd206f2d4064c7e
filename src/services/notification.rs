//! Notification Gateway
//!
//! Process-wide broadcast bus for staff/guest feeds. Delivery is
//! at-most-once, fire-and-forget: a publish with no subscribers is a
//! success, and no failure here may ever surface to the operation that
//! triggered it. Publishers must call this strictly after their database
//! transaction has committed.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::db::models::Order;
use crate::utils::now_millis;

const BUS_CAPACITY: usize = 256;

/// One event on the bus; `topic` is what subscribers filter on
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusEvent {
    pub topic: String,
    pub payload: serde_json::Value,
    pub timestamp: i64,
}

/// Admin-feed order notification payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderNotification<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    order_id: i64,
    total_price: i64,
    status: crate::db::models::OrderStatus,
    payment_status: crate::db::models::PaymentStatus,
}

#[derive(Clone)]
pub struct NotificationService {
    tx: broadcast::Sender<BusEvent>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Subscribe to the bus (websocket bridges, tests)
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    /// Publish a payload to a topic, best-effort
    pub fn publish<T: Serialize>(&self, topic: impl Into<String>, payload: &T) {
        let topic = topic.into();
        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(topic = %topic, error = %e, "Dropping unserializable notification");
                return;
            }
        };
        // Err means no subscribers — fine for fire-and-forget
        let _ = self.tx.send(BusEvent {
            topic,
            payload,
            timestamp: now_millis(),
        });
    }

    /// 新订单 → 管理端订单流
    pub fn notify_new_order(&self, slug: &str, order: &Order) {
        tracing::info!(dept = %slug, order_id = order.id, "Sending new order notification");
        self.publish(
            format!("{slug}/orders"),
            &OrderNotification {
                kind: "NEW_ORDER",
                order_id: order.id,
                total_price: order.total_price,
                status: order.status,
                payment_status: order.payment_status,
            },
        );
    }

    pub fn notify_order_status_changed(&self, slug: &str, order: &Order) {
        self.publish(
            format!("{slug}/orders"),
            &OrderNotification {
                kind: "ORDER_STATUS_CHANGED",
                order_id: order.id,
                total_price: order.total_price,
                status: order.status,
                payment_status: order.payment_status,
            },
        );
    }

    /// Guest-facing payment confirmation, scoped to the single order
    pub fn notify_payment_confirmed(&self, order: &Order) {
        self.publish(
            format!("orders/{}", order.id),
            &serde_json::json!({
                "type": "PAYMENT_CONFIRMED",
                "orderId": order.id,
                "status": order.payment_status,
            }),
        );
    }

    /// Kitchen feed (NEW_ORDER / PREPARE / DONE / PAYMENT_CONFIRMED / CANCELLED)
    pub fn notify_kitchen(&self, slug: &str, order: &Order, action: &str) {
        self.publish(
            format!("{slug}/kitchen"),
            &serde_json::json!({
                "type": action,
                "orderId": order.id,
                "status": order.status,
            }),
        );
    }
}
