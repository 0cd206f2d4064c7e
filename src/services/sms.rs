//! SMS / Receipt Sending
//!
//! Outbound text messages through a per-department gateway. The gateway
//! is tenant-configurable and may be unconfigured, in which case sends
//! are no-ops that report success. Failures are logged and reported as
//! `false` — they never propagate to the operation that triggered them.

use chrono::Local;

use crate::db::models::{Order, OrderItem, SmsSettings};

const GATEWAY_URL: &str = "https://apis.aligo.in/send/";

#[derive(Clone)]
pub struct SmsService {
    client: reqwest::Client,
}

impl Default for SmsService {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Send a text message. Returns whether the gateway accepted it.
    pub async fn send(&self, settings: &SmsSettings, phone: &str, message: &str) -> bool {
        if !settings.is_configured() {
            tracing::debug!(phone = %phone, "SMS gateway not configured, skipping send");
            return true;
        }

        let params = [
            ("key", settings.api_key.as_str()),
            ("user_id", settings.user_id.as_str()),
            ("sender", settings.sender_number.as_str()),
            ("receiver", phone),
            ("msg", message),
        ];

        match self.client.post(GATEWAY_URL).form(&params).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(phone = %phone, "SMS sent");
                true
            }
            Ok(response) => {
                tracing::warn!(phone = %phone, status = %response.status(), "SMS gateway rejected message");
                false
            }
            Err(e) => {
                tracing::warn!(phone = %phone, error = %e, "SMS send failed");
                false
            }
        }
    }

    /// Payment-confirmation receipt for an order
    pub async fn send_payment_confirmation(
        &self,
        settings: &SmsSettings,
        order: &Order,
        items: &[OrderItem],
        phone: &str,
    ) -> bool {
        let message = build_receipt(order, items);
        self.send(settings, phone, &message).await
    }
}

/// Build the receipt text: line items, fees, total, timestamp
pub fn build_receipt(order: &Order, items: &[OrderItem]) -> String {
    let mut lines = vec!["[주문 영수증]".to_string()];
    for item in items {
        lines.push(format!(
            "{} x{} = {}원",
            item.name,
            item.quantity,
            item.subtotal()
        ));
    }
    lines.push(format!("소계: {}원", order.subtotal));
    if order.table_fee != 0 {
        lines.push(format!("테이블비: {}원", order.table_fee));
    }
    if order.discount != 0 {
        lines.push(format!("할인: {}원", order.discount));
    }
    lines.push(format!("합계: {}원", order.total_price));
    lines.push(Local::now().format("%Y-%m-%d %H:%M").to_string());
    lines.join("\n")
}
