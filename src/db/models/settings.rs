//! Department Settings
//!
//! Strongly-typed settings document, stored as one JSON text row per
//! department. Every field has an explicit default, and writes go through
//! the typed structure — a replace with arbitrary JSON is rejected at
//! deserialization time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentSettings {
    pub pricing: PricingSettings,
    pub sms: SmsSettings,
    /// ISO-8601 timestamps of reservation slots staff have closed
    pub reservation_closed: Vec<String>,
}

/// 가격 정책 — flat table fee, reserved corkage, discount rules
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingSettings {
    /// Flat fee charged once per session (first order only)
    pub table_fee: i64,
    /// Reserved — never populated by current rules
    pub corkage: i64,
    pub discounts: Vec<DiscountRule>,
}

/// One discount line. `amount` is signed; negative reduces the total.
/// `condition` is the code guests must supply for the rule to apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountRule {
    pub label: Option<String>,
    pub amount: i64,
    pub condition: Option<String>,
}

/// Per-department SMS gateway credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsSettings {
    pub enabled: bool,
    pub provider: String,
    pub api_key: String,
    pub user_id: String,
    pub sender_number: String,
}

impl Default for SmsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "aligo".to_string(),
            api_key: String::new(),
            user_id: String::new(),
            sender_number: String::new(),
        }
    }
}

impl SmsSettings {
    /// Unconfigured gateways make sends a successful no-op
    pub fn is_configured(&self) -> bool {
        self.enabled
            && !self.api_key.is_empty()
            && !self.user_id.is_empty()
            && !self.sender_number.is_empty()
    }
}
