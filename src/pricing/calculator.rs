//! Price breakdown calculation

use serde::Serialize;

use crate::db::models::{OrderItem, PricingSettings};

/// The five-field result of a price calculation.
///
/// Invariant: `total == max(0, subtotal + table_fee + corkage + discount)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: i64,
    pub table_fee: i64,
    pub corkage: i64,
    /// Signed; negative reduces the total
    pub discount: i64,
    pub total: i64,
}

/// Compute the breakdown for a list of item snapshots.
///
/// - `table_fee` comes straight from settings; whether it is actually
///   charged (first order of a session only) is the orchestrator's call.
/// - `corkage` is reserved and always 0.
/// - `discount` sums every rule whose `condition` equals the supplied
///   code exactly (case-sensitive). Positive amounts are legal input and
///   simply raise the total.
pub fn calculate(
    items: &[OrderItem],
    pricing: &PricingSettings,
    discount_code: Option<&str>,
) -> PriceBreakdown {
    let subtotal = calculate_subtotal(items);
    let table_fee = pricing.table_fee;
    let corkage = 0;
    let discount = calculate_discount(pricing, discount_code);

    let total = (subtotal + table_fee + corkage + discount).max(0);

    PriceBreakdown {
        subtotal,
        table_fee,
        corkage,
        discount,
        total,
    }
}

/// Sum of `price * quantity` over the items
pub fn calculate_subtotal(items: &[OrderItem]) -> i64 {
    items.iter().map(OrderItem::subtotal).sum()
}

fn calculate_discount(pricing: &PricingSettings, discount_code: Option<&str>) -> i64 {
    let Some(code) = discount_code.filter(|c| !c.is_empty()) else {
        return 0;
    };

    pricing
        .discounts
        .iter()
        .filter(|rule| rule.condition.as_deref() == Some(code))
        .map(|rule| rule.amount)
        .sum()
}
