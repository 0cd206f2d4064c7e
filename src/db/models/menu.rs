//! Menu Model
//!
//! Catalog entries are read-only inside this core: order creation
//! snapshots name/price from here, and the public menu endpoint lists
//! them. Catalog administration lives outside.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i64,
    pub department_id: i64,
    pub category: Option<String>,
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub sold_out: bool,
    pub active: bool,
}
