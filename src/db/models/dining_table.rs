//! Dining Table Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity (桌台)
///
/// `code` is unique per department. Layout coordinates are opaque to the
/// core — the floor-plan editor owns their meaning.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: i64,
    pub department_id: i64,
    pub code: String,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub pos_x: Option<i64>,
    pub pos_y: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub active: bool,
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub pos_x: Option<i64>,
    pub pos_y: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Update dining table payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    #[validate(length(min = 1, max = 20))]
    pub code: Option<String>,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub pos_x: Option<i64>,
    pub pos_y: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub active: Option<bool>,
}

/// Bulk layout save — position/size patches only
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayoutRequest {
    pub tables: Vec<TableLayoutItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayoutItem {
    pub id: i64,
    pub pos_x: Option<i64>,
    pub pos_y: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}
