//! Department (tenant) Model

use serde::{Deserialize, Serialize};

/// Department entity — the tenant root. Every other entity is owned by
/// exactly one department and must never be read or written across
/// department boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    /// URL slug (e.g. "cs", "design")
    pub slug: String,
    pub name: String,
    pub active: bool,
    pub created_at: i64,
}
