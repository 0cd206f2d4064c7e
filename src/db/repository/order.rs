//! Order Repository

use super::RepoResult;
use crate::db::models::{Order, OrderItem, OrderStatus, PaymentStatus};
use crate::utils::now_millis;
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, department_id, session_id, table_id, reservation_id, guest_phone, \
                       note, subtotal, table_fee, corkage, discount, total_price, status, \
                       payment_status, created_at";

const ITEM_COLUMNS: &str = "id, order_id, menu_id, name, price, quantity, created_at";

/// Insert payload for the order shell (totals are zero until priced)
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub department_id: i64,
    pub session_id: Option<i64>,
    pub table_id: Option<i64>,
    pub reservation_id: Option<i64>,
    pub guest_phone: Option<String>,
    pub note: Option<String>,
}

/// Persist the order shell to obtain an id; items and totals follow
pub async fn insert_shell(ex: impl SqliteExecutor<'_>, data: &NewOrder) -> RepoResult<Order> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders \
         (department_id, session_id, table_id, reservation_id, guest_phone, note, \
          status, payment_status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, 'PENDING', 'PENDING', ?) RETURNING {COLUMNS}"
    ))
    .bind(data.department_id)
    .bind(data.session_id)
    .bind(data.table_id)
    .bind(data.reservation_id)
    .bind(&data.guest_phone)
    .bind(&data.note)
    .bind(now_millis())
    .fetch_one(ex)
    .await?;
    Ok(order)
}

/// Persist the computed price breakdown onto the order
pub async fn update_totals(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    subtotal: i64,
    table_fee: i64,
    corkage: i64,
    discount: i64,
    total_price: i64,
) -> RepoResult<Order> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET subtotal = ?1, table_fee = ?2, corkage = ?3, discount = ?4, \
         total_price = ?5 WHERE id = ?6 RETURNING {COLUMNS}"
    ))
    .bind(subtotal)
    .bind(table_fee)
    .bind(corkage)
    .bind(discount)
    .bind(total_price)
    .bind(id)
    .fetch_one(ex)
    .await?;
    Ok(order)
}

pub async fn find_by_id(ex: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(ex)
            .await?;
    Ok(order)
}

/// List a department's orders, newest first, optionally by status
pub async fn list(
    ex: impl SqliteExecutor<'_>,
    department_id: i64,
    status: Option<OrderStatus>,
) -> RepoResult<Vec<Order>> {
    let orders = match status {
        Some(status) => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {COLUMNS} FROM orders \
                 WHERE department_id = ? AND status = ? ORDER BY created_at DESC"
            ))
            .bind(department_id)
            .bind(status)
            .fetch_all(ex)
            .await?
        }
        None => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {COLUMNS} FROM orders WHERE department_id = ? ORDER BY created_at DESC"
            ))
            .bind(department_id)
            .fetch_all(ex)
            .await?
        }
    };
    Ok(orders)
}

pub async fn list_by_session(
    ex: impl SqliteExecutor<'_>,
    session_id: i64,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE session_id = ? ORDER BY created_at DESC"
    ))
    .bind(session_id)
    .fetch_all(ex)
    .await?;
    Ok(orders)
}

/// Whether the session already has at least one order (decides the table fee)
pub async fn exists_by_session(ex: impl SqliteExecutor<'_>, session_id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE session_id = ?")
        .bind(session_id)
        .fetch_one(ex)
        .await?;
    Ok(count > 0)
}

/// Single write for the status pair — the service always decides both
/// halves together.
pub async fn update_payment_status(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    payment_status: PaymentStatus,
    status: OrderStatus,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET payment_status = ?1, status = ?2 WHERE id = ?3 RETURNING {COLUMNS}"
    ))
    .bind(payment_status)
    .bind(status)
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(order)
}

// ========== Items ==========

/// Insert one immutable item snapshot
pub async fn insert_item(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    menu_id: Option<i64>,
    name: &str,
    price: i64,
    quantity: i64,
) -> RepoResult<OrderItem> {
    let item = sqlx::query_as::<_, OrderItem>(&format!(
        "INSERT INTO order_items (order_id, menu_id, name, price, quantity, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {ITEM_COLUMNS}"
    ))
    .bind(order_id)
    .bind(menu_id)
    .bind(name)
    .bind(price)
    .bind(quantity)
    .bind(now_millis())
    .fetch_one(ex)
    .await?;
    Ok(item)
}

pub async fn items_by_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY id"
    ))
    .bind(order_id)
    .fetch_all(ex)
    .await?;
    Ok(items)
}

/// Batch-load items for a set of orders (for DTO assembly)
pub async fn items_by_orders(
    ex: impl SqliteExecutor<'_>,
    order_ids: &[i64],
) -> RepoResult<Vec<OrderItem>> {
    if order_ids.is_empty() {
        return Ok(vec![]);
    }
    let placeholders = order_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id IN ({placeholders}) ORDER BY id"
    );
    let mut query = sqlx::query_as::<_, OrderItem>(&sql);
    for id in order_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(ex).await?)
}

// ========== Cascade deletes ==========
//
// Items go before orders, orders before the session. Callers hold the
// transaction.

pub async fn delete_items_by_session(
    ex: impl SqliteExecutor<'_>,
    session_id: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "DELETE FROM order_items WHERE order_id IN (SELECT id FROM orders WHERE session_id = ?)",
    )
    .bind(session_id)
    .execute(ex)
    .await?
    .rows_affected();
    Ok(rows)
}

pub async fn delete_by_session(ex: impl SqliteExecutor<'_>, session_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM orders WHERE session_id = ?")
        .bind(session_id)
        .execute(ex)
        .await?
        .rows_affected();
    Ok(rows)
}
