//! Order Orchestrator
//!
//! Order creation (item snapshotting + pricing in one transaction), the
//! order/payment state pair, and the post-commit side effects (bus
//! notifications, receipt SMS). Side effects run strictly after commit
//! and never fail the operation.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::db::models::{
    Department, Order, OrderCreateRequest, OrderDto, OrderItem, OrderStatus, OrderUpdateRequest,
    PaymentStatus, SendReceiptRequest,
};
use crate::db::repository::{
    RepoError, dining_table as table_repo, guest_session as session_repo, menu as menu_repo,
    order as order_repo, reservation as reservation_repo,
};
use crate::pricing;
use crate::services::{NotificationService, SettingsService, SmsService};
use crate::utils::error::codes;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    settings: SettingsService,
    notifications: NotificationService,
    sms: SmsService,
}

impl OrderService {
    pub fn new(
        pool: SqlitePool,
        settings: SettingsService,
        notifications: NotificationService,
        sms: SmsService,
    ) -> Self {
        Self {
            pool,
            settings,
            notifications,
            sms,
        }
    }

    /// 下单 — snapshot the items, price the order, persist atomically,
    /// then notify the admin and kitchen feeds.
    pub async fn create_order(
        &self,
        department: &Department,
        request: &OrderCreateRequest,
    ) -> AppResult<OrderDto> {
        if request.items.is_empty() {
            return Err(AppError::business(
                codes::EMPTY_ITEMS,
                "An order needs at least one item",
            ));
        }

        let pricing_settings = self.settings.pricing(department.id).await?;

        // Session context: table / reservation / phone are denormalized
        // onto the order at creation time.
        let session = match request.session_id {
            Some(session_id) => Some(
                session_repo::find_by_id(&self.pool, session_id)
                    .await?
                    .filter(|s| s.department_id == department.id)
                    .ok_or_else(|| {
                        AppError::not_found(format!("Session {session_id} not found"))
                    })?,
            ),
            None => None,
        };

        let reservation_id = request
            .reservation_id
            .or(session.as_ref().and_then(|s| s.reservation_id));

        let mut new_order = order_repo::NewOrder {
            department_id: department.id,
            session_id: request.session_id,
            table_id: session.as_ref().and_then(|s| s.table_id),
            reservation_id,
            guest_phone: request.guest_phone.clone(),
            note: request.note.clone(),
        };
        // Phone precedence: request, then session, then the reservation
        // the order references (directly or through its session)
        if new_order.guest_phone.is_none() {
            new_order.guest_phone = session.as_ref().and_then(|s| s.guest_phone.clone());
        }
        if new_order.guest_phone.is_none()
            && let Some(reservation_id) = reservation_id
        {
            new_order.guest_phone = reservation_repo::find_by_id(&self.pool, reservation_id)
                .await?
                .filter(|r| r.department_id == department.id)
                .map(|r| r.phone);
        }

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        // The fee decision must precede the shell insert, which would
        // otherwise count as the session's "first order" itself.
        let charge_table_fee = match request.session_id {
            Some(session_id) => {
                request.include_table_fee.unwrap_or(true)
                    && !order_repo::exists_by_session(&mut *tx, session_id).await?
            }
            None => false,
        };

        let order = order_repo::insert_shell(&mut *tx, &new_order).await?;

        let mut items = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let (menu_id, name, price) = match item.menu_id {
                Some(menu_id) => {
                    match menu_repo::find_by_id(&mut *tx, department.id, menu_id).await? {
                        Some(menu) => (Some(menu_id), menu.name, menu.price),
                        // Stale cart: the entry vanished since the guest
                        // loaded the menu. Order with the fields the
                        // client sent instead of failing the whole cart.
                        None => (
                            Some(menu_id),
                            item.name
                                .clone()
                                .filter(|n| !n.is_empty())
                                .unwrap_or_else(|| "Unknown item".to_string()),
                            item.price.unwrap_or(0),
                        ),
                    }
                }
                None => {
                    let name = item.name.as_deref().filter(|n| !n.is_empty());
                    match (name, item.price) {
                        (Some(name), Some(price)) => (None, name.to_string(), price),
                        _ => {
                            return Err(AppError::validation(
                                "Each item needs a menuId, or an explicit name and price",
                            ));
                        }
                    }
                }
            };
            items.push(
                order_repo::insert_item(&mut *tx, order.id, menu_id, &name, price, item.quantity)
                    .await?,
            );
        }

        let mut effective = pricing_settings;
        if !charge_table_fee {
            effective.table_fee = 0;
        }
        let breakdown = pricing::calculate(&items, &effective, request.discount_code.as_deref());

        let order = order_repo::update_totals(
            &mut *tx,
            order.id,
            breakdown.subtotal,
            breakdown.table_fee,
            breakdown.corkage,
            breakdown.discount,
            breakdown.total,
        )
        .await?;

        tx.commit().await.map_err(RepoError::from)?;

        self.notifications.notify_new_order(&department.slug, &order);
        self.notifications
            .notify_kitchen(&department.slug, &order, "NEW_ORDER");

        self.to_dto(order, items).await
    }

    pub async fn get(&self, department_id: i64, order_id: i64) -> AppResult<OrderDto> {
        let order = self.load(department_id, order_id).await?;
        let items = order_repo::items_by_order(&self.pool, order.id).await?;
        self.to_dto(order, items).await
    }

    /// List a department's orders newest-first, items and table codes
    /// attached in two batch queries.
    pub async fn list(
        &self,
        department_id: i64,
        status: Option<OrderStatus>,
    ) -> AppResult<Vec<OrderDto>> {
        let orders = order_repo::list(&self.pool, department_id, status).await?;
        self.to_dtos(orders).await
    }

    pub async fn list_by_session(
        &self,
        department_id: i64,
        session_id: i64,
    ) -> AppResult<Vec<OrderDto>> {
        let session = session_repo::find_by_id(&self.pool, session_id)
            .await?
            .filter(|s| s.department_id == department_id)
            .ok_or_else(|| AppError::not_found(format!("Session {session_id} not found")))?;
        let orders = order_repo::list_by_session(&self.pool, session.id).await?;
        self.to_dtos(orders).await
    }

    /// Staff patch of the status pair. Confirming payment while the order
    /// still sits at PENDING auto-advances it to PREPARING.
    pub async fn update(
        &self,
        department: &Department,
        order_id: i64,
        request: &OrderUpdateRequest,
    ) -> AppResult<OrderDto> {
        let current = self.load(department.id, order_id).await?;

        let mut status = request.status.unwrap_or(current.status);
        let payment_status = request.payment_status.unwrap_or(current.payment_status);
        if payment_status == PaymentStatus::Confirmed && status == OrderStatus::Pending {
            status = OrderStatus::Preparing;
        }

        let order =
            order_repo::update_payment_status(&self.pool, order_id, payment_status, status)
                .await?
                .ok_or_else(|| order_not_found(order_id))?;

        self.notifications
            .notify_order_status_changed(&department.slug, &order);
        if order.status != current.status
            && let Some(action) = kitchen_action(order.status)
        {
            self.notifications
                .notify_kitchen(&department.slug, &order, action);
        }

        let newly_confirmed = order.payment_status == PaymentStatus::Confirmed
            && current.payment_status != PaymentStatus::Confirmed;
        if newly_confirmed {
            self.notifications.notify_payment_confirmed(&order);
            self.notifications
                .notify_kitchen(&department.slug, &order, "PAYMENT_CONFIRMED");
            self.send_receipt_in_background(department.id, &order).await;
        }

        let items = order_repo::items_by_order(&self.pool, order.id).await?;
        self.to_dto(order, items).await
    }

    /// 取消订单 — CANCELLED plus payment FAILED in one write
    pub async fn cancel(&self, department: &Department, order_id: i64) -> AppResult<OrderDto> {
        self.load(department.id, order_id).await?;

        let order = order_repo::update_payment_status(
            &self.pool,
            order_id,
            PaymentStatus::Failed,
            OrderStatus::Cancelled,
        )
        .await?
        .ok_or_else(|| order_not_found(order_id))?;

        self.notifications
            .notify_order_status_changed(&department.slug, &order);
        self.notifications
            .notify_kitchen(&department.slug, &order, "CANCELLED");

        let items = order_repo::items_by_order(&self.pool, order.id).await?;
        self.to_dto(order, items).await
    }

    /// Explicit receipt resend. Unlike the automatic one this reports
    /// whether the gateway accepted the message.
    pub async fn send_receipt(
        &self,
        department_id: i64,
        order_id: i64,
        request: &SendReceiptRequest,
    ) -> AppResult<bool> {
        let order = self.load(department_id, order_id).await?;
        let phone = request
            .phone
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(order.guest_phone.as_deref())
            .ok_or_else(|| AppError::validation("No phone number on the order or the request"))?
            .to_string();

        let items = order_repo::items_by_order(&self.pool, order.id).await?;
        let sms_settings = self.settings.get(department_id).await?.sms;
        Ok(self
            .sms
            .send_payment_confirmation(&sms_settings, &order, &items, &phone)
            .await)
    }

    async fn load(&self, department_id: i64, order_id: i64) -> AppResult<Order> {
        order_repo::find_by_id(&self.pool, order_id)
            .await?
            .filter(|o| o.department_id == department_id)
            .ok_or_else(|| order_not_found(order_id))
    }

    /// Automatic receipt after payment confirmation. Detached so the
    /// admin request never waits on (or fails with) the gateway.
    async fn send_receipt_in_background(&self, department_id: i64, order: &Order) {
        let Some(phone) = order.guest_phone.clone() else {
            return;
        };
        let items = match order_repo::items_by_order(&self.pool, order.id).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(order_id = order.id, error = %e, "Skipping receipt, items unreadable");
                return;
            }
        };
        let sms_settings = match self.settings.get(department_id).await {
            Ok(settings) => settings.sms,
            Err(e) => {
                tracing::warn!(order_id = order.id, error = %e, "Skipping receipt, settings unreadable");
                return;
            }
        };
        let sms = self.sms.clone();
        let order = order.clone();
        tokio::spawn(async move {
            sms.send_payment_confirmation(&sms_settings, &order, &items, &phone)
                .await;
        });
    }

    async fn to_dto(&self, order: Order, items: Vec<OrderItem>) -> AppResult<OrderDto> {
        let table_code = match order.table_id {
            Some(table_id) => table_repo::find_by_id(&self.pool, table_id)
                .await?
                .map(|t| t.code),
            None => None,
        };
        Ok(OrderDto {
            order,
            items,
            table_code,
        })
    }

    async fn to_dtos(&self, orders: Vec<Order>) -> AppResult<Vec<OrderDto>> {
        let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for item in order_repo::items_by_orders(&self.pool, &order_ids).await? {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let table_ids: Vec<i64> = {
            let mut ids: Vec<i64> = orders.iter().filter_map(|o| o.table_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let table_codes: HashMap<i64, String> = table_repo::find_by_ids(&self.pool, &table_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t.code))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                let table_code = order.table_id.and_then(|id| table_codes.get(&id).cloned());
                OrderDto {
                    order,
                    items,
                    table_code,
                }
            })
            .collect())
    }
}

fn order_not_found(order_id: i64) -> AppError {
    AppError::not_found(format!("Order {order_id} not found"))
}

/// Kitchen feed actions exist only for the states the kitchen acts on
fn kitchen_action(status: OrderStatus) -> Option<&'static str> {
    match status {
        OrderStatus::Preparing => Some("PREPARE"),
        OrderStatus::Done => Some("DONE"),
        OrderStatus::Pending | OrderStatus::Cancelled => None,
    }
}
