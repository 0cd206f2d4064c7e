//! 服务器状态 - 持有所有服务的单例引用
//!
//! ServerState 在启动时构建一次，随后以浅拷贝方式注入到 axum 路由。
//! 所有服务内部持有同一个连接池，Clone 成本极低。

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    NotificationService, OrderService, ReservationService, SessionService, SettingsService,
    SmsService, TableService,
};
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub tables: TableService,
    pub sessions: SessionService,
    pub orders: OrderService,
    pub reservations: ReservationService,
    pub settings: SettingsService,
    pub notifications: NotificationService,
    pub sms: SmsService,
}

impl ServerState {
    /// 初始化: 打开数据库 (自动迁移) 并装配服务
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            crate::utils::AppError::internal(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            ))
        })?;

        let db = DbService::new(&config.database_path()).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// Assemble services around an already-open database (tests hand in
    /// their own temp-file pool).
    pub fn with_db(config: Config, db: DbService) -> Self {
        let pool = db.pool.clone();
        let settings = SettingsService::new(pool.clone());
        let notifications = NotificationService::new();
        let sms = SmsService::new();

        Self {
            tables: TableService::new(pool.clone()),
            sessions: SessionService::new(pool.clone()),
            orders: OrderService::new(
                pool.clone(),
                settings.clone(),
                notifications.clone(),
                sms.clone(),
            ),
            reservations: ReservationService::new(pool, settings.clone()),
            settings,
            notifications,
            sms,
            config,
            db,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
