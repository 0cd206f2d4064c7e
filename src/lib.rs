//! Venue Server - 场馆点餐后端
//!
//! # 架构概述
//!
//! 单租户部门 (department) 为边界的点餐系统后端：
//!
//! - **游客会话** (`services/session`): 예약/QR/코드 三种入座方式
//! - **订单** (`services/order`): 下单、定价、状态机、取消
//! - **定价** (`pricing`): 小计 + 桌费 + 折扣，总额下限 0
//! - **预约** (`services/reservation`): 预约与关闭时段
//! - **通知** (`services/notification`): 进程内广播总线
//! - **HTTP API** (`api`): RESTful 接口, `/api/{dept}/...`
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、启动
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 会话、订单、预约、设置、通知、短信
//! ├── pricing/       # 价格计算
//! ├── db/            # 数据库层 (模型 + 仓储)
//! └── utils/         # 错误、日志、时间
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use pricing::PriceBreakdown;
pub use utils::{ApiResponse, AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};
