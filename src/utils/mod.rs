//! Shared utilities: error types, response envelope, logging, time.

pub mod error;
pub mod logger;
pub mod time;

pub use error::{ApiError, ApiResponse, AppError, AppResult, ok};
pub use logger::{init_logger, init_logger_with_file};
pub use time::now_millis;
