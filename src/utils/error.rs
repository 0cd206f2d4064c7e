//! 统一错误处理
//!
//! Application-level error type and the response envelope:
//! - [`AppError`] - error enum, mapped to stable `(status, code, message)` triples
//! - [`ApiResponse`] - `{data, error}` envelope used by every endpoint
//!
//! Business-rule violations carry a stable machine-readable code
//! (`TABLE_OCCUPIED`, `SESSION_EXISTS`, ...) so clients can branch on them
//! without parsing messages. Database and internal errors are logged and
//! collapsed to generic responses — internals never leak to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Stable business error codes surfaced to clients.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION: &str = "VALIDATION";
    pub const EMPTY_ITEMS: &str = "EMPTY_ITEMS";
    pub const RESERVATION_REQUIRED: &str = "RESERVATION_REQUIRED";
    pub const TABLE_REQUIRED: &str = "TABLE_REQUIRED";
    pub const SESSION_EXISTS: &str = "SESSION_EXISTS";
    pub const TABLE_OCCUPIED: &str = "TABLE_OCCUPIED";
    pub const INVALID_TABLE: &str = "INVALID_TABLE";
    pub const DUPLICATE_CODE: &str = "DUPLICATE_CODE";
    pub const SLOT_CLOSED: &str = "SLOT_CLOSED";
    pub const CODE_EXHAUSTED: &str = "CODE_EXHAUSTED";
    pub const DATABASE: &str = "DATABASE";
    pub const INTERNAL: &str = "INTERNAL";
}

/// API 统一响应结构
///
/// ```json
/// { "data": { ... }, "error": null }
/// { "data": null, "error": { "code": "TABLE_OCCUPIED", "message": "..." } }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// Error half of the envelope
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 资源不存在 (404) — also raised for cross-tenant ids
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 验证失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 业务规则违反 (400) — carries a stable code
    #[error("{message}")]
    Business { code: &'static str, message: String },

    /// 数据库错误 (500)
    #[error("Database error: {0}")]
    Database(String),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business(code: &'static str, msg: impl Into<String>) -> Self {
        Self::Business {
            code,
            message: msg.into(),
        }
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable code surfaced in the envelope
    pub fn code(&self) -> &str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION,
            AppError::Business { code, .. } => code,
            AppError::Database(_) => codes::DATABASE,
            AppError::Internal(_) => codes::INTERNAL,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, self.code(), msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, self.code(), msg.clone()),
            AppError::Business { code, message } => {
                (StatusCode::BAD_REQUEST, *code, message.clone())
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.code(),
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.code(),
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
                details: None,
            }),
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            // Unmapped unique violations are a programming error in the
            // calling service; surface as a database error.
            RepoError::Unique(msg) => AppError::Database(format!("unique violation: {msg}")),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type for handlers and services
pub type AppResult<T> = Result<T, AppError>;

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        data: Some(data),
        error: None,
    })
}
