//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//!
//! # 错误码规范
//!
//! | 前缀 | 分类 | 示例 |
//! |------|------|------|
//! | E0xxx | 通用错误 | E0003 资源不存在 |
//! | E4xxx | 交易错误 | E4001 数量非法 |
//! | E5xxx | 支付错误 | E5001 金额非法 |
//! | E9xxx | 系统错误 | E9001 内部错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::NotFound("Transaction txn-1".to_string()))
//!
//! // 处理器直接用 `?` 传播 CheckoutError
//! let snapshot = state.checkout.get(&id)?;
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ApiResponse;
use tracing::error;

use crate::checkout::CheckoutError;
use crate::pricing::PricingError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Invalid quantity: {0}")]
    /// 数量非法 (400)
    InvalidQuantity(String),

    #[error("Invalid amount: {0}")]
    /// 金额非法 (400)
    InvalidAmount(String),

    #[error("Resource conflict: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("Business rule violation: {0}")]
    /// 业务规则违反 (422)
    BusinessRule(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Internal error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    /// 获取错误码与 HTTP 状态
    pub fn code_and_status(&self) -> (&'static str, StatusCode) {
        match self {
            Self::NotFound(_) => ("E0003", StatusCode::NOT_FOUND),
            Self::Validation(_) => ("E0002", StatusCode::BAD_REQUEST),
            Self::InvalidQuantity(_) => ("E4001", StatusCode::BAD_REQUEST),
            Self::InvalidAmount(_) => ("E5001", StatusCode::BAD_REQUEST),
            Self::Conflict(_) => ("E0004", StatusCode::CONFLICT),
            Self::BusinessRule(_) => ("E0005", StatusCode::UNPROCESSABLE_ENTITY),
            Self::Internal(_) => ("E9001", StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidInput(msg) => AppError::Validation(msg),
            PricingError::InvalidQuantity(msg) => AppError::InvalidQuantity(msg),
            PricingError::InvalidAmount(msg) => AppError::InvalidAmount(msg),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Pricing(e) => e.into(),
            CheckoutError::TransactionNotFound(id) => {
                AppError::NotFound(format!("Transaction {}", id))
            }
            CheckoutError::ItemNotFound(id) => AppError::NotFound(format!("Item {}", id)),
            CheckoutError::ProductNotFound(id) => AppError::NotFound(format!("Product {}", id)),
            CheckoutError::CustomerNotFound(id) => AppError::NotFound(format!("Customer {}", id)),
            CheckoutError::TransactionAlreadyCompleted(id) => {
                AppError::Conflict(format!("Transaction already completed: {}", id))
            }
            CheckoutError::InvalidOperation(msg) => AppError::BusinessRule(msg),
            CheckoutError::SubmitFailed(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, status) = self.code_and_status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = ApiResponse::<()>::error(code, self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
