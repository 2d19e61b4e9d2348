use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coffee_catalog::CatalogError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API 错误类型
#[derive(Debug, Error)]
pub enum ApiError {
    /// 咖啡未找到
    #[error("{0}")]
    NotFound(String),
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// 请求错误
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// 数据库错误
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

// 从 coffee_catalog::CatalogError 转换
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::Validation(msg) => ApiError::ValidationError(msg),
            CatalogError::TransactionFailure(_) => ApiError::InternalError(err.to_string()),
            CatalogError::Database(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
