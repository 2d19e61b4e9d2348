use thiserror::Error;

/// 咖啡目录错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 咖啡未找到
    #[error("Coffee #{0} not found")]
    NotFound(i32),

    /// 推荐事务失败（已回滚）
    #[error("Transaction failed: {0}")]
    TransactionFailure(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    Validation(String),

    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// 咖啡目录结果类型
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// 创建验证错误
    pub fn validation(msg: impl Into<String>) -> Self {
        CatalogError::Validation(msg.into())
    }

    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
