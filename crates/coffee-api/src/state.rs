use crate::error::{ApiError, Result};
use coffee_catalog::{CoffeeService, EventRecorder, SeaEventRecorder};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 分页限制
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    /// 未指定 limit 时的默认条数
    pub default_page_size: u64,
    /// limit 上限
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl PageLimits {
    /// 补全并截断 limit
    pub fn clamp(&self, limit: Option<u64>) -> u64 {
        limit
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }

    /// 列表接口共用：拒绝 `limit=0`，其余补全并截断
    pub fn resolve(&self, limit: Option<u64>) -> Result<u64> {
        if limit == Some(0) {
            return Err(ApiError::BadRequest(
                "limit must be a positive number".to_string(),
            ));
        }
        Ok(self.clamp(limit))
    }
}

/// API 应用状态
#[derive(Clone)]
pub struct AppState {
    /// 咖啡服务
    pub coffee_service: Arc<CoffeeService>,
    /// 事件记录器
    pub events: Arc<dyn EventRecorder>,
    /// 分页限制
    pub page_limits: PageLimits,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        coffee_service: Arc<CoffeeService>,
        events: Arc<dyn EventRecorder>,
        page_limits: PageLimits,
    ) -> Self {
        Self {
            coffee_service,
            events,
            page_limits,
        }
    }

    /// 基于同一个数据库连接池创建
    pub fn from_connection(db: Arc<DatabaseConnection>, page_limits: PageLimits) -> Self {
        Self::new(
            Arc::new(CoffeeService::from_connection(db.clone())),
            Arc::new(SeaEventRecorder::new(db)),
            page_limits,
        )
    }
}
