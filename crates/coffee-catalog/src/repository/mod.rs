//! 持久化边界
//!
//! 服务层只依赖这里的 trait；`Sea*` 实现基于 SeaORM。单个实体的 `save`
//! 自身是原子的，同一个 [`UnitOfWork`] 内保存的全部实体一起提交或回滚。

mod coffee;
mod event;
mod flavor;
mod unit_of_work;

pub use coffee::SeaCoffeeRepository;
pub use event::SeaEventRecorder;
pub use flavor::SeaFlavorRepository;
pub use unit_of_work::{SeaDataSource, SeaUnitOfWork};

use crate::{Coffee, Event, EventFilter, Flavor, FlavorFilter, Pagination, Result};
use async_trait::async_trait;
use sea_orm::QuerySelect;

/// 驱动按 i64 绑定 LIMIT/OFFSET
const MAX_BOUND: u64 = i64::MAX as u64;

/// 为查询加上 LIMIT/OFFSET，超过 `i64::MAX` 的值按 `i64::MAX` 处理
///
/// SQLite 不接受没有 LIMIT 的 OFFSET，只给 offset 时补一个最大 LIMIT。
pub(crate) fn paginate<Q: QuerySelect>(query: Q, limit: Option<u64>, offset: Option<u64>) -> Q {
    let mut query = query;
    if let Some(offset) = offset {
        query = query.offset(offset.min(MAX_BOUND));
    }
    match limit {
        Some(limit) => query.limit(limit.min(MAX_BOUND)),
        None if offset.is_some() => query.limit(MAX_BOUND),
        None => query,
    }
}

/// 口味仓库
#[async_trait]
pub trait FlavorRepository: Send + Sync {
    /// 按 ID 查询
    async fn find_by_id(&self, id: i32) -> Result<Option<Flavor>>;

    /// 按名称精确查询，存在同名记录时返回 ID 最小的一条
    async fn find_by_name(&self, name: &str) -> Result<Option<Flavor>>;

    /// 按条件列出
    async fn find(&self, filter: FlavorFilter) -> Result<Vec<Flavor>>;

    /// 构造内存中的新口味，随所属咖啡保存时才落库
    fn create(&self, name: &str) -> Flavor {
        Flavor::new(name)
    }
}

/// 咖啡仓库
#[async_trait]
pub trait CoffeeRepository: Send + Sync {
    /// 分页列出，附带口味
    async fn find(&self, pagination: Pagination) -> Result<Vec<Coffee>>;

    /// 按 ID 查询，附带口味
    async fn find_by_id(&self, id: i32) -> Result<Option<Coffee>>;

    /// 构造内存中的新咖啡
    fn create(&self, name: String, brand: String, flavors: Vec<Flavor>) -> Coffee {
        Coffee::new(name, brand, flavors)
    }

    /// 插入或更新，同时级联保存新口味并重写关联
    async fn save(&self, coffee: Coffee) -> Result<Coffee>;

    /// 立即删除咖啡及其关联，口味保留
    async fn remove(&self, coffee: &Coffee) -> Result<()>;
}

/// 事件记录器（只追加）
#[async_trait]
pub trait EventRecorder: Send + Sync {
    async fn record(&self, event: Event) -> Result<Event>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Event>>;

    async fn find(&self, filter: EventFilter) -> Result<Vec<Event>>;
}

/// 事务数据源，每次 `begin` 占用一个独立连接
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}

/// 显式事务句柄
///
/// 未提交即被丢弃的事务会回滚并释放连接。
#[async_trait]
pub trait UnitOfWork: Send {
    async fn save_coffee(&mut self, coffee: &Coffee) -> Result<Coffee>;

    async fn save_event(&mut self, event: Event) -> Result<Event>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}
