use crate::recommend::RecommendationTransaction;
use crate::repository::{
    CoffeeRepository, DataSource, FlavorRepository, SeaCoffeeRepository, SeaDataSource,
    SeaFlavorRepository,
};
use crate::{CatalogError, Coffee, CreateCoffee, Event, Flavor, Pagination, Result, UpdateCoffee};
use futures::future::try_join_all;
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// 咖啡服务
///
/// 负责咖啡的增删改查、口味归一化，以及推荐事务
pub struct CoffeeService {
    /// 咖啡仓库
    coffees: Arc<dyn CoffeeRepository>,

    /// 口味仓库
    flavors: Arc<dyn FlavorRepository>,

    /// 推荐事务
    recommendation: RecommendationTransaction,
}

impl CoffeeService {
    /// 由显式注入的仓库创建
    pub fn new(
        coffees: Arc<dyn CoffeeRepository>,
        flavors: Arc<dyn FlavorRepository>,
        data_source: Arc<dyn DataSource>,
    ) -> Self {
        Self {
            coffees,
            flavors,
            recommendation: RecommendationTransaction::new(data_source),
        }
    }

    /// 基于同一个数据库连接池创建 SeaORM 实现
    pub fn from_connection(db: Arc<DatabaseConnection>) -> Self {
        info!("Coffee service created");
        Self::new(
            Arc::new(SeaCoffeeRepository::new(db.clone())),
            Arc::new(SeaFlavorRepository::new(db.clone())),
            Arc::new(SeaDataSource::new(db)),
        )
    }

    /// 列出咖啡（附带口味）
    ///
    /// 不限制 `limit` 上限，由调用方负责截断
    pub async fn list(&self, pagination: Pagination) -> Result<Vec<Coffee>> {
        self.coffees.find(pagination).await
    }

    /// 获取咖啡
    ///
    /// # 错误
    /// * `NotFound` - 咖啡不存在
    pub async fn get(&self, id: i32) -> Result<Coffee> {
        self.coffees
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// 创建咖啡
    ///
    /// 不存在的口味会随咖啡一起创建
    pub async fn create(&self, input: CreateCoffee) -> Result<Coffee> {
        let flavors = self.preload_flavors(&input.flavors).await?;
        let coffee = self.coffees.create(input.name, input.brand, flavors);
        let coffee = self.coffees.save(coffee).await?;

        info!(coffee_id = ?coffee.id, coffee_name = %coffee.name, "Coffee created");
        Ok(coffee)
    }

    /// 更新咖啡，只覆盖请求中给出的字段
    ///
    /// # 错误
    /// * `NotFound` - 咖啡不存在
    pub async fn update(&self, id: i32, input: UpdateCoffee) -> Result<Coffee> {
        let flavors = match &input.flavors {
            Some(names) => Some(self.preload_flavors(names).await?),
            None => None,
        };

        let mut coffee = self.get(id).await?;
        if let Some(name) = input.name {
            coffee.name = name;
        }
        if let Some(brand) = input.brand {
            coffee.brand = brand;
        }
        if let Some(flavors) = flavors {
            coffee.flavors = flavors;
        }

        let coffee = self.coffees.save(coffee).await?;
        info!(coffee_id = id, "Coffee updated");
        Ok(coffee)
    }

    /// 删除咖啡，关联的口味保留
    ///
    /// # 错误
    /// * `NotFound` - 咖啡不存在
    pub async fn delete(&self, id: i32) -> Result<()> {
        let coffee = self.get(id).await?;
        self.coffees.remove(&coffee).await?;

        info!(coffee_id = id, "Coffee deleted");
        Ok(())
    }

    /// 推荐咖啡，见 [`RecommendationTransaction::recommend`]
    pub async fn recommend(&self, coffee: &mut Coffee) -> Result<Event> {
        self.recommendation.recommend(coffee).await
    }

    // ========== 私有辅助方法 ==========

    /// 并发解析全部口味名称，同一请求内的重复名称只保留第一次出现
    async fn preload_flavors(&self, names: &[String]) -> Result<Vec<Flavor>> {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect();

        try_join_all(unique.into_iter().map(|name| self.preload_flavor_by_name(name))).await
    }

    /// 查找已有口味，不存在时构造一个未保存的新口味
    ///
    /// 并发请求可能各自构造同名口味，最终产生重名行；这里不加锁。
    async fn preload_flavor_by_name(&self, name: &str) -> Result<Flavor> {
        if let Some(existing) = self.flavors.find_by_name(name).await? {
            return Ok(existing);
        }

        debug!(flavor_name = %name, "Flavor not found, will be created with coffee");
        Ok(self.flavors.create(name))
    }
}
