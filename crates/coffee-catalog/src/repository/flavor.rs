use super::FlavorRepository;
use crate::db::flavor;
use crate::{Flavor, FlavorFilter, Result};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::debug;

/// 基于 SeaORM 的口味仓库
pub struct SeaFlavorRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaFlavorRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FlavorRepository for SeaFlavorRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Flavor>> {
        let model = flavor::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(model.map(Flavor::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Flavor>> {
        let model = flavor::Entity::find()
            .filter(flavor::Column::Name.eq(name))
            .order_by_asc(flavor::Column::Id)
            .one(&*self.db)
            .await?;

        debug!(flavor_name = %name, found = model.is_some(), "Flavor looked up by name");
        Ok(model.map(Flavor::from))
    }

    async fn find(&self, filter: FlavorFilter) -> Result<Vec<Flavor>> {
        let mut query = flavor::Entity::find();
        if let Some(name) = &filter.name {
            query = query.filter(flavor::Column::Name.eq(name.as_str()));
        }

        let models = query.order_by_asc(flavor::Column::Id).all(&*self.db).await?;
        Ok(models.into_iter().map(Flavor::from).collect())
    }
}
