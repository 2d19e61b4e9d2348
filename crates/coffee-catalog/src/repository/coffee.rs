use super::{paginate, CoffeeRepository};
use crate::db::{coffee, coffee_flavor, flavor};
use crate::{CatalogError, Coffee, Flavor, Pagination, Result};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// 基于 SeaORM 的咖啡仓库
pub struct SeaCoffeeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaCoffeeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CoffeeRepository for SeaCoffeeRepository {
    async fn find(&self, pagination: Pagination) -> Result<Vec<Coffee>> {
        let query = paginate(
            coffee::Entity::find().order_by_asc(coffee::Column::Id),
            pagination.limit,
            pagination.offset,
        );

        let models = query.all(&*self.db).await?;
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut flavors = load_flavors(&*self.db, &ids).await?;

        let coffees: Vec<Coffee> = models
            .into_iter()
            .map(|m| {
                let joined = flavors.remove(&m.id).unwrap_or_default();
                Coffee::from_model(m, joined)
            })
            .collect();

        debug!(count = coffees.len(), "Coffees listed from database");
        Ok(coffees)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Coffee>> {
        find_coffee(&*self.db, id).await
    }

    async fn save(&self, coffee: Coffee) -> Result<Coffee> {
        // 咖啡行、新口味与关联行一起提交；出错时事务随 drop 回滚
        let txn = self.db.begin().await?;
        let saved = persist_coffee(&txn, &coffee).await?;
        txn.commit().await?;

        info!(
            coffee_id = ?saved.id,
            coffee_name = %saved.name,
            flavors = saved.flavors.len(),
            "Coffee saved"
        );
        Ok(saved)
    }

    async fn remove(&self, coffee: &Coffee) -> Result<()> {
        let id = coffee
            .id
            .ok_or_else(|| CatalogError::validation("Cannot remove a coffee that was never saved"))?;

        let txn = self.db.begin().await?;
        coffee_flavor::Entity::delete_many()
            .filter(coffee_flavor::Column::CoffeeId.eq(id))
            .exec(&txn)
            .await?;
        let result = coffee::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound(id));
        }
        txn.commit().await?;

        info!(coffee_id = id, "Coffee removed");
        Ok(())
    }
}

/// 按 ID 读取咖啡并附带口味
pub(crate) async fn find_coffee<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Coffee>> {
    let Some(model) = coffee::Entity::find_by_id(id).one(conn).await? else {
        debug!(coffee_id = id, "Coffee not found");
        return Ok(None);
    };

    let mut flavors = load_flavors(conn, &[id]).await?;
    let joined = flavors.remove(&id).unwrap_or_default();
    Ok(Some(Coffee::from_model(model, joined)))
}

/// 写入咖啡行，级联插入未保存的口味，并重写关联表
///
/// 同一次保存中同名的新口味只插入一行；`conn` 可以是连接也可以是事务。
pub(crate) async fn persist_coffee<C: ConnectionTrait>(conn: &C, coffee: &Coffee) -> Result<Coffee> {
    let active_model: coffee::ActiveModel = coffee.into();
    let model = match coffee.id {
        Some(id) => match active_model.update(conn).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                return Err(CatalogError::NotFound(id))
            }
            Err(e) => return Err(e.into()),
        },
        None => active_model.insert(conn).await?,
    };

    let mut inserted: HashMap<String, Flavor> = HashMap::new();
    let mut seen: HashSet<i32> = HashSet::new();
    let mut flavors = Vec::with_capacity(coffee.flavors.len());

    for flavor in &coffee.flavors {
        let persisted = match flavor.id {
            Some(_) => flavor.clone(),
            None => match inserted.get(&flavor.name) {
                Some(existing) => existing.clone(),
                None => {
                    let active_model: flavor::ActiveModel = flavor.into();
                    let created = Flavor::from(active_model.insert(conn).await?);
                    debug!(flavor_id = ?created.id, flavor_name = %created.name, "Flavor created");
                    inserted.insert(created.name.clone(), created.clone());
                    created
                }
            },
        };

        if let Some(flavor_id) = persisted.id {
            if seen.insert(flavor_id) {
                flavors.push(persisted);
            }
        }
    }

    coffee_flavor::Entity::delete_many()
        .filter(coffee_flavor::Column::CoffeeId.eq(model.id))
        .exec(conn)
        .await?;

    let links: Vec<coffee_flavor::ActiveModel> = flavors
        .iter()
        .filter_map(|f| f.id)
        .map(|flavor_id| coffee_flavor::ActiveModel {
            coffee_id: sea_orm::Set(model.id),
            flavor_id: sea_orm::Set(flavor_id),
        })
        .collect();
    if !links.is_empty() {
        coffee_flavor::Entity::insert_many(links)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(Coffee::from_model(model, flavors))
}

/// 批量加载口味，按咖啡 ID 分组，组内按口味 ID 升序
pub(crate) async fn load_flavors<C: ConnectionTrait>(
    conn: &C,
    coffee_ids: &[i32],
) -> Result<HashMap<i32, Vec<Flavor>>> {
    if coffee_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = coffee_flavor::Entity::find()
        .filter(coffee_flavor::Column::CoffeeId.is_in(coffee_ids.iter().copied()))
        .order_by_asc(coffee_flavor::Column::FlavorId)
        .all(conn)
        .await?;
    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let flavor_ids: BTreeSet<i32> = links.iter().map(|l| l.flavor_id).collect();
    let flavors: HashMap<i32, Flavor> = flavor::Entity::find()
        .filter(flavor::Column::Id.is_in(flavor_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, Flavor::from(m)))
        .collect();

    let mut grouped: HashMap<i32, Vec<Flavor>> = HashMap::new();
    for link in links {
        if let Some(flavor) = flavors.get(&link.flavor_id) {
            grouped.entry(link.coffee_id).or_default().push(flavor.clone());
        }
    }
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::setup_schema;
    use sea_orm::{Database, PaginatorTrait};

    async fn create_test_repository() -> (Arc<DatabaseConnection>, SeaCoffeeRepository) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        setup_schema(&db).await.unwrap();
        let db = Arc::new(db);
        (db.clone(), SeaCoffeeRepository::new(db))
    }

    fn roast(flavors: &[&str]) -> Coffee {
        Coffee::new(
            "Shipwreck Roast".to_string(),
            "Buddy Brew".to_string(),
            flavors.iter().map(|name| Flavor::new(*name)).collect(),
        )
    }

    #[tokio::test]
    async fn test_save_inserts_coffee_and_flavors() {
        let (db, repository) = create_test_repository().await;

        let saved = repository.save(roast(&["chocolate", "vanilla"])).await.unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.recommendations, 0);
        assert!(saved.flavors.iter().all(Flavor::is_persisted));
        assert_eq!(flavor::Entity::find().count(&*db).await.unwrap(), 2);
        assert_eq!(coffee_flavor::Entity::find().count(&*db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_collapses_repeated_new_flavor() {
        let (db, repository) = create_test_repository().await;

        let saved = repository.save(roast(&["caramel", "caramel"])).await.unwrap();

        assert_eq!(saved.flavor_names(), vec!["caramel"]);
        assert_eq!(flavor::Entity::find().count(&*db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_existing_rewrites_links() {
        let (db, repository) = create_test_repository().await;

        let mut saved = repository.save(roast(&["chocolate", "vanilla"])).await.unwrap();
        saved.flavors.retain(|f| f.name == "vanilla");
        saved.name = "Renamed Roast".to_string();
        let updated = repository.save(saved.clone()).await.unwrap();

        assert_eq!(updated.id, saved.id);
        let found = repository.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed Roast");
        assert_eq!(found.flavor_names(), vec!["vanilla"]);
        // 解除关联的口味不会被删除
        assert_eq!(flavor::Entity::find().count(&*db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_missing_id_is_not_found() {
        let (_db, repository) = create_test_repository().await;

        let mut ghost = roast(&[]);
        ghost.id = Some(404);
        let result = repository.save(ghost).await;

        assert!(matches!(result, Err(CatalogError::NotFound(404))));
    }

    #[tokio::test]
    async fn test_find_with_pagination() {
        let (_db, repository) = create_test_repository().await;

        for i in 0..5 {
            let mut coffee = roast(&["nutty"]);
            coffee.name = format!("Roast {}", i);
            repository.save(coffee).await.unwrap();
        }

        let page = repository.find(Pagination::new(2, 1)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Roast 1");
        assert_eq!(page[1].name, "Roast 2");
        assert!(page.iter().all(|c| c.has_flavor("nutty")));

        let tail = repository
            .find(Pagination {
                limit: None,
                offset: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(tail.len(), 2);

        let all = repository.find(Pagination::default()).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn test_remove_keeps_flavors() {
        let (db, repository) = create_test_repository().await;

        let saved = repository.save(roast(&["chocolate"])).await.unwrap();
        repository.remove(&saved).await.unwrap();

        assert!(repository.find_by_id(saved.id.unwrap()).await.unwrap().is_none());
        assert_eq!(coffee_flavor::Entity::find().count(&*db).await.unwrap(), 0);
        assert_eq!(flavor::Entity::find().count(&*db).await.unwrap(), 1);
    }
}
