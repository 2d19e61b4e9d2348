
use coffee_catalog::{
    CatalogError, CoffeeService, CreateCoffee, EventFilter, EventRecorder, FlavorFilter,
    FlavorRepository, Pagination, SeaEventRecorder, SeaFlavorRepository, UpdateCoffee,
};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::sync::Arc;
use test_helpers::create_test_db;

struct Fixture {
    db: Arc<DatabaseConnection>,
    service: CoffeeService,
    events: SeaEventRecorder,
    flavors: SeaFlavorRepository,
}

async fn create_fixture() -> Fixture {
    let db = Arc::new(create_test_db().await);
    Fixture {
        service: CoffeeService::from_connection(db.clone()),
        events: SeaEventRecorder::new(db.clone()),
        flavors: SeaFlavorRepository::new(db.clone()),
        db,
    }
}

fn create_input(name: &str, brand: &str, flavors: &[&str]) -> CreateCoffee {
    CreateCoffee {
        name: name.to_string(),
        brand: brand.to_string(),
        flavors: flavors.iter().map(|f| f.to_string()).collect(),
    }
}

/// 测试咖啡完整生命周期
#[tokio::test]
async fn test_coffee_lifecycle() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    // 1. 创建
    let created = service
        .create(create_input("A", "B", &["x", "y"]))
        .await
        .unwrap();
    let id = created.id.unwrap();

    // 2. 查询
    let found = service.get(id).await.unwrap();
    assert_eq!(found.recommendations, 0);
    let mut names = found.flavor_names();
    names.sort();
    assert_eq!(names, vec!["x", "y"]);

    // 3. 部分更新
    let updated = service
        .update(
            id,
            UpdateCoffee {
                name: Some("C".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "C");
    assert_eq!(updated.brand, "B");
    assert_eq!(updated.flavors, found.flavors);

    // 4. 删除
    service.delete(id).await.unwrap();
    assert!(matches!(service.get(id).await, Err(CatalogError::NotFound(_))));

    // 5. 口味保留
    for flavor in &found.flavors {
        let kept = fixture
            .flavors
            .find_by_id(flavor.id.unwrap())
            .await
            .unwrap();
        assert_eq!(kept.as_ref().map(|f| f.name.as_str()), Some(flavor.name.as_str()));
    }
}

/// 不存在的 ID 一律返回 NotFound
#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    service.create(create_input("A", "B", &[])).await.unwrap();

    for id in [0, 2, 1000, -1] {
        assert!(service.get(id).await.unwrap_err().is_not_found());
        assert!(service
            .update(id, UpdateCoffee::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(id).await.unwrap_err().is_not_found());
    }
}

/// 两次创建共享新口味，都引用名为 x 的口味
#[tokio::test]
async fn test_shared_new_flavor() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    let (first, second) = tokio::join!(
        service.create(create_input("A", "B", &["x"])),
        service.create(create_input("C", "D", &["x"])),
    );
    let first = first.unwrap();
    let second = second.unwrap();

    assert!(service.get(first.id.unwrap()).await.unwrap().has_flavor("x"));
    assert!(service.get(second.id.unwrap()).await.unwrap().has_flavor("x"));

    // 并发创建允许产生重名口味行
    let rows = fixture
        .flavors
        .find(FlavorFilter {
            name: Some("x".to_string()),
        })
        .await
        .unwrap();
    assert!(!rows.is_empty() && rows.len() <= 2);

    // 顺序创建复用已有的行
    let third = service.create(create_input("E", "F", &["x"])).await.unwrap();
    assert_eq!(third.flavors[0].id, rows[0].id);
}

/// 推荐一次：计数加一，追加一条事件
#[tokio::test]
async fn test_recommend_appends_event() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    let mut coffee = service.create(create_input("A", "B", &["x"])).await.unwrap();
    let event = service.recommend(&mut coffee).await.unwrap();

    assert_eq!(coffee.recommendations, 1);
    assert_eq!(event.coffee_id(), coffee.id);

    let stored = service.get(coffee.id.unwrap()).await.unwrap();
    assert_eq!(stored.recommendations, 1);
    assert_eq!(stored.flavors, coffee.flavors);

    let events = fixture.events.find(EventFilter::default()).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "recommend_event");
    assert_eq!(events[0].event_type, "coffee");
    assert_eq!(events[0].coffee_id(), coffee.id);
}

/// 写事件失败时整体回滚
#[tokio::test]
async fn test_recommend_rolls_back_when_event_fails() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    let mut coffee = service.create(create_input("A", "B", &[])).await.unwrap();
    service.recommend(&mut coffee).await.unwrap();

    // 删除事件表，使事件写入失败
    fixture
        .db
        .execute_unprepared("DROP TABLE events")
        .await
        .unwrap();

    let result = service.recommend(&mut coffee).await;
    assert!(matches!(result, Err(CatalogError::TransactionFailure(_))));
    assert_eq!(coffee.recommendations, 1);

    let stored = service.get(coffee.id.unwrap()).await.unwrap();
    assert_eq!(stored.recommendations, 1);
}

/// 事件在咖啡删除后仍然保留
#[tokio::test]
async fn test_events_survive_coffee_deletion() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    let mut coffee = service.create(create_input("A", "B", &[])).await.unwrap();
    service.recommend(&mut coffee).await.unwrap();
    service.delete(coffee.id.unwrap()).await.unwrap();

    let events = fixture.events.find(EventFilter::default()).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].coffee_id(), coffee.id);
}

/// 列表分页
#[tokio::test]
async fn test_list_pagination() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    for i in 0..4 {
        service
            .create(create_input(&format!("Roast {}", i), "B", &["x"]))
            .await
            .unwrap();
    }

    let page = service.list(Pagination::new(2, 2)).await.unwrap();
    let names: Vec<&str> = page.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Roast 2", "Roast 3"]);
    assert!(page.iter().all(|c| c.has_flavor("x")));

    let empty = service.list(Pagination::new(10, 10)).await.unwrap();
    assert!(empty.is_empty());
}

/// 超出 i64 范围的分页参数按最大值处理
#[tokio::test]
async fn test_list_with_oversized_pagination() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    let mut coffee = service.create(create_input("A", "B", &["x"])).await.unwrap();
    service.recommend(&mut coffee).await.unwrap();

    let skipped = service
        .list(Pagination {
            limit: Some(1),
            offset: Some(u64::MAX),
        })
        .await
        .unwrap();
    assert!(skipped.is_empty());

    let all = service
        .list(Pagination {
            limit: Some(u64::MAX),
            offset: None,
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    let events = fixture
        .events
        .find(EventFilter {
            offset: Some(u64::MAX),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(events.is_empty());

    let events = fixture
        .events
        .find(EventFilter {
            limit: Some(u64::MAX),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
}

/// 计数已达上限时拒绝推荐，不写事件
#[tokio::test]
async fn test_recommend_at_counter_limit() {
    let fixture = create_fixture().await;
    let service = &fixture.service;

    let coffee = service.create(create_input("A", "B", &[])).await.unwrap();
    let id = coffee.id.unwrap();
    fixture
        .db
        .execute_unprepared(&format!(
            "UPDATE coffees SET recommendations = {} WHERE id = {}",
            i32::MAX,
            id
        ))
        .await
        .unwrap();

    let mut coffee = service.get(id).await.unwrap();
    assert_eq!(coffee.recommendations, i32::MAX);

    let result = service.recommend(&mut coffee).await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));
    assert_eq!(coffee.recommendations, i32::MAX);

    let stored = service.get(id).await.unwrap();
    assert_eq!(stored.recommendations, i32::MAX);
    assert!(fixture
        .events
        .find(EventFilter::default())
        .await
        .unwrap()
        .is_empty());
}
