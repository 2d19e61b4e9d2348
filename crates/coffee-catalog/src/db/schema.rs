use super::{coffee, coffee_flavor, event, flavor};
use crate::Result;
use sea_orm::sea_query::{Index, IndexCreateStatement, TableCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

/// 设置数据库表结构
///
/// 表结构由实体定义生成，可重复执行
pub async fn setup_schema(db: &DatabaseConnection) -> Result<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // 关联表的外键依赖 coffees 与 flavors，需先建
    let tables: [TableCreateStatement; 4] = [
        create_table(&schema, coffee::Entity),
        create_table(&schema, flavor::Entity),
        create_table(&schema, coffee_flavor::Entity),
        create_table(&schema, event::Entity),
    ];
    for table in &tables {
        db.execute(backend.build(table)).await?;
    }

    db.execute(backend.build(&event_name_type_index())).await?;

    info!("Database schema created");
    Ok(())
}

fn create_table<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    stmt
}

/// 事件按 (name, type) 过滤
fn event_name_type_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_events_name_type")
        .table(event::Entity)
        .col(event::Column::Name)
        .col(event::Column::EventType)
        .if_not_exists()
        .to_owned()
}
