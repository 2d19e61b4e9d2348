use super::{paginate, EventRecorder};
use crate::db::event;
use crate::{Event, EventFilter, Result};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use tracing::{debug, info};

/// 基于 SeaORM 的事件记录器
pub struct SeaEventRecorder {
    db: Arc<DatabaseConnection>,
}

impl SeaEventRecorder {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRecorder for SeaEventRecorder {
    async fn record(&self, event: Event) -> Result<Event> {
        insert_event(&*self.db, event).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Event>> {
        let model = event::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(model.map(Event::from))
    }

    async fn find(&self, filter: EventFilter) -> Result<Vec<Event>> {
        let mut query = event::Entity::find();

        if let Some(name) = &filter.name {
            query = query.filter(event::Column::Name.eq(name.as_str()));
        }
        if let Some(event_type) = &filter.event_type {
            query = query.filter(event::Column::EventType.eq(event_type.as_str()));
        }

        let query = paginate(
            query.order_by_asc(event::Column::Id),
            filter.limit,
            filter.offset,
        );

        let events: Vec<Event> = query
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Event::from)
            .collect();

        debug!(count = events.len(), "Events listed from database");
        Ok(events)
    }
}

/// 追加一条事件，`conn` 可以是事务
pub(crate) async fn insert_event<C: ConnectionTrait>(conn: &C, event: Event) -> Result<Event> {
    let mut active_model: event::ActiveModel = event.into();
    // 事件只追加，忽略调用方给出的 ID
    active_model.id = sea_orm::ActiveValue::NotSet;

    let recorded = Event::from(active_model.insert(conn).await?);
    info!(
        event_id = ?recorded.id,
        event_name = %recorded.name,
        event_type = %recorded.event_type,
        "Event recorded"
    );
    Ok(recorded)
}
