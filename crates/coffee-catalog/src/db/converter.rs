use crate::{Coffee, Event, Flavor};
use sea_orm::ActiveValue::{NotSet, Set};

/// Coffee 模型与数据库实体的转换（不含口味关联）
impl From<&Coffee> for super::coffee::ActiveModel {
    fn from(coffee: &Coffee) -> Self {
        Self {
            id: coffee.id.map_or(NotSet, Set),
            name: Set(coffee.name.clone()),
            brand: Set(coffee.brand.clone()),
            recommendations: Set(coffee.recommendations),
        }
    }
}

impl Coffee {
    /// 由数据库行和已加载的口味组装
    pub(crate) fn from_model(model: super::coffee::Model, flavors: Vec<Flavor>) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            brand: model.brand,
            recommendations: model.recommendations,
            flavors,
        }
    }
}

/// Flavor 模型与数据库实体的转换
impl From<&Flavor> for super::flavor::ActiveModel {
    fn from(flavor: &Flavor) -> Self {
        Self {
            id: flavor.id.map_or(NotSet, Set),
            name: Set(flavor.name.clone()),
        }
    }
}

impl From<super::flavor::Model> for Flavor {
    fn from(model: super::flavor::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
        }
    }
}

/// Event 模型与数据库实体的转换
impl From<Event> for super::event::ActiveModel {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.map_or(NotSet, Set),
            name: Set(event.name),
            event_type: Set(event.event_type),
            payload: Set(event.payload),
        }
    }
}

impl From<super::event::Model> for Event {
    fn from(model: super::event::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            event_type: model.event_type,
            payload: model.payload,
        }
    }
}
