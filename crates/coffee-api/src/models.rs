use coffee_catalog::{Coffee, Event, Flavor};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 分页查询参数
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// 事件查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// 口味响应
#[derive(Debug, Serialize)]
pub struct FlavorResponse {
    pub id: Option<i32>,
    pub name: String,
}

impl From<Flavor> for FlavorResponse {
    fn from(flavor: Flavor) -> Self {
        Self {
            id: flavor.id,
            name: flavor.name,
        }
    }
}

/// 咖啡响应
#[derive(Debug, Serialize)]
pub struct CoffeeResponse {
    pub id: Option<i32>,
    pub name: String,
    pub brand: String,
    pub recommendations: i32,
    pub flavors: Vec<FlavorResponse>,
}

impl From<Coffee> for CoffeeResponse {
    fn from(coffee: Coffee) -> Self {
        Self {
            id: coffee.id,
            name: coffee.name,
            brand: coffee.brand,
            recommendations: coffee.recommendations,
            flavors: coffee.flavors.into_iter().map(FlavorResponse::from).collect(),
        }
    }
}

/// 事件响应
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: Option<i32>,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: JsonValue,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            event_type: event.event_type,
            payload: event.payload,
        }
    }
}

/// 分页响应
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub limit: u64,
    pub offset: u64,
}
