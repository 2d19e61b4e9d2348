use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// 推荐事件名称
pub const RECOMMEND_EVENT: &str = "recommend_event";

/// 咖啡事件类型
pub const COFFEE_EVENT_TYPE: &str = "coffee";

/// 咖啡
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coffee {
    /// 咖啡 ID（首次保存前为空）
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// 品牌
    pub brand: String,

    /// 推荐次数，与数据库列同为 i32
    pub recommendations: i32,

    /// 口味标签
    pub flavors: Vec<Flavor>,
}

impl Coffee {
    /// 创建尚未保存的咖啡
    pub fn new(name: String, brand: String, flavors: Vec<Flavor>) -> Self {
        Self {
            id: None,
            name,
            brand,
            recommendations: 0,
            flavors,
        }
    }

    /// 口味名称列表
    pub fn flavor_names(&self) -> Vec<&str> {
        self.flavors.iter().map(|f| f.name.as_str()).collect()
    }

    /// 是否包含指定口味
    pub fn has_flavor(&self, name: &str) -> bool {
        self.flavors.iter().any(|f| f.name == name)
    }
}

/// 口味标签
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flavor {
    /// 口味 ID（随咖啡级联保存前为空）
    pub id: Option<i32>,

    /// 名称
    pub name: String,
}

impl Flavor {
    /// 创建尚未保存的口味
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// 是否已持久化
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// 审计事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// 事件 ID（写入前为空）
    pub id: Option<i32>,

    /// 事件名称
    pub name: String,

    /// 事件类型
    #[serde(rename = "type")]
    pub event_type: String,

    /// 事件负载
    pub payload: JsonValue,
}

impl Event {
    /// 创建新事件
    pub fn new(name: impl Into<String>, event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            id: None,
            name: name.into(),
            event_type: event_type.into(),
            payload,
        }
    }

    /// 咖啡推荐事件
    pub fn recommendation(coffee_id: i32) -> Self {
        Self::new(RECOMMEND_EVENT, COFFEE_EVENT_TYPE, json!({ "id": coffee_id }))
    }

    /// 负载中引用的咖啡 ID
    pub fn coffee_id(&self) -> Option<i32> {
        self.payload
            .get("id")
            .and_then(JsonValue::as_i64)
            .and_then(|id| i32::try_from(id).ok())
    }
}

/// 创建咖啡请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCoffee {
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub flavors: Vec<String>,
}

/// 更新咖啡请求（缺省字段保持不变）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCoffee {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub flavors: Option<Vec<String>>,
}

/// 分页参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// 最多返回条数
    pub limit: Option<u64>,
    /// 跳过条数
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

/// 口味过滤条件
#[derive(Debug, Clone, Default)]
pub struct FlavorFilter {
    pub name: Option<String>,
}

/// 事件过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
