use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 咖啡实体
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coffees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub brand: String,
    #[sea_orm(default_value = 0)]
    pub recommendations: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coffee_flavor::Entity")]
    CoffeeFlavor,
}

impl Related<super::coffee_flavor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoffeeFlavor.def()
    }
}

// 多对多：coffees -> coffee_flavors -> flavors
impl Related<super::flavor::Entity> for Entity {
    fn to() -> RelationDef {
        super::coffee_flavor::Relation::Flavor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coffee_flavor::Relation::Coffee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod coffee {
    pub use super::*;
}

/// 口味实体
pub mod flavor {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "flavors")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::coffee_flavor::Entity")]
        CoffeeFlavor,
    }

    impl Related<super::coffee_flavor::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::CoffeeFlavor.def()
        }
    }

    impl Related<super::coffee::Entity> for Entity {
        fn to() -> RelationDef {
            super::coffee_flavor::Relation::Coffee.def()
        }

        fn via() -> Option<RelationDef> {
            Some(super::coffee_flavor::Relation::Flavor.def().rev())
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// 咖啡-口味关联实体
pub mod coffee_flavor {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "coffee_flavors")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub coffee_id: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub flavor_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::coffee::Entity",
            from = "Column::CoffeeId",
            to = "super::coffee::Column::Id",
            on_delete = "Cascade"
        )]
        Coffee,
        #[sea_orm(
            belongs_to = "super::flavor::Entity",
            from = "Column::FlavorId",
            to = "super::flavor::Column::Id",
            on_delete = "Cascade"
        )]
        Flavor,
    }

    impl Related<super::coffee::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Coffee.def()
        }
    }

    impl Related<super::flavor::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Flavor.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// 审计事件实体（不与咖啡建立外键，删除咖啡后事件仍保留）
pub mod event {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "events")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        #[sea_orm(column_name = "type")]
        pub event_type: String,
        #[sea_orm(column_type = "Json")]
        pub payload: Json,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
