pub mod db;
pub mod error;
pub mod model;
pub mod recommend;
pub mod repository;
pub mod service;

pub use db::{coffee, coffee_flavor, event, flavor, setup_schema};
pub use error::{CatalogError, Result};
pub use model::{
    Coffee, CreateCoffee, Event, EventFilter, Flavor, FlavorFilter, Pagination, UpdateCoffee,
    COFFEE_EVENT_TYPE, RECOMMEND_EVENT,
};
pub use recommend::RecommendationTransaction;
pub use repository::{
    CoffeeRepository, DataSource, EventRecorder, FlavorRepository, SeaCoffeeRepository,
    SeaDataSource, SeaEventRecorder, SeaFlavorRepository, UnitOfWork,
};
pub use service::CoffeeService;
