mod converter;
pub mod entity;
pub mod schema;

pub use entity::{coffee, coffee_flavor, event, flavor};
pub use schema::setup_schema;
