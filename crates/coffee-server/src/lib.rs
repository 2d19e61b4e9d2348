pub mod app;
pub mod config;

pub use app::{build_app, connect_database, run};
pub use config::AppConfig;
