use crate::config::{AppConfig, DatabaseConfig, LoggingConfig};
use anyhow::Result;
use axum::Router;
use coffee_api::{create_router, AppState, PageLimits};
use coffee_catalog::setup_schema;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志，`RUST_LOG` 优先于配置文件
pub fn init_tracing(config: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 连接数据库
pub async fn connect_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    if let Some(max_connections) = config.max_connections {
        options.max_connections(max_connections);
    }
    options.sqlx_logging(config.sqlx_logging);

    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Database connected");

    if config.auto_migrate {
        setup_schema(&db).await?;
    }
    Ok(db)
}

/// 组装路由
pub async fn build_app(config: &AppConfig) -> Result<Router> {
    let db = connect_database(&config.database).await?;

    let limits = PageLimits {
        default_page_size: config.api.default_page_size,
        max_page_size: config.api.max_page_size,
    };
    Ok(create_router(AppState::from_connection(Arc::new(db), limits)))
}

/// 启动服务，Ctrl-C 时优雅退出
pub async fn run(config: AppConfig) -> Result<()> {
    info!(brands = ?config.catalog.brands, "Coffee brands loaded");

    let app = build_app(&config).await?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Coffee server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
