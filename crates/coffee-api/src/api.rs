use crate::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 创建 API 路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 咖啡 API
        .route(
            "/api/v1/coffees",
            get(handlers::list_coffees).post(handlers::create_coffee),
        )
        .route(
            "/api/v1/coffees/:id",
            get(handlers::get_coffee)
                .patch(handlers::update_coffee)
                .delete(handlers::delete_coffee),
        )
        .route(
            "/api/v1/coffees/:id/recommend",
            post(handlers::recommend_coffee),
        )
        // 审计事件 API
        .route("/api/v1/events", get(handlers::list_events))
        // 添加中间件
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查
async fn health_check() -> &'static str {
    "OK"
}
