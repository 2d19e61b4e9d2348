use crate::{
    error::Result,
    models::*,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use coffee_catalog::{CreateCoffee, Pagination, UpdateCoffee};
use tracing::{debug, info};

/// 列出咖啡
pub async fn list_coffees(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PageResponse<CoffeeResponse>>> {
    debug!(limit = ?query.limit, offset = ?query.offset, "Listing coffees");

    let limit = state.page_limits.resolve(query.limit)?;
    let offset = query.offset.unwrap_or(0);

    let data = state
        .coffee_service
        .list(Pagination::new(limit, offset))
        .await?
        .into_iter()
        .map(CoffeeResponse::from)
        .collect();

    Ok(Json(PageResponse {
        data,
        limit,
        offset,
    }))
}

/// 获取咖啡
pub async fn get_coffee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CoffeeResponse>> {
    debug!(coffee_id = id, "Getting coffee");

    let coffee = state.coffee_service.get(id).await?;

    Ok(Json(CoffeeResponse::from(coffee)))
}

/// 创建咖啡
pub async fn create_coffee(
    State(state): State<AppState>,
    Json(req): Json<CreateCoffee>,
) -> Result<(StatusCode, Json<CoffeeResponse>)> {
    info!(name = %req.name, brand = %req.brand, "Creating coffee");

    let coffee = state.coffee_service.create(req).await?;

    Ok((StatusCode::CREATED, Json(CoffeeResponse::from(coffee))))
}

/// 更新咖啡
pub async fn update_coffee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCoffee>,
) -> Result<Json<CoffeeResponse>> {
    info!(coffee_id = id, "Updating coffee");

    let coffee = state.coffee_service.update(id, req).await?;

    Ok(Json(CoffeeResponse::from(coffee)))
}

/// 删除咖啡
pub async fn delete_coffee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    info!(coffee_id = id, "Deleting coffee");

    state.coffee_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 推荐咖啡
pub async fn recommend_coffee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CoffeeResponse>> {
    info!(coffee_id = id, "Recommending coffee");

    let mut coffee = state.coffee_service.get(id).await?;
    state.coffee_service.recommend(&mut coffee).await?;

    Ok(Json(CoffeeResponse::from(coffee)))
}
