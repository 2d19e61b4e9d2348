use crate::{error::Result, models::*, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use coffee_catalog::EventFilter;
use tracing::debug;

/// 列出审计事件
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<PageResponse<EventResponse>>> {
    debug!(name = ?query.name, event_type = ?query.event_type, "Listing events");

    let limit = state.page_limits.resolve(query.limit)?;
    let offset = query.offset.unwrap_or(0);

    let filter = EventFilter {
        name: query.name,
        event_type: query.event_type,
        limit: Some(limit),
        offset: Some(offset),
    };
    let data = state
        .events
        .find(filter)
        .await?
        .into_iter()
        .map(EventResponse::from)
        .collect();

    Ok(Json(PageResponse {
        data,
        limit,
        offset,
    }))
}
