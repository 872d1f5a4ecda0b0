//! Event timeline and summary endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    EventDto, EventListResponse, EventSummaryResponse, EventTypeSummary, PaginationParams,
};
use crate::app_state::AppState;
use crate::domain::{minutes_played, per_90};
use crate::error::{ErrorResponse, ServiceError};

/// `GET /matches/{id}/events` — Paginated event timeline.
///
/// # Errors
///
/// Returns [`ServiceError::MatchNotFound`] if the match does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{id}/events",
    tag = "Events",
    summary = "List match events",
    description = "Returns the minimal event projection in timeline order (by `index`).",
    params(
        ("id" = i64, Path, description = "StatsBomb match id"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated event timeline", body = EventListResponse),
        (status = 404, description = "Match not found", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(page): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .store
        .get_match(id)
        .await?
        .ok_or(ServiceError::MatchNotFound(id))?;

    let page = page.clamped();
    let total = state.store.count_events(id).await?;
    let events = state
        .store
        .events_for_match(id, page.limit(), page.offset())
        .await?;

    let total = u32::try_from(total).unwrap_or(u32::MAX);
    Ok(Json(EventListResponse {
        match_id: id,
        data: events.into_iter().map(EventDto::from).collect(),
        pagination: page.meta(total),
    }))
}

/// `GET /matches/{id}/events/summary` — Per-type counts and per-90 rates.
///
/// Minutes played are estimated from the latest parseable event
/// timestamp, assuming 90 minutes when nothing parses.
///
/// # Errors
///
/// Returns [`ServiceError::MatchNotFound`] if the match does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{id}/events/summary",
    tag = "Events",
    summary = "Event type summary",
    description = "Returns event counts grouped by type together with per-90-minute rates, \
                   scaled by a minutes-played estimate derived from event timestamps.",
    params(
        ("id" = i64, Path, description = "StatsBomb match id"),
    ),
    responses(
        (status = 200, description = "Per-type summary", body = EventSummaryResponse),
        (status = 404, description = "Match not found", body = ErrorResponse),
    )
)]
pub async fn event_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .store
        .get_match(id)
        .await?
        .ok_or(ServiceError::MatchNotFound(id))?;

    let counts = state.store.event_type_counts(id).await?;
    let timestamps = state.store.event_timestamps(id).await?;

    let minutes = minutes_played(timestamps.iter().map(String::as_str));
    let total_events: i64 = counts.iter().map(|(_, count)| count).sum();

    let types = counts
        .into_iter()
        .map(|(event_type, count)| EventTypeSummary {
            event_type,
            count,
            per_90: per_90(count, minutes),
        })
        .collect();

    Ok(Json(EventSummaryResponse {
        match_id: id,
        total_events,
        minutes_estimated: minutes,
        types,
    }))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches/{id}/events", get(list_events))
        .route("/matches/{id}/events/summary", get(event_summary))
}
