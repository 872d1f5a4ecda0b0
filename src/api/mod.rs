//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Analytics endpoints are mounted under `/api/v1`; the health probes
//! live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI documentation for the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::system::banner_handler,
        handlers::system::health_handler,
        handlers::system::db_check_handler,
        handlers::competitions::list_competitions,
        handlers::matches::list_matches,
        handlers::matches::get_match,
        handlers::matches::get_lineups,
        handlers::events::list_events,
        handlers::events::event_summary,
    ),
    components(schemas(
        handlers::system::BannerResponse,
        handlers::system::HealthResponse,
        handlers::system::DbCheckResponse,
        dto::CompetitionDto,
        dto::CompetitionListResponse,
        dto::MatchDto,
        dto::MatchListResponse,
        dto::TeamLineupDto,
        dto::LineupResponse,
        dto::EventDto,
        dto::EventListResponse,
        dto::EventTypeSummary,
        dto::EventSummaryResponse,
        dto::PaginationMeta,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "System", description = "Health and diagnostics"),
        (name = "Competitions", description = "Competition and season listings"),
        (name = "Matches", description = "Match listings and lineups"),
        (name = "Events", description = "Event timelines and summaries"),
    ),
    info(
        title = "football-analytics API",
        description = "Read-only analytics over StatsBomb open data",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
