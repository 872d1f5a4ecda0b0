//! Competition endpoints.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CompetitionDto, CompetitionFilterParams, CompetitionListResponse};
use crate::app_state::AppState;
use crate::error::ServiceError;

/// `GET /competitions` — List competition/season entries.
///
/// # Errors
///
/// Returns a [`ServiceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/competitions",
    tag = "Competitions",
    summary = "List competitions",
    description = "Returns every ingested competition/season entry, ordered by competition \
                   then season name. Optionally filtered by country.",
    params(CompetitionFilterParams),
    responses(
        (status = 200, description = "Competition list", body = CompetitionListResponse),
    )
)]
pub async fn list_competitions(
    State(state): State<AppState>,
    Query(params): Query<CompetitionFilterParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let competitions = state
        .store
        .list_competitions(params.country.as_deref())
        .await?;

    Ok(Json(CompetitionListResponse {
        data: competitions.into_iter().map(CompetitionDto::from).collect(),
    }))
}

/// Competition routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/competitions", get(list_competitions))
}
