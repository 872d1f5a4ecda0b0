//! Match and lineup endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    LineupResponse, MatchDto, MatchListParams, MatchListResponse, PaginationParams, TeamLineupDto,
};
use crate::app_state::AppState;
use crate::domain::LineupEntry;
use crate::error::{ErrorResponse, ServiceError};
use crate::persistence::MatchFilter;

/// `GET /matches` — Paginated match list with optional filters.
///
/// # Errors
///
/// Returns a [`ServiceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/matches",
    tag = "Matches",
    summary = "List matches",
    description = "Returns a paginated match list ordered by date then id. `team` matches \
                   either side of the fixture.",
    params(MatchListParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated match list", body = MatchListResponse),
    )
)]
pub async fn list_matches(
    State(state): State<AppState>,
    Query(filter): Query<MatchListParams>,
    Query(page): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let page = page.clamped();
    let filter = MatchFilter {
        competition_id: filter.competition_id,
        season_id: filter.season_id,
        team: filter.team,
    };

    let total = state.store.count_matches(&filter).await?;
    let matches = state
        .store
        .list_matches(&filter, page.limit(), page.offset())
        .await?;

    let total = u32::try_from(total).unwrap_or(u32::MAX);
    Ok(Json(MatchListResponse {
        data: matches.into_iter().map(MatchDto::from).collect(),
        pagination: page.meta(total),
    }))
}

/// `GET /matches/{id}` — Single match detail.
///
/// # Errors
///
/// Returns [`ServiceError::MatchNotFound`] if the match does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{id}",
    tag = "Matches",
    summary = "Get match details",
    params(
        ("id" = i64, Path, description = "StatsBomb match id"),
    ),
    responses(
        (status = 200, description = "Match detail", body = MatchDto),
        (status = 404, description = "Match not found", body = ErrorResponse),
    )
)]
pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = state
        .store
        .get_match(id)
        .await?
        .ok_or(ServiceError::MatchNotFound(id))?;

    Ok(Json(MatchDto::from(record)))
}

/// `GET /matches/{id}/lineups` — Lineups grouped per team.
///
/// # Errors
///
/// Returns [`ServiceError::MatchNotFound`] if the match does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/matches/{id}/lineups",
    tag = "Matches",
    summary = "Get match lineups",
    description = "Returns the fielded players grouped per team, both sorted by name.",
    params(
        ("id" = i64, Path, description = "StatsBomb match id"),
    ),
    responses(
        (status = 200, description = "Lineups per team", body = LineupResponse),
        (status = 404, description = "Match not found", body = ErrorResponse),
    )
)]
pub async fn get_lineups(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .store
        .get_match(id)
        .await?
        .ok_or(ServiceError::MatchNotFound(id))?;

    let entries = state.store.lineups_for_match(id).await?;
    Ok(Json(LineupResponse {
        match_id: id,
        teams: group_by_team(entries),
    }))
}

/// Folds sorted (team, player) rows into one entry per team. Relies on
/// the store's team-then-player ordering.
fn group_by_team(entries: Vec<LineupEntry>) -> Vec<TeamLineupDto> {
    let mut teams: Vec<TeamLineupDto> = Vec::new();
    for entry in entries {
        match teams.last_mut() {
            Some(team) if team.team_name == entry.team_name => {
                team.players.push(entry.player_name);
            }
            _ => teams.push(TeamLineupDto {
                team_name: entry.team_name,
                players: vec![entry.player_name],
            }),
        }
    }
    teams
}

/// Match routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches))
        .route("/matches/{id}", get(get_match))
        .route("/matches/{id}/lineups", get(get_lineups))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(team: &str, player: &str) -> LineupEntry {
        LineupEntry {
            match_id: 7478,
            team_name: team.to_string(),
            player_name: player.to_string(),
        }
    }

    #[test]
    fn groups_sorted_entries_per_team() {
        let entries = vec![
            entry("Argentina", "Lionel Messi"),
            entry("Argentina", "Ángel Di María"),
            entry("France", "Antoine Griezmann"),
            entry("France", "Kylian Mbappé"),
        ];
        let teams = group_by_team(entries);
        assert_eq!(teams.len(), 2);
        let Some(first) = teams.first() else {
            unreachable!("two teams expected");
        };
        assert_eq!(first.team_name, "Argentina");
        assert_eq!(first.players.len(), 2);
    }

    #[test]
    fn empty_lineup_yields_no_teams() {
        assert!(group_by_team(Vec::new()).is_empty());
    }
}
