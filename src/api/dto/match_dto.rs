//! Match and lineup DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::MatchRecord;

/// Filter query parameters for `GET /matches`. Pagination rides in the
/// same query string via [`super::common_dto::PaginationParams`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct MatchListParams {
    /// Restrict to one competition.
    pub competition_id: Option<i32>,
    /// Restrict to one season.
    pub season_id: Option<i32>,
    /// Restrict to matches where this team played, home or away.
    pub team: Option<String>,
}

/// One match in list and detail responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchDto {
    /// StatsBomb match id.
    pub match_id: i64,
    /// Competition the match belongs to.
    pub competition_id: i32,
    /// Season the match belongs to.
    pub season_id: i32,
    /// Calendar date the match was played.
    pub match_date: NaiveDate,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Display label, `date — home vs away`.
    pub label: String,
}

impl From<MatchRecord> for MatchDto {
    fn from(m: MatchRecord) -> Self {
        let label = format!("{} — {} vs {}", m.match_date, m.home_team, m.away_team);
        Self {
            match_id: m.match_id,
            competition_id: m.competition_id,
            season_id: m.season_id,
            match_date: m.match_date,
            home_team: m.home_team,
            away_team: m.away_team,
            label,
        }
    }
}

/// Paginated response body for `GET /matches`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchListResponse {
    /// Matches on this page.
    pub data: Vec<MatchDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// One team's lineup in `GET /matches/{id}/lineups`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamLineupDto {
    /// Team display name.
    pub team_name: String,
    /// Players fielded, sorted by name.
    pub players: Vec<String>,
}

/// Response body for `GET /matches/{id}/lineups`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LineupResponse {
    /// Match the lineups belong to.
    pub match_id: i64,
    /// One entry per team.
    pub teams: Vec<TeamLineupDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_label_formats_fixture() {
        let Some(date) = NaiveDate::from_ymd_opt(2018, 6, 30) else {
            unreachable!("valid date");
        };
        let dto = MatchDto::from(MatchRecord {
            match_id: 7478,
            competition_id: 43,
            season_id: 3,
            match_date: date,
            home_team: "Argentina".to_string(),
            away_team: "France".to_string(),
        });
        assert_eq!(dto.label, "2018-06-30 — Argentina vs France");
    }
}
