//! Competition DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Competition;

/// Query parameters for `GET /competitions`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CompetitionFilterParams {
    /// Restrict to one country or region (exact match).
    pub country: Option<String>,
}

/// One competition/season entry in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitionDto {
    /// StatsBomb competition id.
    pub competition_id: i32,
    /// StatsBomb season id.
    pub season_id: i32,
    /// Country or region name.
    pub country_name: String,
    /// Competition display name.
    pub competition_name: String,
    /// Season display name.
    pub season_name: String,
}

impl From<Competition> for CompetitionDto {
    fn from(c: Competition) -> Self {
        Self {
            competition_id: c.competition_id,
            season_id: c.season_id,
            country_name: c.country_name,
            competition_name: c.competition_name,
            season_name: c.season_name,
        }
    }
}

/// Response body for `GET /competitions`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompetitionListResponse {
    /// Competition/season entries.
    pub data: Vec<CompetitionDto>,
}
