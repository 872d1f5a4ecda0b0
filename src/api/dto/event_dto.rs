//! Event timeline and summary DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::MatchEvent;

/// One event in timeline responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDto {
    /// Ordinal position within the match.
    pub index: Option<i32>,
    /// Raw StatsBomb timestamp, `HH:MM:SS.mmm` within the period.
    pub timestamp: Option<String>,
    /// Event type name.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl From<MatchEvent> for EventDto {
    fn from(e: MatchEvent) -> Self {
        Self {
            index: e.index,
            timestamp: e.timestamp,
            event_type: e.event_type,
        }
    }
}

/// Paginated response body for `GET /matches/{id}/events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Match the events belong to.
    pub match_id: i64,
    /// Events on this page, in timeline order.
    pub data: Vec<EventDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Per-type aggregate in the event summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventTypeSummary {
    /// Event type name; `null` groups events without one.
    pub event_type: Option<String>,
    /// Number of events of this type.
    pub count: i64,
    /// Count scaled to a per-90-minutes rate.
    pub per_90: f64,
}

/// Response body for `GET /matches/{id}/events/summary`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventSummaryResponse {
    /// Match the summary describes.
    pub match_id: i64,
    /// Total events recorded for the match.
    pub total_events: i64,
    /// Minutes-played estimate the per-90 rates are scaled by.
    pub minutes_estimated: u32,
    /// Per-type aggregates, most frequent first.
    pub types: Vec<EventTypeSummary>,
}
