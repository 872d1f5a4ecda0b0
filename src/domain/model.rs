//! Core analytics records as stored in PostgreSQL.
//!
//! These are the normalized projections of StatsBomb open-data JSON; the
//! raw wire shapes live in [`crate::ingest::statsbomb`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One competition/season entry from `competitions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// StatsBomb competition id.
    pub competition_id: i32,
    /// StatsBomb season id.
    pub season_id: i32,
    /// Country or region the competition belongs to.
    pub country_name: String,
    /// Competition display name (e.g. `"La Liga"`).
    pub competition_name: String,
    /// Season display name (e.g. `"2017/2018"`).
    pub season_name: String,
}

/// One match from a `matches/{competition_id}/{season_id}.json` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
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
}

/// One (team, player) row from a `lineups/{match_id}.json` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    /// Match the lineup belongs to.
    pub match_id: i64,
    /// Team fielding the player.
    pub team_name: String,
    /// Player full name.
    pub player_name: String,
}

/// Minimal projection of one event from an `events/{match_id}.json` file.
///
/// StatsBomb events carry dozens of fields; this keeps only what the
/// timeline and type-distribution endpoints need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Match the event belongs to.
    pub match_id: i64,
    /// Ordinal position of the event within the match.
    pub index: Option<i32>,
    /// Raw StatsBomb timestamp, `HH:MM:SS.mmm` within the period.
    pub timestamp: Option<String>,
    /// Event type name (e.g. `"Pass"`, `"Shot"`).
    pub event_type: Option<String>,
}

/// Enriched event row with pitch coordinates, loaded from a local raw
/// event file into the `match_events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    /// StatsBomb event UUID.
    pub event_id: Uuid,
    /// Event type name.
    pub event_type: String,
    /// Player the event is attributed to.
    pub player: String,
    /// Pitch x coordinate (0–120).
    pub x: f64,
    /// Pitch y coordinate (0–80).
    pub y: f64,
    /// Raw StatsBomb timestamp.
    pub timestamp: String,
}
