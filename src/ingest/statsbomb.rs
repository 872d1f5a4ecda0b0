//! Raw StatsBomb open-data wire shapes and their projections into
//! domain records.
//!
//! Only the fields the loaders consume are declared; everything else in
//! the JSON is ignored by serde.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{Competition, EnrichedEvent, LineupEntry, MatchEvent, MatchRecord};

/// One entry of `competitions.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCompetition {
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

impl From<RawCompetition> for Competition {
    fn from(raw: RawCompetition) -> Self {
        Self {
            competition_id: raw.competition_id,
            season_id: raw.season_id,
            country_name: raw.country_name,
            competition_name: raw.competition_name,
            season_name: raw.season_name,
        }
    }
}

/// Nested home-team object inside a match entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHomeTeam {
    /// Home team display name.
    pub home_team_name: String,
}

/// Nested away-team object inside a match entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAwayTeam {
    /// Away team display name.
    pub away_team_name: String,
}

/// One entry of a `matches/{competition_id}/{season_id}.json` file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    /// StatsBomb match id.
    pub match_id: i64,
    /// Match date as `YYYY-MM-DD`.
    pub match_date: String,
    /// Home side.
    pub home_team: RawHomeTeam,
    /// Away side.
    pub away_team: RawAwayTeam,
}

impl RawMatch {
    /// Projects into a [`MatchRecord`] for the given competition/season.
    ///
    /// Returns `None` when the match date does not parse; the loader
    /// counts and skips such entries.
    #[must_use]
    pub fn into_record(self, competition_id: i32, season_id: i32) -> Option<MatchRecord> {
        let match_date = NaiveDate::parse_from_str(&self.match_date, "%Y-%m-%d").ok()?;
        Some(MatchRecord {
            match_id: self.match_id,
            competition_id,
            season_id,
            match_date,
            home_team: self.home_team.home_team_name,
            away_team: self.away_team.away_team_name,
        })
    }
}

/// One player inside a lineup team entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLineupPlayer {
    /// Player full name.
    pub player_name: String,
}

/// One team entry of a `lineups/{match_id}.json` file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLineupTeam {
    /// Team display name.
    pub team_name: String,
    /// Players fielded by this team.
    pub lineup: Vec<RawLineupPlayer>,
}

impl RawLineupTeam {
    /// Flattens into one [`LineupEntry`] per player.
    pub fn into_entries(self, match_id: i64) -> impl Iterator<Item = LineupEntry> {
        let team_name = self.team_name;
        self.lineup.into_iter().map(move |player| LineupEntry {
            match_id,
            team_name: team_name.clone(),
            player_name: player.player_name,
        })
    }
}

/// Named-object wrapper used by several StatsBomb fields (`type`,
/// `player`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct RawNamed {
    /// Display name.
    pub name: Option<String>,
}

/// One entry of an `events/{match_id}.json` file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// StatsBomb event UUID.
    pub id: Option<Uuid>,
    /// Ordinal position within the match.
    pub index: Option<i32>,
    /// `HH:MM:SS.mmm` timestamp within the period.
    pub timestamp: Option<String>,
    /// Event type object.
    #[serde(rename = "type")]
    pub event_type: Option<RawNamed>,
    /// Player object, absent for e.g. period boundaries.
    pub player: Option<RawNamed>,
    /// Pitch location `[x, y]`, absent for off-ball events.
    pub location: Option<Vec<f64>>,
}

impl RawEvent {
    /// Minimal projection for the `events` table.
    #[must_use]
    pub fn into_minimal(self, match_id: i64) -> MatchEvent {
        MatchEvent {
            match_id,
            index: self.index,
            timestamp: self.timestamp,
            event_type: self.event_type.and_then(|t| t.name),
        }
    }

    /// Enriched projection for the `match_events` table.
    ///
    /// Returns `None` unless id, type, player, location, and timestamp
    /// are all present, mirroring the original dropna semantics.
    #[must_use]
    pub fn into_enriched(self) -> Option<EnrichedEvent> {
        let event_id = self.id?;
        let event_type = self.event_type.and_then(|t| t.name)?;
        let player = self.player.and_then(|p| p.name)?;
        let location = self.location?;
        let x = *location.first()?;
        let y = *location.get(1)?;
        let timestamp = self.timestamp?;
        Some(EnrichedEvent {
            event_id,
            event_type,
            player,
            x,
            y,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competition_deserializes() {
        let json = r#"{
            "competition_id": 11,
            "season_id": 90,
            "country_name": "Spain",
            "competition_name": "La Liga",
            "season_name": "2020/2021",
            "match_available": "2021-06-13T16:17:31.694"
        }"#;
        let Ok(raw) = serde_json::from_str::<RawCompetition>(json) else {
            unreachable!("competition should deserialize");
        };
        let comp = Competition::from(raw);
        assert_eq!(comp.competition_id, 11);
        assert_eq!(comp.season_name, "2020/2021");
    }

    #[test]
    fn match_projects_with_parsed_date() {
        let json = r#"{
            "match_id": 7478,
            "match_date": "2018-06-30",
            "kick_off": "16:00:00.000",
            "home_team": {"home_team_id": 779, "home_team_name": "Argentina"},
            "away_team": {"away_team_id": 771, "away_team_name": "France"}
        }"#;
        let Ok(raw) = serde_json::from_str::<RawMatch>(json) else {
            unreachable!("match should deserialize");
        };
        let Some(record) = raw.into_record(43, 3) else {
            unreachable!("date should parse");
        };
        assert_eq!(record.match_id, 7478);
        assert_eq!(record.home_team, "Argentina");
        assert_eq!(record.match_date.to_string(), "2018-06-30");
    }

    #[test]
    fn match_with_bad_date_is_dropped() {
        let raw = RawMatch {
            match_id: 1,
            match_date: "30/06/2018".to_string(),
            home_team: RawHomeTeam {
                home_team_name: "A".to_string(),
            },
            away_team: RawAwayTeam {
                away_team_name: "B".to_string(),
            },
        };
        assert!(raw.into_record(43, 3).is_none());
    }

    #[test]
    fn lineup_flattens_per_player() {
        let json = r#"[{
            "team_id": 779,
            "team_name": "Argentina",
            "lineup": [
                {"player_id": 5487, "player_name": "Lionel Messi"},
                {"player_id": 5503, "player_name": "Ángel Di María"}
            ]
        }]"#;
        let Ok(teams) = serde_json::from_str::<Vec<RawLineupTeam>>(json) else {
            unreachable!("lineups should deserialize");
        };
        let entries: Vec<_> = teams
            .into_iter()
            .flat_map(|t| t.into_entries(7478))
            .collect();
        assert_eq!(entries.len(), 2);
        assert!(
            entries
                .iter()
                .all(|e| e.match_id == 7478 && e.team_name == "Argentina")
        );
    }

    #[test]
    fn event_minimal_projection() {
        let json = r#"{
            "id": "9f6e2ecf-6685-45df-a62e-c2db3090f6c1",
            "index": 42,
            "timestamp": "00:12:34.567",
            "type": {"id": 30, "name": "Pass"},
            "possession": 7
        }"#;
        let Ok(raw) = serde_json::from_str::<RawEvent>(json) else {
            unreachable!("event should deserialize");
        };
        let event = raw.into_minimal(7478);
        assert_eq!(event.index, Some(42));
        assert_eq!(event.event_type.as_deref(), Some("Pass"));
    }

    #[test]
    fn enriched_requires_full_projection() {
        let json = r#"{
            "id": "9f6e2ecf-6685-45df-a62e-c2db3090f6c1",
            "index": 42,
            "timestamp": "00:12:34.567",
            "type": {"id": 16, "name": "Shot"},
            "player": {"id": 5487, "name": "Lionel Messi"},
            "location": [102.5, 40.1]
        }"#;
        let Ok(raw) = serde_json::from_str::<RawEvent>(json) else {
            unreachable!("event should deserialize");
        };
        let Some(enriched) = raw.into_enriched() else {
            unreachable!("full event should project");
        };
        assert_eq!(enriched.player, "Lionel Messi");
        assert!((enriched.x - 102.5).abs() < 1e-9);

        // No location → dropped, as in the original dropna.
        let json = r#"{
            "id": "9f6e2ecf-6685-45df-a62e-c2db3090f6c2",
            "timestamp": "00:12:34.567",
            "type": {"id": 30, "name": "Pass"},
            "player": {"id": 5487, "name": "Lionel Messi"}
        }"#;
        let Ok(raw) = serde_json::from_str::<RawEvent>(json) else {
            unreachable!("event should deserialize");
        };
        assert!(raw.into_enriched().is_none());
    }
}
